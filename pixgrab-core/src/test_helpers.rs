// ABOUTME: Test helper utilities for building mock pages and image fixtures
// ABOUTME: Provides HTML and encoded-image bodies for mockito-backed tests

use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Minimal HTML page with one `<img>` per source
pub fn mock_html_page(sources: &[&str]) -> String {
    let images: String = sources
        .iter()
        .map(|src| format!("<img src=\"{}\">\n", src))
        .collect();
    format!("<!doctype html><html><body>\n{}</body></html>", images)
}

/// A black PNG of the given size
pub fn png_fixture(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::new(width, height);
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .expect("encode png fixture");
    out.into_inner()
}

/// A 1x1 PNG whose IHDR claims `width` x `height`; only the header is valid
pub fn png_with_header_dimensions(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = png_fixture(1, 1);
    // 8-byte signature, 4-byte length, then the "IHDR" tag and its 13 data bytes
    let ihdr = 12..29;
    bytes[16..20].copy_from_slice(&width.to_be_bytes());
    bytes[20..24].copy_from_slice(&height.to_be_bytes());
    let crc = crc32fast::hash(&bytes[ihdr.clone()]);
    bytes[ihdr.end..ihdr.end + 4].copy_from_slice(&crc.to_be_bytes());
    bytes
}

#[test]
fn test_png_with_header_dimensions_patches_ihdr() {
    let bytes = png_with_header_dimensions(300, 200);
    assert_eq!(&bytes[12..16], b"IHDR");
    assert_eq!(u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]), 300);
    assert_eq!(u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]), 200);
}

#[test]
fn test_mock_html_page_contains_sources() {
    let page = mock_html_page(&["https://a.example.com/1.jpg", "https://a.example.com/2.jpg"]);
    assert!(page.contains(r#"<img src="https://a.example.com/1.jpg">"#));
    assert!(page.contains(r#"<img src="https://a.example.com/2.jpg">"#));
}

#[test]
fn test_png_fixture_has_signature() {
    let bytes = png_fixture(2, 2);
    assert!(bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]));
}
