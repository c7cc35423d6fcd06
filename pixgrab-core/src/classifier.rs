// ABOUTME: Resolution classifier that maps image bytes to a tier label
// ABOUTME: Reads only the image header; pure function of the bytes with no network access

use crate::error::{ExtractError, Result};
use crate::types::Resolution;
use std::io::Cursor;

/// Read the dimensions of `bytes` and classify by the longest edge. Unreadable input yields
/// `Resolution::unknown()` instead of an error.
pub fn classify(bytes: &[u8]) -> Resolution {
    match decode_dimensions(bytes) {
        Ok((width, height)) => Resolution::from_dimensions(width, height),
        Err(err) => {
            log::debug!("Image classification failed: {}", err);
            Resolution::unknown()
        }
    }
}

/// Image dimensions read from the header only, keeping the error for diagnostics.
/// Pixel data is never decoded, so large or truncated-body images still classify.
pub fn decode_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ExtractError::Decode(format!("Failed to create image reader: {}", e)))?;

    if reader.format().is_none() {
        return Err(ExtractError::Decode(
            "Could not determine image format".to_string(),
        ));
    }

    Ok(reader.into_dimensions()?)
}
