// ABOUTME: HTTP byte retrieval for resolved candidates with size limits and progress
// ABOUTME: Classifies each downloaded image and writes it to disk under a derived name

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use pixgrab_core::{classify, ImageCandidate, Resolution};
use reqwest::blocking::Client;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::constants::timeouts::PROGRESS_TICK_MS;
use pixgrab_core::constants::timeouts::MAX_REDIRECTS;

const READ_CHUNK_BYTES: usize = 64 * 1024;

/// A candidate whose bytes were fetched and classified
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub candidate: ImageCandidate,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub resolution: Resolution,
}

impl FetchedImage {
    pub fn file_name(&self) -> String {
        file_name_for(self.candidate.source_url(), &self.resolution, &self.bytes)
    }
}

pub struct ImageDownloader {
    client: Client,
    max_size: u64,
    show_progress: bool,
}

impl ImageDownloader {
    pub fn new(timeout: Duration, user_agent: Option<&str>, max_size: u64) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if let Some(agent) = user_agent {
            builder = builder.user_agent(agent.to_string());
        } else {
            builder = builder.user_agent(pixgrab_core::constants::identity::BROWSER_USER_AGENT);
        }
        let client = builder
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        // Progress only makes sense on an interactive stderr
        let show_progress = {
            use std::io::IsTerminal;
            std::io::stderr().is_terminal()
        };

        Ok(Self {
            client,
            max_size,
            show_progress,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Download and classify one candidate
    pub fn fetch(&self, candidate: &ImageCandidate) -> Result<FetchedImage> {
        let (bytes, content_type) = self.download(candidate.source_url())?;
        let resolution = classify(&bytes);
        log::debug!(
            "Classified {} as {} ({} bytes)",
            candidate.source_url(),
            resolution.tier,
            bytes.len()
        );

        Ok(FetchedImage {
            candidate: candidate.clone(),
            bytes,
            content_type,
            resolution,
        })
    }

    /// Download every candidate in order. Failures are collected, not fatal.
    pub fn fetch_all(
        &self,
        candidates: &[ImageCandidate],
    ) -> (Vec<FetchedImage>, Vec<(ImageCandidate, anyhow::Error)>) {
        let mut fetched = Vec::with_capacity(candidates.len());
        let mut failed = Vec::new();

        for candidate in candidates {
            match self.fetch(candidate) {
                Ok(image) => fetched.push(image),
                Err(err) => {
                    log::debug!("Skipping {}: {:#}", candidate.source_url(), err);
                    failed.push((candidate.clone(), err));
                }
            }
        }

        (fetched, failed)
    }

    /// GET `url`, returning the body and its content type
    pub fn download(&self, url: &str) -> Result<(Vec<u8>, Option<String>)> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| anyhow!("HTTP request failed for {}: {}", url, e))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP request failed with status {}: {}",
                response.status(),
                url
            ));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_size {
                return Err(anyhow!(
                    "Image too large: {} bytes (max: {} bytes): {}",
                    content_length,
                    self.max_size,
                    url
                ));
            }
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map(str::to_string);

        let progress_bar = self.progress_bar(url, response.content_length());
        let bytes = self.read_body_with_limit(response, url, progress_bar.as_ref());

        if let Some(pb) = progress_bar {
            match &bytes {
                Ok(data) => pb.finish_with_message(format!(
                    "Downloaded {} ({})",
                    display_name(url),
                    format_bytes(data.len())
                )),
                Err(_) => pb.finish_with_message("Download failed"),
            }
        }

        Ok((bytes?, content_type))
    }

    fn read_body_with_limit(
        &self,
        mut response: reqwest::blocking::Response,
        url: &str,
        progress_bar: Option<&ProgressBar>,
    ) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        let mut chunk = vec![0u8; READ_CHUNK_BYTES];

        loop {
            let read = response
                .read(&mut chunk)
                .with_context(|| format!("Failed to read response body: {}", url))?;
            if read == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..read]);

            if let Some(pb) = progress_bar {
                pb.set_position(bytes.len() as u64);
            }

            if bytes.len() as u64 > self.max_size {
                return Err(anyhow!(
                    "Image exceeded size limit during download: {} bytes (max: {}): {}",
                    bytes.len(),
                    self.max_size,
                    url
                ));
            }
        }

        Ok(bytes)
    }

    fn progress_bar(&self, url: &str, content_length: Option<u64>) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = match content_length {
            Some(total) => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{msg} [{bar:25.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                {
                    pb.set_style(style.progress_chars("=>-"));
                }
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {bytes}") {
                    pb.set_style(style);
                }
                pb.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
                pb
            }
        };
        pb.set_message(format!("Downloading {}", display_name(url)));
        Some(pb)
    }
}

/// File name for a saved image: the URL's last path segment without query,
/// or `image_{w}x{h}.{ext}` when the URL has none
pub fn file_name_for(url: &str, resolution: &Resolution, bytes: &[u8]) -> String {
    let from_url = Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
    });

    match from_url.map(|name| sanitize_file_name(&name)) {
        Some(name) if !name.is_empty() => name,
        _ => {
            let ext = image::guess_format(bytes)
                .ok()
                .and_then(|format| format.extensions_str().first().copied())
                .unwrap_or("jpg");
            match (resolution.width, resolution.height) {
                (Some(w), Some(h)) => format!("image_{}x{}.{}", w, h, ext),
                _ => format!("image.{}", ext),
            }
        }
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

/// Write `bytes` into `dir` as `name`, adding `-1`, `-2`, ... instead of overwriting
pub fn save_image(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let path = unique_path(dir, name);
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write image: {}", path.display()))?;
    Ok(path)
}

fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    (1..)
        .map(|n| match ext {
            Some(ext) => dir.join(format!("{}-{}.{}", stem, n, ext)),
            None => dir.join(format!("{}-{}", stem, n)),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

fn display_name(url: &str) -> &str {
    url.split('?')
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("image")
}

/// Format bytes in a human-readable way
pub fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use mockito::Server;
    use pixgrab_core::{Platform, Tier};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn downloader(max_size: u64) -> ImageDownloader {
        ImageDownloader::new(Duration::from_secs(5), None, max_size)
            .unwrap()
            .with_progress(false)
    }

    #[test]
    fn test_fetch_classifies_image() {
        let mut server = Server::new();
        let data = png(1280, 720);
        let mock = server
            .mock("GET", "/hd.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(&data)
            .create();

        let candidate =
            ImageCandidate::new(format!("{}/hd.png", server.url()), Platform::Generic).unwrap();
        let fetched = downloader(1024 * 1024).fetch(&candidate).unwrap();

        mock.assert();
        assert_eq!(fetched.bytes, data);
        assert_eq!(fetched.content_type.as_deref(), Some("image/png"));
        assert_eq!(fetched.resolution.tier, Tier::Hd720p);
        assert_eq!(fetched.file_name(), "hd.png");
    }

    #[test]
    fn test_fetch_all_keeps_going_after_failures() {
        let mut server = Server::new();
        server.mock("GET", "/gone.jpg").with_status(404).create();
        server
            .mock("GET", "/ok.png")
            .with_status(200)
            .with_body(png(16, 16))
            .create();

        let candidates = vec![
            ImageCandidate::new(format!("{}/gone.jpg", server.url()), Platform::YouTube).unwrap(),
            ImageCandidate::new(format!("{}/ok.png", server.url()), Platform::YouTube).unwrap(),
        ];
        let (fetched, failed) = downloader(1024 * 1024).fetch_all(&candidates);

        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].candidate, candidates[1]);
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].0, candidates[0]);
    }

    #[test]
    fn test_oversized_image_rejection() {
        let mut server = Server::new();
        let large = vec![0xFF; 4096];
        server
            .mock("GET", "/large.png")
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body(&large)
            .create();

        let result = downloader(1024).download(&format!("{}/large.png", server.url()));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("too large") || message.contains("size limit"));
    }

    /// Register `hops` chained redirects ending at a PNG; returns the first URL
    fn redirect_chain(server: &mut Server, hops: usize) -> String {
        for i in 0..hops {
            let next = if i + 1 == hops {
                "/final.png".to_string()
            } else {
                format!("/hop{}", i + 1)
            };
            server
                .mock("GET", format!("/hop{}", i).as_str())
                .with_status(302)
                .with_header("location", &next)
                .create();
        }
        server
            .mock("GET", "/final.png")
            .with_status(200)
            .with_body(png(8, 8))
            .create();
        format!("{}/hop0", server.url())
    }

    #[test]
    fn test_redirects_follow_core_limit() {
        let mut server = Server::new();
        let url = redirect_chain(&mut server, MAX_REDIRECTS);
        let (bytes, _) = downloader(1024 * 1024).download(&url).unwrap();
        assert_eq!(bytes, png(8, 8));

        let mut server = Server::new();
        let url = redirect_chain(&mut server, MAX_REDIRECTS + 1);
        assert!(downloader(1024 * 1024).download(&url).is_err());
    }

    #[test]
    fn test_http_error_handling() {
        let mut server = Server::new();
        server.mock("GET", "/missing.jpg").with_status(404).create();

        let result = downloader(1024).download(&format!("{}/missing.jpg", server.url()));
        assert!(result.unwrap_err().to_string().contains("404"));
    }

    #[test]
    fn test_non_image_body_is_unknown_tier() {
        let mut server = Server::new();
        server
            .mock("GET", "/fake.jpg")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>Not an image</html>")
            .create();

        let candidate =
            ImageCandidate::new(format!("{}/fake.jpg", server.url()), Platform::Generic).unwrap();
        let fetched = downloader(1024 * 1024).fetch(&candidate).unwrap();
        assert_eq!(fetched.resolution, Resolution::unknown());
    }

    #[test]
    fn test_file_name_from_url() {
        let res = Resolution::unknown();
        assert_eq!(
            file_name_for("https://i.redd.it/abc123.jpg?width=640", &res, &[]),
            "abc123.jpg"
        );
        assert_eq!(
            file_name_for("https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg", &res, &[]),
            "maxresdefault.jpg"
        );
    }

    #[test]
    fn test_file_name_fallback_uses_dimensions_and_format() {
        let data = png(800, 600);
        let res = Resolution::from_dimensions(800, 600);
        assert_eq!(
            file_name_for("https://cdn.example.com/", &res, &data),
            "image_800x600.png"
        );
        assert_eq!(
            file_name_for("https://cdn.example.com/", &Resolution::unknown(), b"junk"),
            "image.jpg"
        );
    }

    #[test]
    fn test_save_image_never_overwrites() {
        let dir = TempDir::new().unwrap();

        let first = save_image(dir.path(), "photo.jpg", b"one").unwrap();
        let second = save_image(dir.path(), "photo.jpg", b"two").unwrap();
        let third = save_image(dir.path(), "photo.jpg", b"three").unwrap();

        assert_eq!(first.file_name().unwrap(), "photo.jpg");
        assert_eq!(second.file_name().unwrap(), "photo-1.jpg");
        assert_eq!(third.file_name().unwrap(), "photo-2.jpg");
        assert_eq!(std::fs::read(&first).unwrap(), b"one");
        assert_eq!(std::fs::read(&third).unwrap(), b"three");
    }

    #[test]
    fn test_save_image_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let path = save_image(&nested, "x.png", b"data").unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("https://a.example.com/p/photo.jpg?x=1"), "photo.jpg");
        assert_eq!(display_name("https://a.example.com/"), "image");
    }
}
