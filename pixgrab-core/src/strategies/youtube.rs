// ABOUTME: YouTube strategy templating thumbnail URLs from the video id
// ABOUTME: Makes no network request; every quality variant is returned unverified

use super::{SourceStrategy, StrategyEndpoints};
use crate::constants::urls;
use crate::error::{ExtractError, Result};
use crate::types::Platform;
use once_cell::sync::Lazy;
use regex::Regex;

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:v=|youtu\.be/|shorts/)([A-Za-z0-9_-]{11})").expect("static video id regex")
});

pub struct YouTubeStrategy {
    thumbnail_base: String,
}

impl YouTubeStrategy {
    pub fn new(endpoints: &StrategyEndpoints) -> Self {
        Self {
            thumbnail_base: endpoints
                .youtube_thumbnail_base
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

impl SourceStrategy for YouTubeStrategy {
    fn platform(&self) -> Platform {
        Platform::YouTube
    }

    fn extract(&self, url: &str) -> Result<Vec<String>> {
        let video_id = extract_video_id(url).ok_or_else(|| {
            ExtractError::no_candidates(Platform::YouTube, "no video id in URL")
        })?;

        Ok(urls::YOUTUBE_THUMBNAIL_QUALITIES
            .iter()
            .map(|quality| format!("{}/{}/{}.jpg", self.thumbnail_base, video_id, quality))
            .collect())
    }
}

/// First 11-character id following `v=`, `youtu.be/`, or `shorts/`
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id_forms() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/abcDEF_-123"),
            Some("abcDEF_-123")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_extract_video_id_missing() {
        assert_eq!(extract_video_id("https://www.youtube.com/"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/@channel"), None);
    }

    #[test]
    fn test_extract_returns_five_thumbnails_in_quality_order() {
        let strategy = YouTubeStrategy::new(&StrategyEndpoints::default());
        let urls = strategy
            .extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
            .unwrap();

        assert_eq!(
            urls,
            vec![
                "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
                "https://img.youtube.com/vi/dQw4w9WgXcQ/sddefault.jpg",
                "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
                "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg",
                "https://img.youtube.com/vi/dQw4w9WgXcQ/default.jpg",
            ]
        );
    }

    #[test]
    fn test_extract_without_id_is_no_candidates() {
        let strategy = YouTubeStrategy::new(&StrategyEndpoints::default());
        assert!(matches!(
            strategy.extract("https://www.youtube.com/feed/trending"),
            Err(ExtractError::NoCandidatesFound { .. })
        ));
    }
}
