// ABOUTME: Domain types shared by every strategy and the classifier
// ABOUTME: Defines platforms, image candidates, and resolution tiers

use crate::constants::tiers;
use crate::error::{ExtractError, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// Platform family a strategy handles, also used as the candidate's hint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Generic,
    Instagram,
    YouTube,
    Reddit,
    Twitter,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Generic => "Generic",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
            Platform::Reddit => "Reddit",
            Platform::Twitter => "Twitter",
        };
        write!(f, "{}", name)
    }
}

/// An image URL produced by a strategy, not yet fetched or decoded.
///
/// Only absolute `http(s)` URLs can be wrapped, so every candidate a caller
/// receives can be fetched as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCandidate {
    source_url: String,
    platform_hint: Platform,
}

impl ImageCandidate {
    pub fn new(source_url: impl Into<String>, platform_hint: Platform) -> Result<Self> {
        let source_url = source_url.into();
        if !is_absolute_http_url(&source_url) {
            return Err(ExtractError::InvalidUrl(format!(
                "candidate is not an absolute http(s) URL: {}",
                source_url
            )));
        }
        Ok(Self {
            source_url,
            platform_hint,
        })
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn platform_hint(&self) -> Platform {
        self.platform_hint
    }
}

pub(crate) fn is_absolute_http_url(value: &str) -> bool {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return false;
    }
    Url::parse(value)
        .map(|url| url.host_str().is_some_and(|host| !host.is_empty()))
        .unwrap_or(false)
}

/// Coarse resolution label derived from the longest image edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tier {
    Uhd4k,
    Fhd1080p,
    Hd720p,
    Dimensions { width: u32, height: u32 },
    Unknown,
}

impl Tier {
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        let longest = width.max(height);
        if longest >= tiers::UHD_4K_MIN_EDGE {
            Tier::Uhd4k
        } else if longest >= tiers::FHD_1080P_MIN_EDGE {
            Tier::Fhd1080p
        } else if longest >= tiers::HD_720P_MIN_EDGE {
            Tier::Hd720p
        } else {
            Tier::Dimensions { width, height }
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Uhd4k => write!(f, "4K"),
            Tier::Fhd1080p => write!(f, "1080p"),
            Tier::Hd720p => write!(f, "720p"),
            Tier::Dimensions { width, height } => write!(f, "{}\u{d7}{}", width, height),
            Tier::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Decoded dimensions plus tier; `width`/`height` are `None` when decoding failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub tier: Tier,
}

impl Resolution {
    pub fn unknown() -> Self {
        Self {
            width: None,
            height: None,
            tier: Tier::Unknown,
        }
    }

    pub fn from_dimensions(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            tier: Tier::from_dimensions(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Generic.to_string(), "Generic");
        assert_eq!(Platform::YouTube.to_string(), "YouTube");
        assert_eq!(Platform::Twitter.to_string(), "Twitter");
    }

    #[test]
    fn test_candidate_requires_absolute_http_url() {
        assert!(ImageCandidate::new("https://example.com/a.jpg", Platform::Generic).is_ok());
        assert!(ImageCandidate::new("http://example.com/a.jpg", Platform::Generic).is_ok());
        assert!(ImageCandidate::new("/relative/a.jpg", Platform::Generic).is_err());
        assert!(ImageCandidate::new("//cdn.example.com/a.jpg", Platform::Generic).is_err());
        assert!(ImageCandidate::new("data:image/png;base64,AAAA", Platform::Generic).is_err());
        assert!(ImageCandidate::new("ftp://example.com/a.jpg", Platform::Generic).is_err());
        assert!(ImageCandidate::new("https://", Platform::Generic).is_err());
    }

    #[test]
    fn test_candidate_serializes_camel_case() {
        let candidate = ImageCandidate::new("https://example.com/a.jpg", Platform::Reddit).unwrap();
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["sourceUrl"], "https://example.com/a.jpg");
        assert_eq!(json["platformHint"], "Reddit");
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::from_dimensions(3840, 2160), Tier::Uhd4k);
        assert_eq!(Tier::from_dimensions(3839, 2160), Tier::Fhd1080p);
        assert_eq!(Tier::from_dimensions(1920, 1080), Tier::Fhd1080p);
        assert_eq!(Tier::from_dimensions(1919, 1080), Tier::Hd720p);
        assert_eq!(Tier::from_dimensions(1280, 720), Tier::Hd720p);
        assert_eq!(
            Tier::from_dimensions(1279, 720),
            Tier::Dimensions {
                width: 1279,
                height: 720
            }
        );
    }

    #[test]
    fn test_tier_uses_longest_edge() {
        assert_eq!(Tier::from_dimensions(1080, 3840), Tier::Uhd4k);
        assert_eq!(Tier::from_dimensions(720, 1280), Tier::Hd720p);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Uhd4k.to_string(), "4K");
        assert_eq!(Tier::Fhd1080p.to_string(), "1080p");
        assert_eq!(Tier::Hd720p.to_string(), "720p");
        assert_eq!(
            Tier::Dimensions {
                width: 640,
                height: 480
            }
            .to_string(),
            "640×480"
        );
        assert_eq!(Tier::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_resolution_serializes_tier_as_label() {
        let json = serde_json::to_value(Resolution::from_dimensions(800, 600)).unwrap();
        assert_eq!(json["width"], 800);
        assert_eq!(json["height"], 600);
        assert_eq!(json["tier"], "800×600");

        let json = serde_json::to_value(Resolution::unknown()).unwrap();
        assert!(json["width"].is_null());
        assert_eq!(json["tier"], "Unknown");
    }
}
