// ABOUTME: Error types for the extraction core with user-friendly messages
// ABOUTME: Classifies transport, upstream, and decode failures behind one enum

use crate::types::Platform;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No images found for {platform}: {reason}")]
    NoCandidatesFound { platform: Platform, reason: String },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Timeout: Request took too long to complete")]
    Timeout,

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ExtractError {
    pub fn no_candidates(platform: Platform, reason: impl Into<String>) -> Self {
        ExtractError::NoCandidatesFound {
            platform,
            reason: reason.into(),
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            ExtractError::NoCandidatesFound { .. } => {
                Some("Make sure the post or profile is public")
            }
            ExtractError::Transport(_) => Some("Check your internet connection and try again"),
            ExtractError::Timeout => Some("Try again or check your network connection"),
            ExtractError::HttpStatus { status: 404, .. } => {
                Some("The page may have been deleted or made private")
            }
            ExtractError::HttpStatus { status: 429, .. } => {
                Some("Wait a moment before making another request")
            }
            _ => None,
        }
    }

    /// Whether the same request could succeed later. Nothing retries; this only
    /// feeds diagnostics.
    pub fn is_transient(&self) -> bool {
        match self {
            ExtractError::Transport(_) | ExtractError::Timeout => true,
            ExtractError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExtractError::Timeout
        } else if let Some(status) = err.status() {
            ExtractError::HttpStatus {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if err.is_decode() {
            ExtractError::InvalidResponse(err.to_string())
        } else {
            ExtractError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(err: serde_json::Error) -> Self {
        ExtractError::InvalidResponse(err.to_string())
    }
}

impl From<image::ImageError> for ExtractError {
    fn from(err: image::ImageError) -> Self {
        ExtractError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ExtractError {
    fn from(err: url::ParseError) -> Self {
        ExtractError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
