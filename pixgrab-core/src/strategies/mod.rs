// ABOUTME: Per-platform extraction strategies behind a common trait
// ABOUTME: Each strategy turns one input URL into ordered candidate image URLs

use crate::constants::urls;
use crate::error::Result;
use crate::types::Platform;

pub mod generic;
pub mod instagram;
pub mod reddit;
pub mod twitter;
pub mod youtube;

pub use generic::GenericHtmlStrategy;
pub use instagram::InstagramStrategy;
pub use reddit::RedditStrategy;
pub use twitter::TwitterStrategy;
pub use youtube::YouTubeStrategy;

/// Upstream bases the strategies build lookup URLs from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyEndpoints {
    pub instagram_api_base: String,
    pub instagram_web_base: String,
    pub youtube_thumbnail_base: String,
}

impl Default for StrategyEndpoints {
    fn default() -> Self {
        Self {
            instagram_api_base: urls::INSTAGRAM_API_BASE.to_string(),
            instagram_web_base: urls::INSTAGRAM_WEB_BASE.to_string(),
            youtube_thumbnail_base: urls::YOUTUBE_THUMBNAIL_BASE.to_string(),
        }
    }
}

pub trait SourceStrategy {
    /// Platform family this strategy handles
    fn platform(&self) -> Platform;

    /// Candidate image URLs, best-effort ordered by likely quality.
    ///
    /// Errors stay inside the crate's `Result` so the dispatcher can log the
    /// cause before normalizing it to an empty list.
    fn extract(&self, url: &str) -> Result<Vec<String>>;
}

/// Keep the first occurrence of each value, preserving discovery order
pub(crate) fn dedup_preserving_order<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
