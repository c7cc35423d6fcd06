// ABOUTME: Twitter/X strategy scanning server-delivered markup for media CDN URLs
// ABOUTME: Script-rendered content is never executed, so only inline URLs are found

use super::{dedup_preserving_order, SourceStrategy};
use crate::error::Result;
use crate::fetcher::{ClientIdentity, Fetcher};
use crate::types::Platform;
use once_cell::sync::Lazy;
use regex::Regex;

static MEDIA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://pbs\.twimg\.com/media/[A-Za-z0-9_-]+\.[a-zA-Z]+")
        .expect("static media url regex")
});

pub struct TwitterStrategy<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> TwitterStrategy<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }
}

impl SourceStrategy for TwitterStrategy<'_> {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn extract(&self, url: &str) -> Result<Vec<String>> {
        let markup = self.fetcher.get_text(url, ClientIdentity::Generic)?;
        Ok(find_media_urls(&markup))
    }
}

/// Unique `pbs.twimg.com/media/<id>.<ext>` matches across the raw markup
pub fn find_media_urls(markup: &str) -> Vec<String> {
    dedup_preserving_order(
        MEDIA_URL_RE
            .find_iter(markup)
            .map(|m| m.as_str().to_string()),
    )
}
