// ABOUTME: Generic HTML strategy collecting absolute image tag sources from a page
// ABOUTME: Fallback for every host the dispatcher does not recognize

use super::{dedup_preserving_order, SourceStrategy};
use crate::error::Result;
use crate::fetcher::{ClientIdentity, Fetcher};
use crate::types::{is_absolute_http_url, Platform};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img, noscript").expect("static img selector parses"));

pub struct GenericHtmlStrategy<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> GenericHtmlStrategy<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }
}

impl SourceStrategy for GenericHtmlStrategy<'_> {
    fn platform(&self) -> Platform {
        Platform::Generic
    }

    fn extract(&self, url: &str) -> Result<Vec<String>> {
        let html = self.fetcher.get_text(url, ClientIdentity::Browser)?;
        Ok(extract_image_sources(&html))
    }
}

/// Unique absolute `src` (or `data-src` when `src` is missing) values of every
/// `<img>`, in document order. Relative URLs are dropped, not resolved.
/// Markup inside `<noscript>` counts, since lazy loaders keep the full image there.
pub fn extract_image_sources(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut sources = Vec::new();
    collect_sources(&document, &mut sources);
    dedup_preserving_order(sources)
}

fn collect_sources(document: &Html, sources: &mut Vec<String>) {
    for element in document.select(&IMG_SELECTOR) {
        let attrs = element.value();

        // The parser keeps <noscript> contents as raw text
        if attrs.name() == "noscript" {
            let inner: String = element.text().collect();
            if !inner.trim().is_empty() {
                collect_sources(&Html::parse_fragment(&inner), sources);
            }
            continue;
        }

        let Some(src) = attrs
            .attr("src")
            .filter(|value| !value.is_empty())
            .or_else(|| attrs.attr("data-src"))
        else {
            continue;
        };
        if is_absolute_http_url(src) {
            sources.push(src.to_string());
        }
    }
}
