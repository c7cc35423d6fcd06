// ABOUTME: Reddit strategy walking a submission's JSON listing for image URLs
// ABOUTME: Visits every nested map and sequence with an explicit stack

use super::{dedup_preserving_order, SourceStrategy};
use crate::constants::REDDIT_IMAGE_SUFFIXES;
use crate::error::Result;
use crate::fetcher::{ClientIdentity, Fetcher};
use crate::types::Platform;
use serde_json::{Map, Value};
use url::Url;

const IMAGE_URL_KEYS: &[&str] = &["url_overridden_by_dest", "url"];

pub struct RedditStrategy<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> RedditStrategy<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }
}

impl SourceStrategy for RedditStrategy<'_> {
    fn platform(&self) -> Platform {
        Platform::Reddit
    }

    fn extract(&self, url: &str) -> Result<Vec<String>> {
        let api_url = json_api_url(url);
        let listing = self
            .fetcher
            .get_json(&api_url, ClientIdentity::Generic, &[])?;
        Ok(dedup_preserving_order(collect_image_urls(&listing)))
    }
}

/// Permalink to its `.json` listing: trailing slashes go, `/.json` is appended
/// to the path, and any query string is kept. Already-JSON URLs pass through.
pub fn json_api_url(url: &str) -> String {
    if let Ok(mut parsed) = Url::parse(url) {
        if parsed.path().ends_with(".json") {
            return parsed.to_string();
        }
        let path = format!("{}/.json", parsed.path().trim_end_matches('/'));
        parsed.set_path(&path);
        return parsed.to_string();
    }

    if url.ends_with(".json") {
        url.to_string()
    } else {
        format!("{}/.json", url.trim_end_matches('/'))
    }
}

/// The shapes the walk distinguishes
enum Node<'a> {
    Map(&'a Map<String, Value>),
    Sequence(&'a [Value]),
    String(&'a str),
    Other,
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Node::Map(map),
            Value::Array(items) => Node::Sequence(items),
            Value::String(s) => Node::String(s),
            _ => Node::Other,
        }
    }
}

/// Every string under an image key that ends in a known image suffix, in
/// depth-first discovery order (duplicates kept).
pub fn collect_image_urls(root: &Value) -> Vec<String> {
    let mut found = Vec::new();
    let mut stack = vec![Node::from(root)];

    while let Some(node) = stack.pop() {
        match node {
            Node::Map(map) => {
                for (key, value) in map {
                    if let Node::String(s) = Node::from(value) {
                        if IMAGE_URL_KEYS.contains(&key.as_str()) && has_image_suffix(s) {
                            found.push(s.to_string());
                        }
                    }
                }
                // Reversed so the stack pops children in document order
                stack.extend(map.values().rev().map(Node::from));
            }
            Node::Sequence(items) => stack.extend(items.iter().rev().map(Node::from)),
            Node::String(_) | Node::Other => {}
        }
    }

    found
}

fn has_image_suffix(value: &str) -> bool {
    REDDIT_IMAGE_SUFFIXES
        .iter()
        .any(|suffix| value.ends_with(suffix))
}
