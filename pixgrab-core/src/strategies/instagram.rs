// ABOUTME: Instagram strategy resolving posts, reels, and profile pictures
// ABOUTME: Uses the anonymous public web API; carousels expand to every child image

use super::{SourceStrategy, StrategyEndpoints};
use crate::constants::urls;
use crate::error::{ExtractError, Result};
use crate::fetcher::{ClientIdentity, Fetcher};
use crate::types::Platform;
use serde_json::Value;
use url::Url;

const SHORTCODE_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// `media_type` Instagram assigns to multi-item posts
const CAROUSEL_MEDIA_TYPE: i64 = 8;

/// What an Instagram URL path points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstagramTarget {
    Post { shortcode: String },
    Profile { username: String },
}

pub struct InstagramStrategy<'a> {
    fetcher: &'a Fetcher,
    api_base: String,
    web_base: String,
}

impl<'a> InstagramStrategy<'a> {
    pub fn new(fetcher: &'a Fetcher, endpoints: &StrategyEndpoints) -> Self {
        Self {
            fetcher,
            api_base: endpoints.instagram_api_base.trim_end_matches('/').to_string(),
            web_base: endpoints.instagram_web_base.trim_end_matches('/').to_string(),
        }
    }

    fn lookup_json(&self, url: &str, referer: &str) -> Result<Value> {
        self.fetcher.get_json(
            url,
            ClientIdentity::Browser,
            &[
                ("X-IG-App-ID", urls::INSTAGRAM_APP_ID),
                ("X-Requested-With", "XMLHttpRequest"),
                ("Accept", "application/json"),
                ("Referer", referer),
            ],
        )
    }

    fn post_images(&self, shortcode: &str) -> Result<Vec<String>> {
        let media_id = shortcode_to_media_id(shortcode).ok_or_else(|| {
            ExtractError::no_candidates(
                Platform::Instagram,
                format!("undecodable shortcode '{}'", shortcode),
            )
        })?;

        let info_url = format!("{}/media/{}/info/", self.api_base, media_id);
        let referer = format!("{}/p/{}/", self.web_base, shortcode);
        let payload = self.lookup_json(&info_url, &referer)?;

        let item = payload
            .get("items")
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .ok_or_else(|| {
                ExtractError::no_candidates(
                    Platform::Instagram,
                    format!("post {} has no media items", shortcode),
                )
            })?;

        let images = item_image_urls(item);
        if images.is_empty() {
            return Err(ExtractError::no_candidates(
                Platform::Instagram,
                format!("post {} exposes no image versions", shortcode),
            ));
        }
        Ok(images)
    }

    fn profile_picture(&self, username: &str) -> Result<Vec<String>> {
        let info_url = Url::parse_with_params(
            &format!("{}/users/web_profile_info/", self.api_base),
            &[("username", username)],
        )?;
        let referer = format!("{}/{}/", self.web_base, username);
        let payload = self.lookup_json(info_url.as_str(), &referer)?;

        let user = payload
            .get("data")
            .and_then(|data| data.get("user"))
            .filter(|user| !user.is_null())
            .ok_or_else(|| {
                ExtractError::no_candidates(
                    Platform::Instagram,
                    format!("profile '{}' not found", username),
                )
            })?;

        ["profile_pic_url_hd", "profile_pic_url"]
            .iter()
            .filter_map(|key| user.get(*key).and_then(Value::as_str))
            .find(|url| !url.trim().is_empty())
            .map(|url| vec![url.to_string()])
            .ok_or_else(|| {
                ExtractError::no_candidates(
                    Platform::Instagram,
                    format!("profile '{}' has no picture URL", username),
                )
            })
    }
}

impl SourceStrategy for InstagramStrategy<'_> {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn extract(&self, url: &str) -> Result<Vec<String>> {
        match parse_target(url)? {
            InstagramTarget::Post { shortcode } => self.post_images(&shortcode),
            InstagramTarget::Profile { username } => self.profile_picture(&username),
        }
    }
}

/// Classify the URL path: `/p/<code>` and `/reel/<code>` are posts, a single
/// segment is a username, anything else is unsupported.
pub fn parse_target(url: &str) -> Result<InstagramTarget> {
    let parsed = Url::parse(url)?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|parts| parts.filter(|part| !part.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [kind, shortcode, ..] if *kind == "p" || *kind == "reel" => Ok(InstagramTarget::Post {
            shortcode: shortcode.to_string(),
        }),
        [kind] if *kind == "p" || *kind == "reel" => Err(ExtractError::no_candidates(
            Platform::Instagram,
            "post URL without a shortcode",
        )),
        [username] => Ok(InstagramTarget::Profile {
            username: username.to_string(),
        }),
        _ => Err(ExtractError::no_candidates(
            Platform::Instagram,
            format!("unsupported path '{}'", parsed.path()),
        )),
    }
}

/// Decode a post shortcode (base64 URL alphabet, big-endian) into the numeric media id
pub fn shortcode_to_media_id(shortcode: &str) -> Option<String> {
    if shortcode.trim().is_empty() {
        return None;
    }
    let mut value: u128 = 0;
    for ch in shortcode.chars() {
        let index = SHORTCODE_ALPHABET.find(ch)? as u128;
        value = value.checked_mul(64)?.checked_add(index)?;
    }
    Some(value.to_string())
}

/// Images for one media item: each carousel child in order, or the item's own
/// best image. Video versions are ignored.
fn item_image_urls(item: &Value) -> Vec<String> {
    let media_type = item.get("media_type").and_then(Value::as_i64);
    if media_type == Some(CAROUSEL_MEDIA_TYPE) {
        return item
            .get("carousel_media")
            .and_then(Value::as_array)
            .map(|children| children.iter().filter_map(best_image_url).collect())
            .unwrap_or_default();
    }

    best_image_url(item).into_iter().collect()
}

/// Largest `width * height` entry of `image_versions2.candidates`
fn best_image_url(item: &Value) -> Option<String> {
    let candidates = item
        .get("image_versions2")
        .and_then(|versions| versions.get("candidates"))
        .and_then(Value::as_array)?;

    candidates
        .iter()
        .filter_map(|candidate| {
            let url = candidate.get("url").and_then(Value::as_str)?.trim();
            if url.is_empty() {
                return None;
            }
            let width = candidate.get("width").and_then(Value::as_i64).unwrap_or(0).max(0);
            let height = candidate.get("height").and_then(Value::as_i64).unwrap_or(0).max(0);
            Some((width.saturating_mul(height), url))
        })
        // max_by_key returns the last maximum; reverse so ties keep the first listed
        .rev()
        .max_by_key(|(area, _)| *area)
        .map(|(_, url)| url.to_string())
}
