// ABOUTME: Centralized constants for the pixgrab extraction core
// ABOUTME: Contains timeouts, client identities, endpoint templates, and tier thresholds

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Per-request timeout for every outbound strategy call
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum redirects followed by a single request
    pub const MAX_REDIRECTS: usize = 5;
}

/// User-Agent strings sent by the fetcher
pub mod identity {
    /// Desktop browser identity, used where pages serve reduced markup to bots
    pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

    /// Minimal identity accepted by Reddit's JSON API and X's server-rendered pages
    pub const GENERIC_USER_AGENT: &str = "Mozilla/5.0";
}

/// Upstream endpoints and URL templates
pub mod urls {
    /// Instagram public web API base
    pub const INSTAGRAM_API_BASE: &str = "https://i.instagram.com/api/v1";

    /// Instagram web origin, sent as referer on API lookups
    pub const INSTAGRAM_WEB_BASE: &str = "https://www.instagram.com";

    /// App id the Instagram web client sends with anonymous API calls
    pub const INSTAGRAM_APP_ID: &str = "936619743392459";

    /// YouTube thumbnail CDN base
    pub const YOUTUBE_THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

    /// Thumbnail names from highest to lowest nominal quality
    pub const YOUTUBE_THUMBNAIL_QUALITIES: &[&str] =
        &["maxresdefault", "sddefault", "hqdefault", "mqdefault", "default"];
}

/// Image URL suffixes accepted by the Reddit walk
pub const REDDIT_IMAGE_SUFFIXES: &[&str] = &[".jpg", ".png", ".jpeg", ".webp"];

/// Longest-edge thresholds for resolution tiers, in pixels
pub mod tiers {
    pub const UHD_4K_MIN_EDGE: u32 = 3840;
    pub const FHD_1080P_MIN_EDGE: u32 = 1920;
    pub const HD_720P_MIN_EDGE: u32 = 1280;
}
