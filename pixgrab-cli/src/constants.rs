// ABOUTME: Centralized constants for the pixgrab command-line shell
// ABOUTME: Contains download limits, timeouts, config locations, and user-facing messages

/// Byte retrieval limits
pub mod limits {
    /// Largest image body accepted by default (25MB)
    pub const DEFAULT_MAX_IMAGE_SIZE: u64 = 25 * 1024 * 1024;

    /// Env var overriding the image size limit, e.g. "50MB"
    pub const MAX_IMAGE_SIZE_ENV: &str = "PIXGRAB_MAX_IMAGE_SIZE";
}

/// Timeout configurations for various operations
pub mod timeouts {
    /// Default per-request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

    /// Upper bound accepted from config or flags
    pub const MAX_TIMEOUT_SECS: u64 = 300;

    /// Spinner tick interval for smooth animation
    pub const PROGRESS_TICK_MS: u64 = 80;
}

/// Config file locations
pub mod config {
    /// Directory name under the XDG config home
    pub const APP_DIR: &str = "pixgrab";

    /// File name inside the config directory
    pub const FILE_NAME: &str = "config.toml";

    /// Project-local config file, highest precedence
    pub const PROJECT_FILE_NAME: &str = "pixgrab.toml";
}

/// User-facing messages
pub mod messages {
    pub const NO_IMAGES_FOUND: &str =
        "No images found at this URL. Make sure the post or profile is public.";
}
