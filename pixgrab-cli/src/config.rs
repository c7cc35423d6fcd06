// ABOUTME: Configuration file loading, validation, and hierarchical merging for pixgrab
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use crate::constants::{config as names, limits, timeouts};
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, deserialize_with = "validate_timeout")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default, deserialize_with = "validate_format")]
    pub preferred_format: Option<String>,
    #[serde(default, deserialize_with = "validate_size")]
    pub max_image_size: Option<String>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        Self::load_from_paths(&Self::get_config_paths())
    }

    /// Load and merge files in order; later paths override earlier ones.
    /// Missing files are skipped, malformed ones are errors.
    pub fn load_from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            let path = path.as_ref();
            if !path.is_file() {
                continue;
            }
            log::debug!("Loading config from {}", path.display());
            config = config.merge(Self::load_from_file(path)?);
        }

        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })
    }

    /// Standard config file paths, lowest precedence first
    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(
                home_dir
                    .join(".config")
                    .join(names::APP_DIR)
                    .join(names::FILE_NAME),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home)
                .join(names::APP_DIR)
                .join(names::FILE_NAME);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }

        // 3. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join(names::PROJECT_FILE_NAME));
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            user_agent: other.user_agent.or(self.user_agent),
            output_dir: other.output_dir.or(self.output_dir),
            preferred_format: other.preferred_format.or(self.preferred_format),
            max_image_size: other.max_image_size.or(self.max_image_size),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECS))
    }

    /// Size limit from the environment, then the config file, then the default
    pub fn max_image_size_bytes(&self) -> u64 {
        let configured = self
            .max_image_size
            .as_deref()
            .and_then(parse_size)
            .unwrap_or(limits::DEFAULT_MAX_IMAGE_SIZE);
        parse_size_env(limits::MAX_IMAGE_SIZE_ENV, configured)
    }

    pub fn prefers_json(&self) -> bool {
        self.preferred_format.as_deref() == Some("json")
    }
}

/// Parse sizes like "500KB", "25MB", "1GB", or a plain byte count
pub fn parse_size(value: &str) -> Option<u64> {
    let value = value.trim().to_uppercase();

    let (number_part, unit) = if let Some(n) = value.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = value.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = value.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = value.strip_suffix('B') {
        (n, 1)
    } else {
        (value.as_str(), 1)
    };

    number_part.trim().parse::<u64>().ok()?.checked_mul(unit)
}

pub fn parse_size_env(env_var: &str, default: u64) -> u64 {
    std::env::var(env_var)
        .ok()
        .and_then(|value| parse_size(&value))
        .unwrap_or(default)
}

fn validate_format<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("table") | Some("json") => Ok(value),
        Some(format) => Err(D::Error::custom(format!(
            "Invalid format '{}'. Must be one of: table, json",
            format
        ))),
    }
}

fn validate_timeout<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<u64> = Option::deserialize(deserializer)?;
    match value {
        Some(secs) if secs == 0 || secs > timeouts::MAX_TIMEOUT_SECS => {
            Err(D::Error::custom(format!(
                "Invalid timeout_secs {}. Must be between 1 and {}",
                secs,
                timeouts::MAX_TIMEOUT_SECS
            )))
        }
        _ => Ok(value),
    }
}

fn validate_size<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<String> = Option::deserialize(deserializer)?;
    if let Some(ref size) = value {
        if parse_size(size).is_none_or(|bytes| bytes == 0) {
            return Err(D::Error::custom(format!(
                "Invalid max_image_size '{}'. Expected format like '500KB', '25MB', '1GB'",
                size
            )));
        }
    }
    Ok(value)
}
