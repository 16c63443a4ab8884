use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constraint::MajorMinor;

// =============================================================================
// Feed defaults
// =============================================================================

/// endoflife.date feed for CPython release lines
pub const DEFAULT_FEED_URL: &str = "https://endoflife.date/api/python.json";

/// Per-attempt request timeout in milliseconds (6 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 6_000;

/// Retries after the first failed attempt
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Delay before the first retry in milliseconds; doubled per retry
pub const DEFAULT_BACKOFF_BASE_MS: u64 = 1_000;

/// How long a fetched catalog is served from memory (1 hour)
pub const DEFAULT_CACHE_TTL_MS: i64 = 60 * 60 * 1000;

/// Oldest release line ever reported as supported
pub const DEFAULT_MINIMUM_VERSION: MajorMinor = MajorMinor::new(3, 9);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Catalog client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub feed_url: String,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
    pub max_retries: u32,
    /// Cache lifetime in milliseconds
    pub cache_ttl_ms: i64,
    pub minimum_version: MajorMinor,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_retries: DEFAULT_MAX_RETRIES,
            cache_ttl_ms: DEFAULT_CACHE_TTL_MS,
            minimum_version: DEFAULT_MINIMUM_VERSION,
        }
    }
}

/// Read a JSON config file. Missing fields take their defaults.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `path` if given, else the default config file if it exists, else defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = default_config_path();
            if default_path.is_file() {
                load_config(&default_path)
            } else {
                Ok(ClientConfig::default())
            }
        }
    }
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/support-matrix/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/support-matrix/config.json,
/// or ./support-matrix/config.json if neither is available.
pub fn default_config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
        .join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("support-matrix")
}
