//! User defaults loaded from `~/.config/guise/config.toml`.
//!
//! ```toml
//! [headers]
//! os = "random"
//! browser = "chrome"
//! custom_headers = "X-Scanner=guise"
//! suppress_headers = "DNT"
//!
//! [client]
//! connections = 50
//! timeout_ms = 10000
//! verify_tls = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::fingerprint::{BrowserRestriction, GenerationOptions, OsTarget};
use crate::http_client::ClientOptions;

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "GUISE_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// `[headers]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HeaderDefaults {
    pub os: OsTarget,
    pub browser: BrowserRestriction,
    pub custom_headers: String,
    pub suppress_headers: String,
}

impl HeaderDefaults {
    #[must_use]
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions::default()
            .with_os(self.os)
            .with_browser(self.browser)
            .with_custom_headers(&self.custom_headers)
            .with_suppressed_headers(&self.suppress_headers)
    }
}

/// Top-level config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub headers: HeaderDefaults,
    pub client: ClientOptions,
}

impl Config {
    /// Load from [`config_path`]. A missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `$GUISE_CONFIG`, else `<config dir>/guise/config.toml`.
#[must_use]
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("guise")
        .join("config.toml")
}
