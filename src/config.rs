//! Configuration management and validation.
//!
//! Provides the feed location, the parsing policy for fields that fail to
//! parse, and the cache fallback policy. Configuration is layered: built-in
//! defaults, then an optional TOML file, then environment, then CLI overrides.

use crate::constants::{DEFAULT_FEED_URL, FEED_URL_ENV_VAR};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What to do with a row whose value column does not parse as a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePolicy {
    /// Keep the row with a value of 0
    #[default]
    ZeroFill,
    /// Discard the row and count it as rejected
    RejectRow,
}

/// Settings for turning feed rows into records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub unparsable_value: ValuePolicy,
}

/// Settings for the single-slot record cache
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Serve the previous snapshot when a reload fails
    pub fallback_on_reload_failure: bool,
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP(S) location of the discharge feed
    pub feed_url: String,

    pub parsing: ParsingConfig,

    pub cache: CacheConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            parsing: ParsingConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Default location of the configuration file
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("canal-discharge").join("config.toml"))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read config file {}", path.display()), e))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration file: {}", e)))
    }

    /// Load with layered configuration (defaults -> file -> environment)
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(std::env::var(FEED_URL_ENV_VAR).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply an environment override for the feed URL, ignoring blank values
    pub fn apply_env_overrides(&mut self, feed_url: Option<String>) {
        if let Some(url) = feed_url.filter(|u| !u.trim().is_empty()) {
            debug!("Feed URL overridden by {}", FEED_URL_ENV_VAR);
            self.feed_url = url;
        }
    }

    /// Create configuration with a custom feed URL
    pub fn with_feed_url(mut self, url: impl Into<String>) -> Self {
        self.feed_url = url.into();
        self
    }

    /// Create configuration with a custom value policy
    pub fn with_value_policy(mut self, policy: ValuePolicy) -> Self {
        self.parsing.unparsable_value = policy;
        self
    }

    /// Create configuration that falls back to the last good snapshot
    pub fn with_reload_fallback(mut self, enabled: bool) -> Self {
        self.cache.fallback_on_reload_failure = enabled;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let url = self.feed_url.trim();
        if url.is_empty() {
            return Err(Error::configuration("feed_url must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::configuration(format!(
                "feed_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        Ok(())
    }
}
