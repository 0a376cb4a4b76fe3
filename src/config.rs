//! Configuration with built-in defaults and an optional TOML override.
//!
//! Without a config file the checker runs against the public Kaspa API
//! with the six built-in test addresses. `kaspa_checker.toml` in the
//! working directory may override any of these values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::types::CheckerError;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kaspa_checker.toml";

pub const DEFAULT_BASE_URL: &str = "https://api.kaspa.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "kaspa-checker/0.1.0";

/// Addresses checked when no override is configured, in report order.
pub const DEFAULT_ADDRESSES: [&str; 6] = [
    // Properly formatted but possibly invalid
    "kaspa:qqvmgvj5vcqjrz9xmz3nqzgl9hk5xrmqzmdwrjfggcwtpj0qhvd8s6p9fhyav",
    "kaspa:qpzry9x8gf2tvdw0s3jn54khce6mua7l0000000000000000000000000000",
    "kaspa:qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq",
    // Invalid formats
    "invalid-address",
    "kaspa:invalid",
    // Known valid format attempt
    "kaspa:qpamkvhy2jbmsyvjn6kt24t8h6v8q2g6vw8dkp5q4t2h8y7n9v4xwwxdlpxqs",
];

/// Top-level checker configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CheckerConfig {
    pub api: ApiConfig,
    /// Addresses to check, in order.
    pub addresses: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            addresses: DEFAULT_ADDRESSES.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CheckerConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using built-in defaults");
            return Ok(Self::default());
        }
        let cfg = Self::load(path)?;
        info!(
            path = %path.display(),
            base_url = %cfg.api.base_url,
            addresses = cfg.addresses.len(),
            "Loaded config file"
        );
        Ok(cfg)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: CheckerConfig = toml::from_str(contents).context("Invalid TOML")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), CheckerError> {
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(CheckerError::Config(format!(
                "api.base_url must be an http(s) URL, got {:?}",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(CheckerError::Config("api.timeout_secs must be > 0".into()));
        }
        if let Some(pos) = self.addresses.iter().position(|a| a.is_empty()) {
            return Err(CheckerError::Config(format!("addresses[{pos}] is empty")));
        }
        Ok(())
    }
}
