//! # Client Configuration
//!
//! Connection settings for the scheduling service, read from an optional
//! YAML file and then overridden from the environment.
//!
//! ## YAML Format
//!
//! ```yaml
//! api_base_url: "https://gym.example.com"
//! auth_token: "eyJhbGciOi..."
//! request_timeout_secs: 15
//! log_level: "info"
//! ```
//!
//! Every key is optional. `GYM_API_URL`, `GYM_API_TOKEN` and
//! `GYM_API_TIMEOUT_SECS` take precedence over the file.

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const ENV_API_URL: &str = "GYM_API_URL";
pub const ENV_API_TOKEN: &str = "GYM_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "GYM_API_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of the scheduling service, without the `/api/...` path
    pub api_base_url: String,
    /// Bearer token of the signed-in trainer
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            auth_token: None,
            request_timeout_secs: 15,
            log_level: "info".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from `path` (defaults when `None`), then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ClientConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Invalid config file {:?}", path))?;
        debug!("Loaded client config from {:?}", path);
        Ok(config)
    }

    /// Apply overrides from `lookup`; blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(url) = value(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(token) = value(ENV_API_TOKEN) {
            self.auth_token = Some(token);
        }
        if let Some(timeout) = value(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = timeout
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds, got {:?}", ENV_TIMEOUT_SECS, timeout))?;
        }
        Ok(())
    }
}
