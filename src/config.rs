//! Configuration loading for the `huginn` CLI.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.huginn/config.toml` (user)
//! 3. `/etc/huginn/config.toml` (system)
//!
//! When none exists the built-in defaults apply.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::client::{DEFAULT_REQUEST_TIMEOUT, Huginn, HuginnBuilder};
use crate::deployment::DEVELOPMENT_HOST;
use crate::endpoint::{EndpointConfig, PROBE_TIMEOUT};
use crate::retry::RetryConfig;
use crate::{HuginnError, Result};

/// Client configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub deployment: DeploymentSection,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub timeouts: TimeoutsSection,
}

/// Host the client pretends to run on.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentSection {
    /// Hostname used for deployment detection (default: localhost).
    #[serde(default = "default_hostname")]
    pub hostname: String,
}

impl Default for DeploymentSection {
    fn default() -> Self {
        Self {
            hostname: default_hostname(),
        }
    }
}

fn default_hostname() -> String {
    DEVELOPMENT_HOST.to_string()
}

/// Retry policy.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySection {
    /// Attempts per request, including the first (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Linear backoff unit in milliseconds (default: 1000).
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    RetryConfig::default().max_attempts
}

fn default_base_delay_ms() -> u64 {
    RetryConfig::default().base_delay.as_millis() as u64
}

/// Response cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Entry time-to-live in seconds (default: 300).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    CacheConfig::default().ttl.as_secs()
}

/// Network timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeoutsSection {
    /// Per-attempt request timeout in seconds (default: 10).
    #[serde(default = "default_request_timeout_secs")]
    pub request_secs: u64,
    /// Health probe timeout in seconds (default: 3).
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_secs: u64,
}

impl Default for TimeoutsSection {
    fn default() -> Self {
        Self {
            request_secs: default_request_timeout_secs(),
            probe_secs: default_probe_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_probe_timeout_secs() -> u64 {
    PROBE_TIMEOUT.as_secs()
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path must exist. Without one, the first of
    /// `~/.huginn/config.toml` and `/etc/huginn/config.toml` is used, or
    /// the defaults when neither exists.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HuginnError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            HuginnError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(HuginnError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".huginn").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/huginn/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    /// A client builder carrying every setting from this file.
    pub fn builder(&self) -> HuginnBuilder {
        Huginn::builder()
            .endpoints(self.endpoints.clone())
            .hostname(&self.deployment.hostname)
            .retry(
                RetryConfig::new()
                    .max_attempts(self.retry.max_attempts)
                    .base_delay(Duration::from_millis(self.retry.base_delay_ms)),
            )
            .cache(CacheConfig::new().ttl(Duration::from_secs(self.cache.ttl_secs)))
            .request_timeout(Duration::from_secs(self.timeouts.request_secs))
            .probe_timeout(Duration::from_secs(self.timeouts.probe_secs))
    }
}
