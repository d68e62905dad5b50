//! Application configuration
//!
//! Settings for the card API connection and the throttler, loadable from a
//! YAML file. Every field has a default, so an empty file is valid.
//!
//! ```yaml
//! api:
//!   base_url: "https://api.magicthegathering.io/v1"
//!   timeout_secs: 30
//!   quota_per_hour: 5000
//! throttle:
//!   max_burst: 3
//!   tick_interval_ms: 1000
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::fetcher::DEFAULT_BASE_URL;
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::throttle::ThrottleConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration for a harvest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Card API connection
    pub api: ApiConfig,
    /// Burst scheduling
    pub throttle: ThrottleConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            read => read.with_context(|| {
                format!("Failed to read config file '{}'", path.display())
            })?,
        };
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Check the configuration before a run
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.throttle.validate()
    }

    /// HTTP client settings for the card API
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.api.base_url)
            .timeout(Duration::from_secs(self.api.timeout_secs));

        if let Some(agent) = &self.api.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(quota) = self.api.quota_per_hour {
            builder = builder.rate_limit(RateLimiterConfig {
                requests_per_hour: quota,
                ..RateLimiterConfig::provider_quota()
            });
        }

        builder.build()
    }
}

// ============================================================================
// API Config
// ============================================================================

/// Card API connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without the `/cards` path
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User agent override
    pub user_agent: Option<String>,
    /// Client-side requests-per-hour guard; unset leaves pacing to the throttler
    pub quota_per_hour: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: None,
            quota_per_hour: None,
        }
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("api.base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api.base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "api.timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.quota_per_hour == Some(0) {
            return Err(Error::invalid_value(
                "api.quota_per_hour",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
