// ============================================
// File: crates/hubcast-client/src/config.rs
// ============================================
//! # Client Configuration
//!
//! ## Creation Reason
//! Provides configuration management for the submission client,
//! supporting TOML files with per-field defaults.
//!
//! ## Main Functionality
//! - `SubmitConfig`: timeout/retry tunables for a single hub client
//! - `HubEndpoint`: one prioritized hub in the failover set
//! - `ClientConfig`: top-level structure loaded by the CLI
//!
//! ## Example Configuration
//! ```toml
//! [submit]
//! request_timeout_secs = 10
//! max_retries = 3
//! retry_delay_ms = 1000
//!
//! [[hubs]]
//! url = "https://hub-a.example.com"
//! priority = 1
//! region = "us-east"
//!
//! [[hubs]]
//! url = "https://hub-b.example.com"
//! priority = 2
//!
//! [logging]
//! level = "info"
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Configuration is read once at construction; clients never re-read
//!   environment or module state at call time
//! - Validate before constructing clients - a zero timeout disables
//!   request bounding entirely
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ClientError, Result};

// ============================================
// SubmitConfig
// ============================================

/// Tunables for a single hub submission client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum retry attempts after the initial try.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay between retries; attempt `n` waits `n * retry_delay_ms`.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl SubmitConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(ClientError::config(
                "submit.request_timeout_secs",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

// ============================================
// HubEndpoint
// ============================================

/// One hub in a prioritized endpoint set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubEndpoint {
    /// Base URL of the hub HTTP API.
    pub url: String,

    /// Selection priority; lower is preferred.
    #[serde(default = "default_priority")]
    pub priority: u32,

    /// Optional operator region label, for logs and dashboards.
    #[serde(default)]
    pub region: Option<String>,
}

fn default_priority() -> u32 {
    1
}

impl HubEndpoint {
    /// Creates an endpoint with the given URL and priority.
    #[must_use]
    pub fn new(url: impl Into<String>, priority: u32) -> Self {
        Self {
            url: url.into(),
            priority,
            region: None,
        }
    }

    /// Validates the endpoint.
    pub fn validate(&self) -> Result<()> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ClientError::config(
                "hubs.url",
                format!("'{}' is not an http(s) URL", self.url),
            ));
        }
        Ok(())
    }
}

// ============================================
// LoggingConfig
// ============================================

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============================================
// ClientConfig
// ============================================

/// Top-level client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// Prioritized hub endpoints.
    #[serde(default)]
    pub hubs: Vec<HubEndpoint>,

    /// Submission tunables.
    #[serde(default)]
    pub submit: SubmitConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or the
    /// parsed configuration fails validation.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!("Loading configuration from: {}", path_str);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ClientError::config(path_str.clone(), e.to_string()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ClientError::config(path_str, e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a string (useful for testing).
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ClientError::config("<string>", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.hubs.is_empty() {
            return Err(ClientError::config("hubs", "at least one hub is required"));
        }
        for hub in &self.hubs {
            hub.validate()?;
        }
        self.submit.validate()?;
        Ok(())
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SubmitConfig::default();
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay_ms, 1000);
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r#"
            [submit]
            request_timeout_secs = 5
            max_retries = 2
            retry_delay_ms = 250

            [[hubs]]
            url = "https://hub-a.example.com"
            priority = 1
            region = "us-east"

            [[hubs]]
            url = "https://hub-b.example.com"
            priority = 2

            [logging]
            level = "debug"
        "#;

        let config = ClientConfig::from_str(toml).unwrap();
        assert_eq!(config.hubs.len(), 2);
        assert_eq!(config.hubs[0].region.as_deref(), Some("us-east"));
        assert_eq!(config.hubs[1].priority, 2);
        assert_eq!(config.submit.max_retries, 2);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_hubs_rejected() {
        let toml = r#"
            [submit]
            max_retries = 1
        "#;
        assert!(ClientConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_bad_url_rejected() {
        let toml = r#"
            [[hubs]]
            url = "hub-a.example.com"
        "#;
        assert!(ClientConfig::from_str(toml).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let toml = r#"
            [submit]
            request_timeout_secs = 0

            [[hubs]]
            url = "https://hub.example.com"
        "#;
        assert!(ClientConfig::from_str(toml).is_err());
    }
}
