#![deny(unsafe_code)]

//! Configuration loading and validation for Scratchlight.
//!
//! Loads TOML configuration files and validates them against expected schemas.
//! Provides the [`AppConfig`] type as the central configuration structure
//! shared by the CLI and TUI front ends.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote wiki API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Search behaviour configuration.
    #[serde(default)]
    pub search: SearchConfig,

    /// Spotlight rotation configuration.
    #[serde(default)]
    pub spotlight: SpotlightConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration for the remote wiki API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the MediaWiki-compatible `api.php` endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_endpoint() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("scratchlight/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Search behaviour configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result limit used to seed the TUI limit field. The value entered by
    /// the user is still clamped to the supported range at search time.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> u32 {
    10
}

/// Spotlight rotation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotlightConfig {
    /// Milliseconds between rotation ticks.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    2600
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.endpoint.is_empty() {
            return Err(ConfigError::Validation(
                "api.endpoint must not be empty".to_string(),
            ));
        }
        if !self.api.endpoint.starts_with("http://") && !self.api.endpoint.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "api.endpoint must be an http(s) URL, got {:?}",
                self.api.endpoint
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.api.user_agent.is_empty() {
            return Err(ConfigError::Validation(
                "api.user_agent must not be empty".to_string(),
            ));
        }
        if self.search.default_limit == 0 {
            return Err(ConfigError::Validation(
                "search.default_limit must be non-zero".to_string(),
            ));
        }
        if self.spotlight.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "spotlight.interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
