//! Client configuration for askbox.
//!
//! The configuration is resolved once by the binary (defaults, then an
//! optional JSON file, then command-line/env overrides) and passed
//! explicitly to the answer service and the UI.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Base address used when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base address of the answer service.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Path of the ask endpoint, appended to `api_base`.
    #[serde(default = "default_ask_path")]
    pub ask_path: String,

    /// Path of the document upload endpoint, appended to `api_base`.
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Transport timeout in seconds for a single request.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Name shown in the header and the welcome placeholder.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}

fn default_ask_path() -> String {
    "/ask".into()
}

fn default_upload_path() -> String {
    "/upload".into()
}

fn default_timeout() -> u64 {
    60
}

fn default_assistant_name() -> String {
    "JinggStack AI".into()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            ask_path: default_ask_path(),
            upload_path: default_upload_path(),
            timeout_seconds: default_timeout(),
            assistant_name: default_assistant_name(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Replace the base address, validating it first.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_base = api_base.into();
        self.validate()?;
        Ok(self)
    }

    /// Check that the base address is an absolute http(s) URL and the
    /// timeout is non-zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base)
            .map_err(|_| ConfigError::InvalidBaseUrl(self.api_base.clone()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl(self.api_base.clone()));
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_seconds));
        }
        Ok(())
    }

    /// Join the base address and an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Full URL of the ask endpoint.
    pub fn ask_url(&self) -> String {
        self.endpoint(&self.ask_path)
    }

    /// Full URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        self.endpoint(&self.upload_path)
    }

    /// Transport timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The base address is not an absolute http(s) URL.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// A zero timeout would fail every request immediately.
    #[error("Invalid timeout: {0}s (must be at least 1)")]
    InvalidTimeout(u64),
}
