//! Client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Whether the server's board snapshot can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BoardSource {
    /// Use `board.squares` from the payload as-is.
    Authoritative,
    /// Ignore the snapshot and replay the turn log.
    #[default]
    Reconstructed,
}

/// Configuration for a [`GameClient`](crate::GameClient).
///
/// Passed explicitly to the client; nothing is read from the environment
/// unless [`ClientConfig::from_env`] is called.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_", into)]
#[serde(default)]
pub struct ClientConfig {
    /// Service root, without trailing slash.
    base_url: String,
    /// Per-request bound in milliseconds.
    timeout_ms: u64,
    /// Log raw payloads.
    debug: bool,
    /// How boards are obtained from fetched payloads.
    board_source: BoardSource,
}

/// Public gotak service.
pub const DEFAULT_BASE_URL: &str = "https://gotak.app";

/// Default per-request bound.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            debug: false,
            board_source: BoardSource::default(),
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for a service root with default settings.
    #[instrument(skip(base_url))]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::default().with_base_url(base_url)
    }

    /// Per-request bound.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(base_url = %config.base_url, "Config loaded successfully");
        Ok(config)
    }

    /// Builds configuration from `GOTAK_API_URL`, `GOTAK_TIMEOUT_MS` and
    /// `GOTAK_DEBUG`, falling back to defaults for unset variables.
    #[instrument]
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("GOTAK_API_URL") {
            config.base_url = url;
        }
        if let Ok(timeout) = std::env::var("GOTAK_TIMEOUT_MS") {
            config.timeout_ms = timeout.parse().map_err(|e| {
                ConfigError::new(format!("GOTAK_TIMEOUT_MS is not a number: {}", e))
            })?;
        }
        if let Ok(flag) = std::env::var("GOTAK_DEBUG") {
            config.debug = matches!(flag.as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        debug!(?config, "Config built from environment");
        Ok(config)
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::new(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::new("timeout_ms must be positive"));
        }
        Ok(())
    }

    /// `base_url` with any trailing slash removed.
    pub(crate) fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
