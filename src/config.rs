//! Configuration loading and constants.
//!
//! Loads application configuration from TOML files and defines the defaults
//! used when no file is present. `AppConfig` is the root configuration struct
//! containing all settings.

use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;

// =============================================================================
// HTTP Response Cache Control
// =============================================================================

/// Payment outcomes and liveness answers must never be served from a cache
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Payment Token Limits
// =============================================================================

/// Smallest accepted token size in random bytes
pub const MIN_TOKEN_BYTES: usize = 8;

/// Largest accepted token size in random bytes
pub const MAX_TOKEN_BYTES: usize = 64;

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "payments=debug,tower_http=debug";

/// Response header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Payment processing behaviour
    #[serde(default)]
    pub payments: PaymentsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Grace period for in-flight requests after a shutdown signal
    #[serde(default = "HttpServerConfig::default_shutdown_timeout")]
    pub shutdown_timeout_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_timeout_seconds: Self::default_shutdown_timeout(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_shutdown_timeout() -> u64 {
        30
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| {
                ConfigError::Validation(format!(
                    "Invalid http.host or http.port ({}:{}): {}",
                    self.host, self.port, e
                ))
            })
    }
}

/// How a valid payment request is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessingMode {
    /// Every valid request is created
    #[default]
    AlwaysApprove,
    /// Every valid request is approved or declined with equal probability
    CoinFlip,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsConfig {
    #[serde(default)]
    pub mode: ProcessingMode,
    /// Random bytes per payment id (default: 10, i.e. 20 hex characters)
    #[serde(default = "PaymentsConfig::default_token_bytes")]
    pub token_bytes: usize,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            mode: ProcessingMode::default(),
            token_bytes: Self::default_token_bytes(),
        }
    }
}

impl PaymentsConfig {
    fn default_token_bytes() -> usize {
        10
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// Structured, one JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load an explicitly requested file, or the default path when it exists.
    ///
    /// Without an explicit path and without a file at [`DEFAULT_CONFIG_PATH`]
    /// the built-in defaults are used; the service has no mandatory settings.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bytes = self.payments.token_bytes;
        if !(MIN_TOKEN_BYTES..=MAX_TOKEN_BYTES).contains(&bytes) {
            return Err(ConfigError::Validation(format!(
                "payments.token_bytes must be between {} and {}, got {}",
                MIN_TOKEN_BYTES, MAX_TOKEN_BYTES, bytes
            )));
        }

        self.http.bind_addr()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
