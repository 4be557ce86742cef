//! Server configuration module.
//!
//! Handles loading configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use shared::models::BucketWidth;
use shared::source::DEFAULT_FETCH_TIMEOUT;
use std::net::SocketAddr;
use std::time::Duration;

/// Server configuration.
///
/// Configuration values can be set via environment variables:
/// - `LOGLENS_HOST`: The host address to bind to (default: "0.0.0.0")
/// - `LOGLENS_PORT`: The port to listen on (default: 8080)
/// - `LOGLENS_LOGS_API`: Base URL of the logs API; logs are fetched from `{url}/logs`
///   (default: `http://localhost:4318`)
/// - `LOGLENS_HISTOGRAM_INTERVAL`: Histogram bucket width (default: `one_day`)
/// - `LOGLENS_FETCH_TIMEOUT_SECS`: Timeout for fetching logs (default: 30)
#[derive(Debug, Clone)]
pub struct Config {
    /// The host address to bind to.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Base URL of the logs API.
    pub logs_api: String,
    /// Default histogram bucket width.
    pub histogram_interval: BucketWidth,
    /// Timeout for fetching logs.
    pub fetch_timeout: Duration,
}

impl Config {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Creates a configuration from a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = lookup("LOGLENS_HOST").unwrap_or(defaults.host);

        let port = lookup("LOGLENS_PORT")
            .map(|p| p.parse::<u16>())
            .transpose()
            .context("LOGLENS_PORT must be a valid port number")?
            .unwrap_or(defaults.port);

        let logs_api = lookup("LOGLENS_LOGS_API").unwrap_or(defaults.logs_api);

        let histogram_interval = lookup("LOGLENS_HISTOGRAM_INTERVAL")
            .map(|i| i.parse::<BucketWidth>())
            .transpose()?
            .unwrap_or(defaults.histogram_interval);

        let fetch_timeout = lookup("LOGLENS_FETCH_TIMEOUT_SECS")
            .map(|s| s.parse::<u64>().map(Duration::from_secs))
            .transpose()
            .context("LOGLENS_FETCH_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(defaults.fetch_timeout);

        Ok(Self {
            host,
            port,
            logs_api,
            histogram_interval,
            fetch_timeout,
        })
    }

    /// Returns the socket address for binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the host and port do not form a valid socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            logs_api: "http://localhost:4318".to_string(),
            histogram_interval: BucketWidth::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
