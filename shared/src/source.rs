//! Sources of raw OTLP log exports.
//!
//! The `LogSource` trait abstracts where an `ExportLogsServiceRequest` comes
//! from, allowing different implementations (HTTP endpoint, file on disk,
//! in-memory payload).

use crate::otlp::ExportLogsServiceRequest;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default timeout for HTTP fetches.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while fetching a logs export.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response was received.
    #[error("Failed to fetch logs from {url}: {source}")]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status.
    #[error("Logs endpoint {url} returned status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The payload is not a valid OTLP/JSON logs export.
    #[error("Failed to decode OTLP logs payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Trait for log export sources.
///
/// Implementations must be thread-safe (Send + Sync). A source performs a
/// single fetch per call and never retries.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetches and decodes one logs export.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be retrieved or decoded.
    async fn fetch(&self) -> Result<ExportLogsServiceRequest, SourceError>;

    /// Returns a human-readable description of where logs come from.
    fn describe(&self) -> String;
}

/// Fetches logs with `GET {base_url}/logs`.
#[derive(Debug, Clone)]
pub struct HttpLogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpLogSource {
    /// Creates a source for the logs API at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            url: format!("{}/logs", base_url.trim_end_matches('/')),
        })
    }

    /// Returns the full URL fetched by this source.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl LogSource for HttpLogSource {
    async fn fetch(&self) -> Result<ExportLogsServiceRequest, SourceError> {
        tracing::debug!(url = %self.url, "Fetching OTLP logs");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| SourceError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| SourceError::Request {
                url: self.url.clone(),
                source,
            })?;

        Ok(serde_json::from_slice(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads logs from an OTLP/JSON file.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    /// Creates a source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LogSource for FileLogSource {
    async fn fetch(&self) -> Result<ExportLogsServiceRequest, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a fixed, in-memory logs export.
#[derive(Debug, Clone, Default)]
pub struct StaticLogSource {
    request: ExportLogsServiceRequest,
}

impl StaticLogSource {
    /// Creates a source that always returns `request`.
    #[must_use]
    pub fn new(request: ExportLogsServiceRequest) -> Self {
        Self { request }
    }
}

#[async_trait]
impl LogSource for StaticLogSource {
    async fn fetch(&self) -> Result<ExportLogsServiceRequest, SourceError> {
        Ok(self.request.clone())
    }

    fn describe(&self) -> String {
        "in-memory payload".to_string()
    }
}

/// Picks a source for `location`: HTTP for `http://` and `https://` URLs,
/// a file path otherwise.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn source_for(location: &str, timeout: Duration) -> Result<Arc<dyn LogSource>, SourceError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpLogSource::new(location, timeout)?))
    } else {
        Ok(Arc::new(FileLogSource::new(location)))
    }
}
