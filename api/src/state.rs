//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::config::Config;
use anyhow::Result;
use shared::models::BucketWidth;
use shared::service::LogsService;
use shared::source::{HttpLogSource, LogSource, StaticLogSource};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Cloning is cheap; all clones share the same cached logs.
#[derive(Clone)]
pub struct AppState {
    /// The logs pipeline.
    logs: Arc<LogsService>,
    /// Histogram bucket width used when a request does not name one.
    histogram_interval: BucketWidth,
}

impl AppState {
    /// Creates a new application state reading logs from `source`.
    pub fn new(source: Arc<dyn LogSource>, histogram_interval: BucketWidth) -> Self {
        Self {
            logs: Arc::new(LogsService::new(source)),
            histogram_interval,
        }
    }

    /// Creates the application state described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client for the logs API cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpLogSource::new(&config.logs_api, config.fetch_timeout)?;
        Ok(Self::new(Arc::new(source), config.histogram_interval))
    }

    /// Creates an application state serving a fixed in-memory export.
    ///
    /// This is useful for development and testing.
    #[must_use]
    pub fn with_static_source(source: StaticLogSource) -> Self {
        Self::new(Arc::new(source), BucketWidth::default())
    }

    /// Returns the logs pipeline.
    #[must_use]
    pub fn logs(&self) -> &LogsService {
        self.logs.as_ref()
    }

    /// Returns the default histogram bucket width.
    #[must_use]
    pub fn histogram_interval(&self) -> BucketWidth {
        self.histogram_interval
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_static_source(StaticLogSource::default())
    }
}
