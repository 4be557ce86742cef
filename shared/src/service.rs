//! The fetch-then-transform pipeline behind the dashboard.
//!
//! `LogsService` fetches one export from a [`LogSource`], converts it to
//! views exactly once, and hands the shared result to both the log table and
//! the histogram.

use crate::cache::SingleFlight;
use crate::histogram::{build_histogram_with_width, HistogramError};
use crate::models::{BucketWidth, HistogramBin, LogView};
use crate::otlp::conversions::{otlp_logs_to_views, IngestError};
use crate::source::{LogSource, SourceError};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in the logs pipeline.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The export could not be fetched or decoded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The export contained records that could not be converted.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// The histogram could not be built.
    #[error(transparent)]
    Histogram(HistogramError),
}

/// Fetches, converts, and caches OTLP logs.
pub struct LogsService {
    source: Arc<dyn LogSource>,
    views: SingleFlight<Vec<LogView>>,
}

impl LogsService {
    /// Creates a service reading from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn LogSource>) -> Self {
        Self {
            source,
            views: SingleFlight::new(),
        }
    }

    /// Returns all views, newest first.
    ///
    /// The first call fetches and converts the export; concurrent callers
    /// share that single fetch, and later callers get the cached result.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the conversion fails. Nothing is
    /// cached in that case.
    pub async fn views(&self) -> Result<Arc<Vec<LogView>>, ServiceError> {
        self.views
            .get_or_try_init(|| async move {
                tracing::info!(source = %self.source.describe(), "Loading OTLP logs");

                let request = self.source.fetch().await?;
                let records = request.record_count();
                let views = otlp_logs_to_views(request)?;

                tracing::info!(records, "Loaded OTLP logs");
                Ok::<_, ServiceError>(views)
            })
            .await
    }

    /// Returns the histogram of all views at the given bucket width.
    ///
    /// An empty log list has nothing to chart and yields no bins.
    ///
    /// # Errors
    ///
    /// Returns an error if loading the views fails or the time range needs
    /// too many bins.
    pub async fn histogram(&self, width: BucketWidth) -> Result<Vec<HistogramBin>, ServiceError> {
        let views = self.views().await?;

        match build_histogram_with_width(&views, width) {
            Ok(bins) => Ok(bins),
            Err(HistogramError::EmptyInput) => Ok(Vec::new()),
            Err(e) => Err(ServiceError::Histogram(e)),
        }
    }

    /// Drops cached views so the next access fetches again.
    pub fn invalidate(&self) {
        tracing::debug!(source = %self.source.describe(), "Invalidating cached logs");
        self.views.invalidate();
    }

    /// Returns a description of the underlying source.
    #[must_use]
    pub fn source_description(&self) -> String {
        self.source.describe()
    }
}
