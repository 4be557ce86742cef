//! Normalized log model.
//!
//! Defines `LogView`, the flat, display-ready form of one OTLP log record.

use crate::otlp::LogRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A log record flattened for display.
///
/// Produced by [`crate::otlp::conversions::otlp_logs_to_views`]. The original record is
/// kept behind an `Arc` so views can be cloned and shared between readers
/// without copying the record.
///
/// # Example
///
/// ```
/// use shared::models::LogView;
/// use shared::otlp::{AnyValue, LogRecord};
/// use chrono::DateTime;
///
/// let record = LogRecord::new("1700000000000000000").with_body(AnyValue::string("ready"));
/// let view = LogView::new(DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(), record)
///     .with_body("ready");
///
/// assert_eq!(view.time_millis(), 1_700_000_000_000);
/// assert_eq!(view.body, "ready");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogView {
    /// Event time at millisecond precision.
    pub time: DateTime<Utc>,

    /// Severity text as reported by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Body rendered as text.
    pub body: String,

    /// The record this view was built from.
    pub raw: Arc<LogRecord>,
}

impl LogView {
    /// Creates a view with an empty body and no severity.
    #[must_use]
    pub fn new(time: DateTime<Utc>, raw: impl Into<Arc<LogRecord>>) -> Self {
        Self {
            time,
            severity: None,
            body: String::new(),
            raw: raw.into(),
        }
    }

    /// Sets the severity.
    #[must_use]
    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = Some(severity.into());
        self
    }

    /// Sets the body text.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the event time as milliseconds since the Unix epoch.
    #[must_use]
    pub fn time_millis(&self) -> i64 {
        self.time.timestamp_millis()
    }
}
