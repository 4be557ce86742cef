//! Conversions from OTLP log exports to Loglens views.
//!
//! Flattens the resource/scope/record tree of an `ExportLogsServiceRequest`
//! into a list of [`LogView`]s sorted newest first.

use crate::models::LogView;
use crate::normalize::any_value_to_display;
use crate::otlp::{ExportLogsServiceRequest, LogRecord, UnixNanos};
use chrono::{DateTime, Utc};
use std::num::ParseIntError;
use std::sync::Arc;
use thiserror::Error;

const NANOS_PER_MILLI: u64 = 1_000_000;

/// Errors that can occur while converting log records.
///
/// `index` is the position of the offending record in the flattened tree.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Neither `timeUnixNano` nor `observedTimeUnixNano` is set.
    #[error("Log record {index} has no timeUnixNano or observedTimeUnixNano")]
    MissingTimestamp {
        /// Record position.
        index: usize,
    },

    /// The timestamp is not a non-negative integer.
    #[error("Log record {index} has invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        /// Record position.
        index: usize,
        /// The timestamp as received.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The timestamp cannot be represented as a date.
    #[error("Log record {index} timestamp {nanos}ns is out of range")]
    TimestampOutOfRange {
        /// Record position.
        index: usize,
        /// The parsed timestamp.
        nanos: u64,
    },
}

/// Converts an OTLP timestamp in nanoseconds to a millisecond-precision `DateTime<Utc>`.
///
/// Sub-millisecond digits are truncated.
#[must_use]
pub fn nanos_to_datetime(nanos: u64) -> Option<DateTime<Utc>> {
    let millis = i64::try_from(nanos / NANOS_PER_MILLI).ok()?;
    DateTime::from_timestamp_millis(millis)
}

/// Resolves the event time of a log record.
///
/// Uses `timeUnixNano` and falls back to `observedTimeUnixNano` when the
/// event time is absent.
///
/// # Errors
///
/// Returns an error if neither timestamp is present, or if the chosen one
/// does not parse as an integer.
pub fn record_time(index: usize, record: &LogRecord) -> Result<DateTime<Utc>, IngestError> {
    let raw: &UnixNanos = record
        .time_unix_nano
        .as_ref()
        .or(record.observed_time_unix_nano.as_ref())
        .ok_or(IngestError::MissingTimestamp { index })?;

    let nanos = raw.parse().map_err(|source| IngestError::InvalidTimestamp {
        index,
        value: raw.to_string(),
        source,
    })?;

    nanos_to_datetime(nanos).ok_or(IngestError::TimestampOutOfRange { index, nanos })
}

/// Converts one OTLP `LogRecord` to a `LogView`.
///
/// The record is moved into the view unchanged.
///
/// # Errors
///
/// Returns an error if the record's timestamp cannot be resolved.
pub fn otlp_log_to_view(index: usize, record: LogRecord) -> Result<LogView, IngestError> {
    let time = record_time(index, &record)?;
    let body = any_value_to_display(record.body.as_ref());
    let severity = record.severity_text.clone();

    Ok(LogView {
        time,
        severity,
        body,
        raw: Arc::new(record),
    })
}

/// Sorts views by time, newest first.
pub fn sort_newest_first(views: &mut [LogView]) {
    views.sort_by(|a, b| b.time.cmp(&a.time));
}

/// Flattens an OTLP logs export into views sorted newest first.
///
/// Resources without `scopeLogs` and scopes without `logRecords` contribute
/// nothing. Records are neither filtered nor deduplicated.
///
/// # Errors
///
/// Returns an error on the first record whose timestamp cannot be resolved.
///
/// # Example
///
/// ```
/// use shared::otlp::conversions::otlp_logs_to_views;
/// use shared::otlp::ExportLogsServiceRequest;
///
/// let request: ExportLogsServiceRequest = serde_json::from_str(r#"{
///     "resourceLogs": [{ "scopeLogs": [{ "logRecords": [
///         { "timeUnixNano": "1000000", "body": { "stringValue": "first" } },
///         { "timeUnixNano": "2000000", "body": { "stringValue": "second" } }
///     ]}]}]
/// }"#).unwrap();
///
/// let views = otlp_logs_to_views(request).unwrap();
/// assert_eq!(views[0].body, "second");
/// assert_eq!(views[1].time_millis(), 1);
/// ```
pub fn otlp_logs_to_views(request: ExportLogsServiceRequest) -> Result<Vec<LogView>, IngestError> {
    let Some(resource_logs) = request.resource_logs else {
        tracing::debug!("Export request has no resourceLogs");
        return Ok(Vec::new());
    };

    let records = resource_logs
        .into_iter()
        .flat_map(|resource| resource.scope_logs.unwrap_or_default())
        .flat_map(|scope| scope.log_records.unwrap_or_default());

    let mut views = Vec::new();
    for (index, record) in records.enumerate() {
        views.push(otlp_log_to_view(index, record)?);
    }

    sort_newest_first(&mut views);

    tracing::debug!(count = views.len(), "Converted OTLP log records");
    Ok(views)
}

#[cfg(test)]
#[path = "conversions_test.rs"]
mod conversions_test;
