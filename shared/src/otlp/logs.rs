//! OTLP log export tree: resources, scopes, and log records.

use super::common::{AnyValue, KeyValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::num::ParseIntError;

/// Nanoseconds since the Unix epoch, as sent on the wire.
///
/// OTLP/JSON encodes `fixed64` timestamps as decimal strings to avoid
/// precision loss in JSON numbers. Plain numbers are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UnixNanos {
    /// Timestamp sent as a JSON number.
    Number(u64),
    /// Timestamp sent as a JSON string.
    Text(String),
}

impl UnixNanos {
    /// Parses the timestamp into an integer count of nanoseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the string form is not a non-negative integer.
    pub fn parse(&self) -> Result<u64, ParseIntError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s.trim().parse::<u64>(),
        }
    }
}

impl std::fmt::Display for UnixNanos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for UnixNanos {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for UnixNanos {
    fn from(value: u64) -> Self {
        Self::Text(value.to_string())
    }
}

/// Body of a logs export request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportLogsServiceRequest {
    /// Logs grouped by originating resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_logs: Option<Vec<ResourceLogs>>,
}

impl ExportLogsServiceRequest {
    /// Returns the total number of log records in the tree.
    ///
    /// Absent `resourceLogs`, `scopeLogs` or `logRecords` count as zero.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.resource_logs
            .iter()
            .flatten()
            .flat_map(|resource| resource.scope_logs.iter().flatten())
            .map(|scope| scope.log_records.as_ref().map_or(0, Vec::len))
            .sum()
    }
}

/// Logs emitted by a single resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLogs {
    /// The resource the logs originate from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,

    /// Logs grouped by instrumentation scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_logs: Option<Vec<ScopeLogs>>,

    /// Schema URL of the resource data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

/// Entity producing telemetry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Resource attributes such as `service.name`.
    #[serde(default)]
    pub attributes: Vec<KeyValue>,

    /// Number of attributes dropped by the exporter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropped_attributes_count: Option<u32>,
}

/// Logs emitted by a single instrumentation scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeLogs {
    /// The instrumentation scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<InstrumentationScope>,

    /// The log records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_records: Option<Vec<LogRecord>>,

    /// Schema URL of the scope data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_url: Option<String>,
}

/// Library or component that emitted the logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentationScope {
    /// Scope name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Scope version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Scope attributes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<KeyValue>,
}

/// A single OTLP log record.
///
/// Fields this type does not model are kept in `extra` so the record
/// serializes back to what was received. A field other than the two
/// timestamps whose JSON has the wrong shape is treated as absent, and its
/// original JSON moves to `extra` under the same key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireLogRecord")]
pub struct LogRecord {
    /// Time the event occurred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unix_nano: Option<UnixNanos>,

    /// Time the event was observed by the collection system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_time_unix_nano: Option<UnixNanos>,

    /// Numerical severity (1-24).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_number: Option<i32>,

    /// Severity as reported by the source, e.g. `"ERROR"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_text: Option<String>,

    /// The log body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<AnyValue>,

    /// Record attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<KeyValue>>,

    /// Number of attributes dropped by the exporter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropped_attributes_count: Option<u32>,

    /// W3C trace flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,

    /// Hex-encoded trace ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,

    /// Hex-encoded span ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,

    /// Unmodelled and malformed fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `LogRecord` as decoded from JSON, before shape checks.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireLogRecord {
    #[serde(default)]
    time_unix_nano: Option<UnixNanos>,
    #[serde(default)]
    observed_time_unix_nano: Option<UnixNanos>,
    #[serde(default)]
    severity_number: Option<Value>,
    #[serde(default)]
    severity_text: Option<Value>,
    #[serde(default)]
    body: Option<Value>,
    #[serde(default)]
    attributes: Option<Value>,
    #[serde(default)]
    dropped_attributes_count: Option<Value>,
    #[serde(default)]
    flags: Option<Value>,
    #[serde(default)]
    trace_id: Option<Value>,
    #[serde(default)]
    span_id: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<WireLogRecord> for LogRecord {
    fn from(wire: WireLogRecord) -> Self {
        let mut extra = wire.extra;
        let severity_number = lenient("severityNumber", wire.severity_number, &mut extra);
        let severity_text = lenient("severityText", wire.severity_text, &mut extra);
        let body = lenient("body", wire.body, &mut extra);
        let attributes = lenient("attributes", wire.attributes, &mut extra);
        let dropped_attributes_count =
            lenient("droppedAttributesCount", wire.dropped_attributes_count, &mut extra);
        let flags = lenient("flags", wire.flags, &mut extra);
        let trace_id = lenient("traceId", wire.trace_id, &mut extra);
        let span_id = lenient("spanId", wire.span_id, &mut extra);

        Self {
            time_unix_nano: wire.time_unix_nano,
            observed_time_unix_nano: wire.observed_time_unix_nano,
            severity_number,
            severity_text,
            body,
            attributes,
            dropped_attributes_count,
            flags,
            trace_id,
            span_id,
            extra,
        }
    }
}

/// Decodes `value` as `T`, or parks it in `extra` under `key` if the shape is wrong.
fn lenient<T: DeserializeOwned>(
    key: &str,
    value: Option<Value>,
    extra: &mut Map<String, Value>,
) -> Option<T> {
    let value = value?;
    match T::deserialize(&value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!(field = key, error = %e, "Ignoring malformed log record field");
            extra.insert(key.to_string(), value);
            None
        }
    }
}

impl LogRecord {
    /// Creates a record with the given event time.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::otlp::{AnyValue, LogRecord};
    ///
    /// let record = LogRecord::new("1700000000000000000")
    ///     .with_severity_text("WARN")
    ///     .with_body(AnyValue::string("disk almost full"));
    ///
    /// assert_eq!(record.severity_text.as_deref(), Some("WARN"));
    /// ```
    #[must_use]
    pub fn new(time_unix_nano: impl Into<UnixNanos>) -> Self {
        Self {
            time_unix_nano: Some(time_unix_nano.into()),
            ..Self::default()
        }
    }

    /// Sets the severity text.
    #[must_use]
    pub fn with_severity_text(mut self, severity: impl Into<String>) -> Self {
        self.severity_text = Some(severity.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: AnyValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the observed time.
    #[must_use]
    pub fn with_observed_time(mut self, observed: impl Into<UnixNanos>) -> Self {
        self.observed_time_unix_nano = Some(observed.into());
        self
    }
}
