//! OpenTelemetry Protocol (OTLP) log export types.
//!
//! These types follow the OTLP/JSON encoding of `ExportLogsServiceRequest`:
//! camelCase keys, 64-bit integers encoded as strings, and every level of the
//! resource/scope/record tree optional.
//!
//! # Example
//!
//! ```
//! use shared::otlp::logs::ExportLogsServiceRequest;
//!
//! let json = r#"{
//!     "resourceLogs": [{
//!         "scopeLogs": [{
//!             "logRecords": [{
//!                 "timeUnixNano": "1700000000000000000",
//!                 "severityText": "INFO",
//!                 "body": { "stringValue": "User logged in" }
//!             }]
//!         }]
//!     }]
//! }"#;
//!
//! let request: ExportLogsServiceRequest = serde_json::from_str(json).unwrap();
//! assert_eq!(request.record_count(), 1);
//! ```

pub mod common;
pub mod conversions;
pub mod logs;

pub use common::{AnyValue, ArrayValue, DoubleValue, IntValue, KeyValue, KeyValueList};
pub use logs::{
    ExportLogsServiceRequest, InstrumentationScope, LogRecord, Resource, ResourceLogs, ScopeLogs,
    UnixNanos,
};
