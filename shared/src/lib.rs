//! Loglens Shared Library
//!
//! This crate turns OTLP log exports into the flat, time-ordered log list and
//! the volume histogram shown by the Loglens dashboard and CLI.
//!
//! # Modules
//!
//! - [`otlp`] - OTLP/JSON export types and conversion to log views
//! - [`normalize`] - Rendering of `AnyValue` bodies as text
//! - [`histogram`] - Fixed-width time bucketing of log views
//! - [`models`] - Log view and histogram data models
//! - [`source`] - Where raw exports come from (HTTP, file, memory)
//! - [`cache`] - Single-flight memoization
//! - [`service`] - The fetch-then-transform pipeline
//!
//! # Example
//!
//! ```
//! use shared::histogram::build_histogram;
//! use shared::otlp::conversions::otlp_logs_to_views;
//! use shared::otlp::ExportLogsServiceRequest;
//!
//! let request: ExportLogsServiceRequest = serde_json::from_str(r#"{
//!     "resourceLogs": [{ "scopeLogs": [{ "logRecords": [
//!         { "timeUnixNano": "5000000000", "body": { "boolValue": true } },
//!         { "timeUnixNano": "5000000000", "body": { "intValue": "42" } }
//!     ]}]}]
//! }"#).unwrap();
//!
//! let views = otlp_logs_to_views(request).unwrap();
//! let bins = build_histogram(&views).unwrap();
//!
//! assert_eq!(bins.len(), 1);
//! assert_eq!(bins[0].count, 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cache;
pub mod histogram;
pub mod models;
pub mod normalize;
pub mod otlp;
pub mod service;
pub mod source;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
