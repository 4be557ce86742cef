//! Data models for Loglens.
//!
//! This module contains the normalized log view and the histogram types
//! derived from it.

pub mod histogram;
pub mod log;

pub use histogram::{BucketWidth, HistogramBin, ParseBucketWidthError};
pub use log::LogView;
