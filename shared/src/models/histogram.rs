//! Histogram data model.
//!
//! Defines the fixed bucket widths and the bins produced by the histogram
//! aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Width of a histogram bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketWidth {
    /// 1 minute buckets.
    #[serde(alias = "1m")]
    OneMinute,
    /// 5 minute buckets.
    #[serde(alias = "5m")]
    FiveMinutes,
    /// 1 hour buckets.
    #[serde(alias = "1h")]
    OneHour,
    /// 1 day buckets (86,400,000 ms).
    #[default]
    #[serde(alias = "1d")]
    OneDay,
}

impl BucketWidth {
    /// Returns the duration of this width.
    #[must_use]
    pub const fn as_duration(&self) -> Duration {
        match self {
            Self::OneMinute => Duration::from_secs(60),
            Self::FiveMinutes => Duration::from_secs(300),
            Self::OneHour => Duration::from_secs(3600),
            Self::OneDay => Duration::from_secs(86400),
        }
    }

    /// Returns the width in milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.as_duration().as_secs() as i64 * 1000
    }

    /// Returns the configuration name of this width.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "one_minute",
            Self::FiveMinutes => "five_minutes",
            Self::OneHour => "one_hour",
            Self::OneDay => "one_day",
        }
    }
}

impl std::fmt::Display for BucketWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a bucket width name is not recognized.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown histogram interval '{0}', expected one of: one_minute, five_minutes, one_hour, one_day")]
pub struct ParseBucketWidthError(pub String);

impl FromStr for BucketWidth {
    type Err = ParseBucketWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one_minute" | "1m" => Ok(Self::OneMinute),
            "five_minutes" | "5m" => Ok(Self::FiveMinutes),
            "one_hour" | "1h" => Ok(Self::OneHour),
            "one_day" | "1d" => Ok(Self::OneDay),
            _ => Err(ParseBucketWidthError(s.to_string())),
        }
    }
}

/// One histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive start of the bucket.
    pub bucket_start: DateTime<Utc>,

    /// Number of entries whose time falls in the bucket.
    pub count: u64,
}

impl HistogramBin {
    /// Creates an empty bin starting at `bucket_start`.
    #[must_use]
    pub const fn empty(bucket_start: DateTime<Utc>) -> Self {
        Self {
            bucket_start,
            count: 0,
        }
    }
}
