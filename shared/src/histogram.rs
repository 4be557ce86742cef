//! Fixed-width histogram of log volume over time.
//!
//! Buckets are anchored at the earliest entry and advance by a fixed width,
//! independent of calendar boundaries.

use crate::models::{BucketWidth, HistogramBin, LogView};
use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

/// Upper bound on the number of bins a single histogram may allocate.
pub const MAX_BINS: usize = 100_000;

/// Errors that can occur while building a histogram.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistogramError {
    /// No entries were given.
    #[error("Cannot build a histogram from zero log entries")]
    EmptyInput,

    /// The time range needs more bins than allowed at this width.
    #[error("Time range needs {bins} bins at {width} width, limit is {limit}", limit = MAX_BINS)]
    TooManyBins {
        /// Bins required.
        bins: u64,
        /// Requested width.
        width: BucketWidth,
    },
}

/// Builds a histogram with one-day buckets.
///
/// # Errors
///
/// Returns [`HistogramError::EmptyInput`] if `views` is empty.
///
/// # Example
///
/// ```
/// use shared::histogram::build_histogram;
/// use shared::models::LogView;
/// use shared::otlp::LogRecord;
/// use chrono::DateTime;
///
/// let views: Vec<LogView> = [86_400_000, 0]
///     .into_iter()
///     .map(|ms| LogView::new(DateTime::from_timestamp_millis(ms).unwrap(), LogRecord::default()))
///     .collect();
///
/// let bins = build_histogram(&views).unwrap();
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[0].count, 1);
/// assert_eq!(bins[1].count, 1);
/// ```
pub fn build_histogram(views: &[LogView]) -> Result<Vec<HistogramBin>, HistogramError> {
    build_histogram_with_width(views, BucketWidth::OneDay)
}

/// Builds a histogram with buckets of the given width.
///
/// Views are expected newest first, as produced by the OTLP conversions, but
/// the range is taken from the actual earliest and latest times so every view
/// lands in a bucket regardless of order.
///
/// The bin count is `floor((last - first) / width) + 1`: at least one bin when
/// all views share a timestamp, and a bin of its own for the latest view when
/// the range is an exact multiple of the width.
///
/// # Errors
///
/// Returns an error if `views` is empty or the range needs more than
/// [`MAX_BINS`] bins.
pub fn build_histogram_with_width(
    views: &[LogView],
    width: BucketWidth,
) -> Result<Vec<HistogramBin>, HistogramError> {
    let (first, last) = time_range(views).ok_or(HistogramError::EmptyInput)?;

    let width_ms = width.as_millis();
    let first_ms = first.timestamp_millis();
    let span_ms = last.timestamp_millis() - first_ms;

    let needed = span_ms.unsigned_abs() / width_ms.unsigned_abs() + 1;
    let bin_count = usize::try_from(needed)
        .ok()
        .filter(|&n| n <= MAX_BINS)
        .ok_or(HistogramError::TooManyBins {
            bins: needed,
            width,
        })?;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| {
            #[allow(clippy::cast_possible_wrap)]
            let offset = TimeDelta::milliseconds(i as i64 * width_ms);
            HistogramBin::empty(first + offset)
        })
        .collect();

    for view in views {
        let offset = view.time_millis() - first_ms;
        let index = usize::try_from(offset / width_ms)
            .unwrap_or(0)
            .min(bin_count - 1);
        bins[index].count += 1;
    }

    tracing::debug!(
        entries = views.len(),
        bins = bin_count,
        width = %width,
        "Built log histogram"
    );

    Ok(bins)
}

/// Returns the earliest and latest time among `views`, or `None` if empty.
fn time_range(views: &[LogView]) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    views.iter().fold(None, |range, view| match range {
        None => Some((view.time, view.time)),
        Some((first, last)) => Some((first.min(view.time), last.max(view.time))),
    })
}
