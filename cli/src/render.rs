//! Terminal rendering of log views and histogram bins.

use chrono::{DateTime, Utc};
use shared::models::{HistogramBin, LogView};

/// Width of the longest histogram bar, in characters.
pub const BAR_WIDTH: usize = 40;

/// Formats a time the way HTTP dates are written, e.g.
/// `Tue, 14 Nov 2023 22:13:20 GMT`.
pub fn format_time(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Formats one table row: severity, time, body.
pub fn format_row(view: &LogView) -> String {
    format!(
        "{:<8} {}  {}",
        view.severity.as_deref().unwrap_or("-"),
        format_time(view.time),
        view.body
    )
}

/// Pretty-prints the record a view was built from.
pub fn format_raw(view: &LogView) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view.raw.as_ref())
}

/// Formats bins as horizontal bars scaled to the largest count.
pub fn format_histogram(bins: &[HistogramBin]) -> Vec<String> {
    let max = bins.iter().map(|b| b.count).max().unwrap_or(0);

    bins.iter()
        .map(|bin| {
            format!(
                "{}  {:<width$} {}",
                format_time(bin.bucket_start),
                "#".repeat(bar_len(bin.count, max)),
                bin.count,
                width = BAR_WIDTH
            )
        })
        .collect()
}

/// Bar length for `count`; any non-zero count gets at least one mark.
fn bar_len(count: u64, max: u64) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let scaled = (count * BAR_WIDTH as u64).div_ceil(max);
    usize::try_from(scaled).unwrap_or(BAR_WIDTH)
}
