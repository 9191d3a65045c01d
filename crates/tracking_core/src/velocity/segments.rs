//! Match segments (halves) for per-segment smoothing.
//!
//! With a half-time row `b`, segment 1 is rows `0..=b` and segment 2 is rows
//! `b..n`. Row `b` belongs to both; segment 2 is written last and owns it.
//! Each segment is smoothed from the unsmoothed input, never from the other
//! segment's output.

use crate::smoothing::{SmoothOutcome, SmoothingFilter};
use crate::table::TrackingTable;
use std::ops::Range;

/// Period value that marks the second half
pub const SECOND_HALF_PERIOD: f64 = 2.0;

/// First row of the second half, if the table has a `Period` column with a 2 in it.
pub fn find_half_time_row(table: &TrackingTable) -> Option<usize> {
    table
        .period()
        .and_then(|period| period.iter().position(|&p| p == SECOND_HALF_PERIOD))
}

/// Row ranges of each segment.
pub fn segment_ranges(len: usize, half_time_row: Option<usize>) -> Vec<Range<usize>> {
    match half_time_row {
        Some(b) if b < len => vec![0..b + 1, b..len],
        _ => vec![0..len],
    }
}

/// Smooth each segment of `series` independently.
///
/// Returns the smoothed series and one outcome per segment.
pub fn smooth_segments(
    series: &[f64],
    half_time_row: Option<usize>,
    filter: &SmoothingFilter,
) -> (Vec<f64>, Vec<(Range<usize>, SmoothOutcome)>) {
    let mut out = series.to_vec();
    let mut outcomes = Vec::new();
    for range in segment_ranges(series.len(), half_time_row) {
        let (smoothed, outcome) = filter.smooth(&series[range.clone()]);
        out[range.clone()].copy_from_slice(&smoothed);
        outcomes.push((range, outcome));
    }
    (out, outcomes)
}
