//! # Smoothing Module
//!
//! Velocity smoothing filters applied to one match segment at a time.
//!
//! - `savgol` - adaptive Savitzky-Golay (local polynomial regression)
//! - `moving_average` - uniform-kernel convolution
//!
//! Both filters are total: infeasible parameters are clamped, and a segment
//! too short for any valid window comes back unchanged with
//! [`SmoothOutcome::Skipped`].

pub mod moving_average;
pub mod savgol;

pub use moving_average::moving_average_smooth;
pub use savgol::{savgol_smooth, SavgolParams};

use crate::config::FilterKind;
use serde::{Deserialize, Serialize};

/// A configured smoothing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmoothingFilter {
    SavitzkyGolay { window: usize, poly_order: usize },
    MovingAverage { window: usize },
}

/// What a filter actually did to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SmoothOutcome {
    /// Filter ran with these effective parameters
    Applied {
        window: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        poly_order: Option<usize>,
    },
    /// Not enough usable samples; segment returned unchanged
    Skipped,
}

impl SmoothOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SmoothOutcome::Applied { .. })
    }
}

impl SmoothingFilter {
    pub fn kind(&self) -> FilterKind {
        match self {
            SmoothingFilter::SavitzkyGolay { .. } => FilterKind::SavitzkyGolay,
            SmoothingFilter::MovingAverage { .. } => FilterKind::MovingAverage,
        }
    }

    /// Smooth one segment. Output length always equals input length.
    pub fn smooth(&self, series: &[f64]) -> (Vec<f64>, SmoothOutcome) {
        match *self {
            SmoothingFilter::SavitzkyGolay { window, poly_order } => {
                savgol_smooth(series, window, poly_order)
            }
            SmoothingFilter::MovingAverage { window } => moving_average_smooth(series, window),
        }
    }
}

/// True when the series has no finite sample to smooth.
pub(crate) fn has_no_signal(series: &[f64]) -> bool {
    !series.iter().any(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let series: Vec<f64> = (0..20).map(|i| ((i * 7) % 5) as f64).collect();

        let sg = SmoothingFilter::SavitzkyGolay { window: 5, poly_order: 2 };
        assert_eq!(sg.smooth(&series), savgol_smooth(&series, 5, 2));
        assert_eq!(sg.kind(), FilterKind::SavitzkyGolay);

        let ma = SmoothingFilter::MovingAverage { window: 4 };
        assert_eq!(ma.smooth(&series), moving_average_smooth(&series, 4));
        assert_eq!(ma.kind(), FilterKind::MovingAverage);
    }

    #[test]
    fn test_empty_series_is_skipped() {
        for filter in [
            SmoothingFilter::SavitzkyGolay { window: 7, poly_order: 1 },
            SmoothingFilter::MovingAverage { window: 7 },
        ] {
            let (out, outcome) = filter.smooth(&[]);
            assert!(out.is_empty());
            assert_eq!(outcome, SmoothOutcome::Skipped);
        }
    }

    #[test]
    fn test_all_missing_segment_is_skipped() {
        let series = vec![f64::NAN; 12];
        for filter in [
            SmoothingFilter::SavitzkyGolay { window: 5, poly_order: 1 },
            SmoothingFilter::MovingAverage { window: 3 },
        ] {
            let (out, outcome) = filter.smooth(&series);
            assert_eq!(out.len(), 12);
            assert!(out.iter().all(|v| v.is_nan()));
            assert_eq!(outcome, SmoothOutcome::Skipped);
        }
    }

    #[test]
    fn test_outcome_serialization() {
        let applied = SmoothOutcome::Applied { window: 3, poly_order: None };
        let json = serde_json::to_value(applied).unwrap();
        assert_eq!(json, serde_json::json!({"outcome": "applied", "window": 3}));
        assert!(applied.is_applied());
        assert!(!SmoothOutcome::Skipped.is_applied());
    }
}
