//! # Moving Average Filter
//!
//! Centered convolution with a uniform kernel of `window` taps.
//!
//! Samples outside the segment count as zero, so values within
//! `window / 2` frames of either end are attenuated ("same"-mode
//! convolution). The attenuation is left uncorrected.

use super::{has_no_signal, SmoothOutcome};

/// Smooth `series` with a uniform moving average.
pub fn moving_average_smooth(series: &[f64], window: usize) -> (Vec<f64>, SmoothOutcome) {
    if window == 0 || has_no_signal(series) {
        return (series.to_vec(), SmoothOutcome::Skipped);
    }

    let filled = fill_forward_backward(series);
    let out = convolve_same(&filled, window);
    (out, SmoothOutcome::Applied { window, poly_order: None })
}

/// Carry the last valid value forward, then the first valid value backward.
fn fill_forward_backward(series: &[f64]) -> Vec<f64> {
    let mut filled = series.to_vec();

    let mut last = None;
    for v in filled.iter_mut() {
        if v.is_finite() {
            last = Some(*v);
        } else if let Some(prev) = last {
            *v = prev;
        }
    }

    let mut next = None;
    for v in filled.iter_mut().rev() {
        if v.is_finite() {
            next = Some(*v);
        } else if let Some(following) = next {
            *v = following;
        }
    }
    filled
}

/// Zero-padded convolution with a `window`-tap uniform kernel, output
/// aligned to the input (kernel offset `(window - 1) / 2`).
fn convolve_same(series: &[f64], window: usize) -> Vec<f64> {
    let n = series.len();
    let weight = 1.0 / window as f64;
    let offset = (window - 1) / 2;

    (0..n)
        .map(|i| {
            // Kernel covers input indices [i + offset + 1 - window, i + offset]
            let hi = (i + offset).min(n - 1);
            let lo = (i + offset + 1).saturating_sub(window);
            if lo > hi {
                return 0.0;
            }
            series[lo..=hi].iter().map(|v| v * weight).sum::<f64>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_preserved_away_from_edges() {
        let series = vec![25.0; 10];
        let (out, outcome) = moving_average_smooth(&series, 3);
        assert_eq!(outcome, SmoothOutcome::Applied { window: 3, poly_order: None });
        for v in &out[1..9] {
            assert!((v - 25.0).abs() < 1e-9);
        }
        // Zero padding pulls the first/last sample down by a third
        assert!((out[0] - 25.0 * 2.0 / 3.0).abs() < 1e-9);
        assert!((out[9] - 25.0 * 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_even_window_alignment() {
        // window 4 averages [i-2, i+1]
        let series = [4.0, 8.0, 12.0, 16.0, 20.0, 24.0];
        let (out, _) = moving_average_smooth(&series, 4);
        assert!((out[2] - (4.0 + 8.0 + 12.0 + 16.0) / 4.0).abs() < 1e-9);
        assert!((out[0] - (4.0 + 8.0) / 4.0).abs() < 1e-9);
        assert!((out[5] - (16.0 + 20.0 + 24.0) / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_longer_than_series() {
        let series = [3.0, 3.0];
        let (out, _) = moving_average_smooth(&series, 5);
        assert_eq!(out.len(), 2);
        // Kernel spans [i - 2, i + 2]; both samples covered, divided by 5
        assert!((out[0] - 6.0 / 5.0).abs() < 1e-9);
        assert!((out[1] - 6.0 / 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_one_is_identity() {
        let series = [1.0, -2.0, 7.5];
        let (out, _) = moving_average_smooth(&series, 1);
        assert_eq!(out, series.to_vec());
    }

    #[test]
    fn test_zero_window_skipped() {
        let series = [1.0, 2.0];
        let (out, outcome) = moving_average_smooth(&series, 0);
        assert_eq!(outcome, SmoothOutcome::Skipped);
        assert_eq!(out, series.to_vec());
    }

    #[test]
    fn test_residual_gaps_filled_before_convolution() {
        let series = [f64::NAN, 2.0, f64::NAN, 6.0, f64::NAN];
        assert_eq!(fill_forward_backward(&series), vec![2.0, 2.0, 2.0, 6.0, 6.0]);

        let (out, _) = moving_average_smooth(&series, 1);
        assert_eq!(out, vec![2.0, 2.0, 2.0, 6.0, 6.0]);
    }
}
