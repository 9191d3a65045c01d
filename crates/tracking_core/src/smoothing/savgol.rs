//! # Adaptive Savitzky-Golay Filter
//!
//! Least-squares polynomial smoothing over a sliding, centered window.
//!
//! ## Parameter adjustment
//! 1. window < 3 → no filtering
//! 2. even window → window + 1
//! 3. window > n → n (odd n) or n - 1 (even n), then re-check rule 1
//! 4. poly_order >= window → max(1, window - 1)
//!
//! ## Edges
//! The first and last `window / 2` samples are evaluated on the polynomial
//! fitted to the first/last full window instead of being dropped.

use super::{has_no_signal, SmoothOutcome};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Smallest window that can carry a centered fit
pub const MIN_WINDOW: usize = 3;

const PINV_EPS: f64 = 1e-12;

/// Window and order after feasibility adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavgolParams {
    pub window: usize,
    pub poly_order: usize,
}

impl SavgolParams {
    /// Clamp requested parameters to a series of length `len`.
    ///
    /// Returns `None` when no odd window >= 3 fits.
    pub fn adjust(len: usize, window: usize, poly_order: usize) -> Option<Self> {
        if window < MIN_WINDOW {
            return None;
        }
        let mut w = if window % 2 == 0 { window + 1 } else { window };
        if w > len {
            w = if len % 2 == 1 { len } else { len.saturating_sub(1) };
        }
        if w < MIN_WINDOW {
            return None;
        }

        let p = if poly_order >= w {
            (w - 1).max(1)
        } else {
            poly_order
        };
        Some(Self { window: w, poly_order: p })
    }
}

/// Smooth `series` with an adaptive Savitzky-Golay filter.
pub fn savgol_smooth(series: &[f64], window: usize, poly_order: usize) -> (Vec<f64>, SmoothOutcome) {
    if has_no_signal(series) {
        return (series.to_vec(), SmoothOutcome::Skipped);
    }
    let Some(params) = SavgolParams::adjust(series.len(), window, poly_order) else {
        log::debug!(
            "Savitzky-Golay skipped: window {} infeasible for {} samples",
            window,
            series.len()
        );
        return (series.to_vec(), SmoothOutcome::Skipped);
    };
    let Some(hat) = projection_matrix(params) else {
        log::warn!(
            "Savitzky-Golay fit failed for window {} order {}",
            params.window,
            params.poly_order
        );
        return (series.to_vec(), SmoothOutcome::Skipped);
    };

    let outcome = SmoothOutcome::Applied {
        window: params.window,
        poly_order: Some(params.poly_order),
    };
    (apply_projection(series, &hat, params.window), outcome)
}

/// Least-squares projection onto polynomials of `poly_order` over the window.
///
/// Row `r` holds the weights that map window samples to the fitted value at
/// window position `r`. The center row is the classic smoothing kernel.
fn projection_matrix(params: SavgolParams) -> Option<DMatrix<f64>> {
    let w = params.window;
    let half = (w / 2) as f64;
    // Positions scaled to [-1, 1] keep the Vandermonde matrix well conditioned
    let vandermonde = DMatrix::from_fn(w, params.poly_order + 1, |r, c| {
        ((r as f64 - half) / half).powi(c as i32)
    });
    let pinv = vandermonde.clone().pseudo_inverse(PINV_EPS).ok()?;
    Some(vandermonde * pinv)
}

fn apply_projection(series: &[f64], hat: &DMatrix<f64>, window: usize) -> Vec<f64> {
    let n = series.len();
    let half = window / 2;
    let weighted = |row: usize, start: usize| -> f64 {
        (0..window).map(|j| hat[(row, j)] * series[start + j]).sum()
    };

    let mut out = vec![0.0; n];
    for i in 0..half {
        out[i] = weighted(i, 0);
    }
    for i in half..n - half {
        out[i] = weighted(half, i - half);
    }
    let tail_start = n - window;
    for k in 0..half {
        out[n - half + k] = weighted(half + 1 + k, tail_start);
    }
    out
}
