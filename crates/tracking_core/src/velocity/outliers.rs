//! # Speed Outlier Rejection
//!
//! Position glitches show up as impossible frame-to-frame speeds. Any sample
//! whose raw speed exceeds the bound loses both velocity components, which
//! then go through gap repair like any other missing sample.
//!
//! Must run before gap filling so a glitch never anchors an interpolation.

use serde::{Deserialize, Serialize};

/// Result of one rejection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierSummary {
    /// Samples invalidated for exceeding the bound
    pub rejected: usize,
    /// Largest finite raw speed seen before rejection (m/s)
    pub max_raw_speed: Option<f64>,
}

/// Raw speed per sample; `NaN` wherever either component is missing.
pub fn raw_speed(vx: &[f64], vy: &[f64]) -> Vec<f64> {
    vx.iter()
        .zip(vy)
        .map(|(x, y)| (x * x + y * y).sqrt())
        .collect()
}

/// Invalidate both components wherever raw speed exceeds `max_speed`.
///
/// `None` disables rejection; the summary still reports the peak speed.
pub fn reject_speed_outliers(vx: &mut [f64], vy: &mut [f64], max_speed: Option<f64>) -> OutlierSummary {
    let speeds = raw_speed(vx, vy);
    let max_raw_speed = speeds
        .iter()
        .copied()
        .filter(|s| s.is_finite())
        .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |m| m.max(s))));

    let mut rejected = 0;
    if let Some(limit) = max_speed {
        for (i, speed) in speeds.iter().enumerate() {
            if *speed > limit {
                vx[i] = f64::NAN;
                vy[i] = f64::NAN;
                rejected += 1;
            }
        }
    }

    OutlierSummary {
        rejected,
        max_raw_speed,
    }
}
