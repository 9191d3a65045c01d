//! Gap repair for velocity traces.
//!
//! Missing samples are linearly interpolated against the time axis between
//! the nearest valid neighbours. Leading and trailing gaps take the nearest
//! valid value. A trace with no valid sample is left untouched.

/// Turn `±inf` into `NaN` so it is treated as missing.
pub fn replace_infinite(series: &mut [f64]) {
    for v in series.iter_mut() {
        if v.is_infinite() {
            *v = f64::NAN;
        }
    }
}

/// Fill every non-finite sample; returns how many samples were filled.
///
/// `time` must have the same length as `series`. Where the bracketing
/// timestamps are unusable (missing or equal) the fill falls back to
/// row-index spacing.
pub fn fill_gaps(series: &mut [f64], time: &[f64]) -> usize {
    debug_assert_eq!(series.len(), time.len());
    let n = series.len();

    // next_valid[i] = first finite index >= i
    let mut next_valid = vec![None; n + 1];
    for i in (0..n).rev() {
        next_valid[i] = if series[i].is_finite() {
            Some(i)
        } else {
            next_valid[i + 1]
        };
    }
    if next_valid[0].is_none() {
        return 0;
    }

    let mut filled = 0;
    let mut prev_valid: Option<usize> = None;
    for i in 0..n {
        if series[i].is_finite() {
            prev_valid = Some(i);
            continue;
        }
        series[i] = match (prev_valid, next_valid[i]) {
            (Some(p), Some(q)) => interpolate(series[p], series[q], p, q, i, time),
            (Some(p), None) => series[p],
            (None, Some(q)) => series[q],
            (None, None) => continue,
        };
        filled += 1;
    }
    filled
}

fn interpolate(left: f64, right: f64, p: usize, q: usize, i: usize, time: &[f64]) -> f64 {
    let (tp, tq, ti) = (time[p], time[q], time[i]);
    let frac = if tp.is_finite() && tq.is_finite() && ti.is_finite() && tq > tp {
        ((ti - tp) / (tq - tp)).clamp(0.0, 1.0)
    } else {
        (i - p) as f64 / (q - p) as f64
    };
    left + (right - left) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64 * 0.04).collect()
    }

    #[test]
    fn test_interior_gap_is_linear() {
        let mut series = vec![1.0, f64::NAN, f64::NAN, 4.0];
        let filled = fill_gaps(&mut series, &frames(4));
        assert_eq!(filled, 2);
        assert!((series[1] - 2.0).abs() < 1e-9);
        assert!((series[2] - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_edges_take_nearest_value() {
        let mut series = vec![f64::NAN, f64::NAN, 5.0, 7.0, f64::NAN];
        fill_gaps(&mut series, &frames(5));
        assert_eq!(series, vec![5.0, 5.0, 5.0, 7.0, 7.0]);
    }

    #[test]
    fn test_interpolation_follows_time_spacing() {
        // Irregular step: the missing sample sits 3/4 of the way in time
        let time = vec![0.0, 0.3, 0.4];
        let mut series = vec![0.0, f64::NAN, 8.0];
        fill_gaps(&mut series, &time);
        assert!((series[1] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_timestamps_fall_back_to_rows() {
        let time = vec![1.0, 1.0, 1.0];
        let mut series = vec![0.0, f64::NAN, 4.0];
        fill_gaps(&mut series, &time);
        assert!((series[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_missing_untouched() {
        let mut series = vec![f64::NAN; 4];
        assert_eq!(fill_gaps(&mut series, &frames(4)), 0);
        assert!(series.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_infinite_values_become_gaps() {
        let mut series = vec![2.0, f64::INFINITY, f64::NEG_INFINITY, 8.0];
        replace_infinite(&mut series);
        assert!(series[1].is_nan() && series[2].is_nan());
        fill_gaps(&mut series, &frames(4));
        assert!((series[1] - 4.0).abs() < 1e-9);
        assert!((series[2] - 6.0).abs() < 1e-9);
    }
}
