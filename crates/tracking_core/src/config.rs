//! # Velocity Configuration
//!
//! Caller-supplied settings for velocity estimation. Every field is optional
//! in config files and falls back to the defaults below.
//!
//! ## Usage
//! ```rust
//! use tracking_core::config::{FilterKind, VelocityConfig};
//!
//! let config = VelocityConfig::default();
//! assert_eq!(config.filter, FilterKind::SavitzkyGolay);
//!
//! let yaml = "filter: moving_average\nwindow: 5\n";
//! let ma = VelocityConfig::from_yaml_str(yaml).unwrap();
//! assert_eq!(ma.window, 5);
//! ```

use crate::error::{Result, TrackingError};
use crate::smoothing::SmoothingFilter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Smoothing window in frames (기본: 7)
pub const DEFAULT_WINDOW: usize = 7;

/// Savitzky-Golay polynomial order (기본: 1)
pub const DEFAULT_POLY_ORDER: usize = 1;

/// Maximum realistic player speed: 12.0 m/s (43.2 km/h)
pub const MAX_PLAYER_SPEED_MPS: f64 = 12.0;

/// Which smoothing filter to run over the raw velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    #[serde(alias = "Savitzky-Golay", alias = "savitzky-golay")]
    SavitzkyGolay,
    #[serde(alias = "moving average", alias = "moving-average")]
    MovingAverage,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FilterKind::SavitzkyGolay => write!(f, "savitzky_golay"),
            FilterKind::MovingAverage => write!(f, "moving_average"),
        }
    }
}

impl FromStr for FilterKind {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "savitzky_golay" | "savgol" | "sg" => Ok(FilterKind::SavitzkyGolay),
            "moving_average" | "ma" => Ok(FilterKind::MovingAverage),
            _ => Err(TrackingError::InvalidConfig(format!(
                "Unknown filter: {}. Use savitzky_golay or moving_average.",
                s
            ))),
        }
    }
}

/// Velocity estimation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityConfig {
    /// Smooth the raw velocities (기본: true)
    pub smoothing: bool,
    /// Filter used when smoothing is enabled
    pub filter: FilterKind,
    /// Window length in frames
    pub window: usize,
    /// Polynomial order, Savitzky-Golay only
    pub poly_order: usize,
    /// Outlier bound in m/s; `None` or a non-positive value disables rejection
    pub max_speed: Option<f64>,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            smoothing: true,
            filter: FilterKind::SavitzkyGolay,
            window: DEFAULT_WINDOW,
            poly_order: DEFAULT_POLY_ORDER,
            max_speed: Some(MAX_PLAYER_SPEED_MPS),
        }
    }
}

impl VelocityConfig {
    /// Outlier-cleaned velocities, no smoothing.
    pub fn raw() -> Self {
        Self {
            smoothing: false,
            ..Self::default()
        }
    }

    /// Moving-average smoothing with the given window.
    pub fn moving_average(window: usize) -> Self {
        Self {
            filter: FilterKind::MovingAverage,
            window,
            ..Self::default()
        }
    }

    /// Speed bound used for outlier rejection, if enabled.
    pub fn outlier_threshold(&self) -> Option<f64> {
        self.max_speed.filter(|&limit| limit > 0.0)
    }

    /// The filter to apply, or `None` when smoothing is disabled.
    pub fn smoothing_filter(&self) -> Option<SmoothingFilter> {
        if !self.smoothing {
            return None;
        }
        Some(match self.filter {
            FilterKind::SavitzkyGolay => SmoothingFilter::SavitzkyGolay {
                window: self.window,
                poly_order: self.poly_order,
            },
            FilterKind::MovingAverage => SmoothingFilter::MovingAverage {
                window: self.window,
            },
        })
    }

    /// Reject values no run could interpret. Infeasible filter parameters are
    /// not errors; they are clamped when the filter runs.
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.max_speed {
            if limit.is_nan() {
                return Err(TrackingError::InvalidConfig(
                    "max_speed must be a number".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Self::from_json_str(&contents),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Err(TrackingError::InvalidConfig(format!(
                "Unsupported config format: {}",
                path.display()
            ))),
        }
    }
}

// ========== Tests ==========
