//! # tracking_core - Player Velocity Estimation for Tracking Data
//!
//! Turns sampled player positions (metres, fixed frame rate) into clean
//! per-player velocity and speed columns for downstream pitch-control models.
//!
//! ## Features
//! - Finite-difference velocities with a realistic speed bound for glitches
//! - Time-axis gap repair for missing or rejected samples
//! - Adaptive Savitzky-Golay or moving-average smoothing per match half
//! - Per-run report of rejected samples and smoothing fallbacks
//!
//! ## Usage
//! ```rust
//! use tracking_core::{estimate_velocities, TrackingTable, VelocityConfig};
//!
//! let table = TrackingTable::from_columns(vec![
//!     ("Time [s]", vec![0.0, 0.04, 0.08, 0.12]),
//!     ("Home_1_x", vec![10.0, 10.2, 10.4, 10.6]),
//!     ("Home_1_y", vec![34.0, 34.0, 34.0, 34.0]),
//! ])
//! .unwrap();
//!
//! let table = estimate_velocities(table, &VelocityConfig::default()).unwrap();
//! let speed = table.column("Home_1_speed").unwrap();
//! assert!((speed[2] - 5.0).abs() < 1e-9);
//! ```

// Loop style - index loops mirror the frame arithmetic
#![allow(clippy::needless_range_loop)]

pub mod config;
pub mod error;
pub mod sanitize;
pub mod schema;
pub mod smoothing;
pub mod table;
pub mod velocity;

pub use config::{FilterKind, VelocityConfig, MAX_PLAYER_SPEED_MPS};
pub use error::{Result, TrackingError};
pub use sanitize::remove_derived_fields;
pub use schema::{PlayerColumns, PlayerSchema};
pub use smoothing::{SmoothOutcome, SmoothingFilter};
pub use table::{TrackingTable, PERIOD_COLUMN, TIME_COLUMN};
pub use velocity::{estimate_velocities, VelocityEstimator, VelocityReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
