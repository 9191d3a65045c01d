//! # Velocity Estimation
//!
//! Derives per-player `_vx`, `_vy` and `_speed` columns from position traces.
//!
//! ## Algorithm (per player)
//! 1. Finite differences: `v[i] = (p[i] - p[i-1]) / dt[i]`, row 0 missing
//! 2. Samples faster than `max_speed` lose both components
//! 3. Gaps (missing or infinite) are interpolated along the time axis
//! 4. Optional smoothing, independently per match half
//! 5. Speed from the final components
//!
//! Players are independent and run in parallel once there are enough of
//! them. All three derived columns of a player are written together.

pub mod gaps;
pub mod outliers;
pub mod report;
pub mod segments;


pub use outliers::{reject_speed_outliers, OutlierSummary};
pub use report::{PlayerVelocityStats, SegmentReport, VelocityReport};
pub use segments::{find_half_time_row, segment_ranges, smooth_segments};

use crate::config::VelocityConfig;
use crate::error::Result;
use crate::sanitize::remove_derived_fields;
use crate::schema::{PlayerColumns, PlayerSchema};
use crate::smoothing::SmoothingFilter;
use crate::table::TrackingTable;
use rayon::prelude::*;

/// Player count from which per-player work is spread over the rayon pool
pub const PARALLEL_PLAYER_THRESHOLD: usize = 8;

/// Estimate velocities with `config`; see [`VelocityEstimator`].
pub fn estimate_velocities(table: TrackingTable, config: &VelocityConfig) -> Result<TrackingTable> {
    VelocityEstimator::new(config.clone())
        .estimate(table)
        .map(|(table, _)| table)
}

/// Successive differences of `time`; row 0 is `NaN`.
pub fn timesteps(time: &[f64]) -> Vec<f64> {
    finite_difference(time)
}

/// `(p[i] - p[i-1]) / dt[i]`; row 0 is `NaN`.
pub fn raw_velocity(position: &[f64], dt: &[f64]) -> Vec<f64> {
    finite_difference(position)
        .into_iter()
        .zip(dt)
        .map(|(dp, &step)| dp / step)
        .collect()
}

fn finite_difference(series: &[f64]) -> Vec<f64> {
    let mut diff = Vec::with_capacity(series.len());
    if !series.is_empty() {
        diff.push(f64::NAN);
    }
    diff.extend(series.windows(2).map(|w| w[1] - w[0]));
    diff
}

/// Derived columns for one player, written back as a unit.
struct PlayerVelocity {
    columns: PlayerColumns,
    vx: Vec<f64>,
    vy: Vec<f64>,
    speed: Vec<f64>,
    stats: PlayerVelocityStats,
}

/// Shared inputs for every player of one run.
struct RunContext<'a> {
    table: &'a TrackingTable,
    time: &'a [f64],
    dt: &'a [f64],
    half_time_row: Option<usize>,
    filter: Option<SmoothingFilter>,
    max_speed: Option<f64>,
}

/// Computes player velocities for a tracking table.
#[derive(Debug, Clone, Default)]
pub struct VelocityEstimator {
    config: VelocityConfig,
    team: Option<String>,
}

impl VelocityEstimator {
    pub fn new(config: VelocityConfig) -> Self {
        Self { config, team: None }
    }

    /// Only process players of one team (`Home`, `Away`).
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    pub fn config(&self) -> &VelocityConfig {
        &self.config
    }

    /// Strip stale derived columns, then compute and write fresh ones.
    ///
    /// Takes the table by value; the caller's copy is never modified.
    pub fn estimate(&self, table: TrackingTable) -> Result<(TrackingTable, VelocityReport)> {
        let mut table = remove_derived_fields(table);

        let filter = self.config.smoothing_filter();
        let max_speed = self.config.outlier_threshold();
        let mut report = VelocityReport {
            rows: table.len(),
            filter,
            max_speed,
            ..Default::default()
        };
        if table.is_empty() {
            return Ok((table, report));
        }

        let schema = match &self.team {
            Some(team) => PlayerSchema::from_table(&table).for_team(team),
            None => PlayerSchema::from_table(&table),
        };
        let half_time_row = find_half_time_row(&table);
        report.half_time_row = half_time_row;

        let results = {
            let time = table.time()?;
            let dt = timesteps(time);
            let non_increasing = dt
                .iter()
                .skip(1)
                .filter(|&&step| step <= 0.0 || step.is_nan())
                .count();
            if non_increasing > 0 {
                log::warn!("{} timesteps are zero, negative or missing", non_increasing);
            }

            let ctx = RunContext {
                table: &table,
                time,
                dt: &dt,
                half_time_row,
                filter,
                max_speed,
            };
            let players = schema.players();
            if players.len() >= PARALLEL_PLAYER_THRESHOLD {
                players
                    .par_iter()
                    .map(|cols| estimate_player(&ctx, cols))
                    .collect::<Result<Vec<_>>>()?
            } else {
                players
                    .iter()
                    .map(|cols| estimate_player(&ctx, cols))
                    .collect::<Result<Vec<_>>>()?
            }
        };

        for player in results {
            table.set_column(player.columns.vx(), player.vx)?;
            table.set_column(player.columns.vy(), player.vy)?;
            table.set_column(player.columns.speed(), player.speed)?;
            report.players.push(player.stats);
        }

        log::info!(
            "Estimated velocities for {} players over {} rows (half-time row: {:?}, rejected: {}, skipped segments: {})",
            report.players.len(),
            report.rows,
            report.half_time_row,
            report.total_rejected(),
            report.skipped_segments()
        );
        Ok((table, report))
    }
}

fn estimate_player(ctx: &RunContext<'_>, cols: &PlayerColumns) -> Result<PlayerVelocity> {
    let x = ctx.table.require_column(&cols.x)?;
    let y = ctx.table.require_column(&cols.y)?;
    let valid_positions = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .count();

    let mut vx = raw_velocity(x, ctx.dt);
    let mut vy = raw_velocity(y, ctx.dt);

    let outliers = reject_speed_outliers(&mut vx, &mut vy, ctx.max_speed);
    if outliers.rejected > 0 {
        log::debug!(
            "{}: rejected {} samples above {:?} m/s (peak {:?})",
            cols.player,
            outliers.rejected,
            ctx.max_speed,
            outliers.max_raw_speed
        );
    }

    gaps::replace_infinite(&mut vx);
    gaps::replace_infinite(&mut vy);
    let filled_samples = gaps::fill_gaps(&mut vx, ctx.time);
    gaps::fill_gaps(&mut vy, ctx.time);

    let mut segments = Vec::new();
    if let Some(filter) = &ctx.filter {
        let (sx, x_outcomes) = smooth_segments(&vx, ctx.half_time_row, filter);
        let (sy, y_outcomes) = smooth_segments(&vy, ctx.half_time_row, filter);
        for ((range, ox), (_, oy)) in x_outcomes.into_iter().zip(y_outcomes) {
            let segment = SegmentReport {
                start: range.start,
                end: range.end,
                vx: ox,
                vy: oy,
            };
            if segment.is_skipped() {
                log::debug!(
                    "{}: rows {}..{} too short to smooth, keeping raw velocity",
                    cols.player,
                    range.start,
                    range.end
                );
            }
            segments.push(segment);
        }
        vx = sx;
        vy = sy;
    }

    let speed = vx
        .iter()
        .zip(&vy)
        .map(|(a, b)| (a * a + b * b).sqrt())
        .collect();

    Ok(PlayerVelocity {
        stats: PlayerVelocityStats {
            player: cols.player.clone(),
            valid_positions,
            rejected_samples: outliers.rejected,
            max_raw_speed: outliers.max_raw_speed,
            filled_samples,
            segments,
        },
        columns: cols.clone(),
        vx,
        vy,
        speed,
    })
}
