//! Tracking CLI Library
//!
//! CSV → velocity columns → CSV pipeline around `tracking_core`,
//! plus the JSON run metadata written next to the output.

pub mod csv_io;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracking_core::{
    remove_derived_fields, FilterKind, PlayerSchema, VelocityConfig, VelocityEstimator,
    VelocityReport,
};

pub use csv_io::{
    read_tracking_csv, read_tracking_csv_from, write_tracking_csv, write_tracking_csv_to,
    ParseStats,
};

/// Command-line overrides applied on top of a loaded (or default) config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub filter: Option<FilterKind>,
    pub window: Option<usize>,
    pub poly_order: Option<usize>,
    /// `<= 0` disables outlier rejection
    pub max_speed: Option<f64>,
    pub no_smoothing: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, mut config: VelocityConfig) -> VelocityConfig {
        if let Some(filter) = self.filter {
            config.filter = filter;
        }
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(poly_order) = self.poly_order {
            config.poly_order = poly_order;
        }
        if let Some(max_speed) = self.max_speed {
            config.max_speed = Some(max_speed);
        }
        if self.no_smoothing {
            config.smoothing = false;
        }
        config
    }
}

/// Load `path` (JSON or YAML) or fall back to defaults, then apply overrides.
pub fn resolve_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<VelocityConfig> {
    let base = match path {
        Some(path) => VelocityConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => VelocityConfig::default(),
    };
    let config = overrides.apply(base);
    config.validate().context("Invalid velocity configuration")?;
    Ok(config)
}

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub input: PathBuf,
    pub output: PathBuf,
    /// 생성 시각 (RFC3339 형식)
    pub created_at: String,
    pub rows: usize,
    pub players: usize,
    pub invalid_cells: usize,
    pub config: VelocityConfig,
    pub report: VelocityReport,
}

/// Read `input`, estimate velocities and write the enriched table to `output`.
pub fn run_velocities(
    input: &Path,
    output: &Path,
    config: VelocityConfig,
    team: Option<&str>,
) -> Result<RunMetadata> {
    let (table, stats) = read_tracking_csv(input)?;
    if stats.invalid_cells > 0 {
        log::warn!(
            "{} non-numeric cells in {} were read as missing",
            stats.invalid_cells,
            input.display()
        );
    }

    let mut estimator = VelocityEstimator::new(config.clone());
    if let Some(team) = team {
        estimator = estimator.with_team(team);
    }
    let (table, report) = estimator
        .estimate(table)
        .with_context(|| format!("Velocity estimation failed for {}", input.display()))?;

    write_tracking_csv(&table, output)?;

    Ok(RunMetadata {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        created_at: chrono::Utc::now().to_rfc3339(),
        rows: report.rows,
        players: report.players.len(),
        invalid_cells: stats.invalid_cells,
        config,
        report,
    })
}

/// Strip derived columns (`_vx`, `_speed`, ...) from `input`.
///
/// Returns the names of the removed columns.
pub fn run_sanitize(input: &Path, output: &Path) -> Result<Vec<String>> {
    let (table, _) = read_tracking_csv(input)?;
    let before: Vec<String> = table.column_names().map(str::to_string).collect();
    let table = remove_derived_fields(table);
    let removed = before
        .into_iter()
        .filter(|name| !table.has_column(name))
        .collect();
    write_tracking_csv(&table, output)?;
    Ok(removed)
}

/// Player ids with both position columns in `input`.
pub fn list_players(input: &Path) -> Result<Vec<String>> {
    let (table, _) = read_tracking_csv(input)?;
    let schema = PlayerSchema::from_table(&table);
    Ok(schema.player_ids().map(str::to_string).collect())
}

/// Write run metadata as pretty JSON.
pub fn save_metadata(path: &Path, meta: &RunMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(meta)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }
    fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}
