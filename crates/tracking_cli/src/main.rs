//! Tracking CLI
//!
//! Tracking CSV → per-player velocity columns (`_vx`, `_vy`, `_speed`)

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracking_core::FilterKind;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tracking_cli")]
#[command(about = "Estimate player velocities from tracking CSV files", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Compute velocity and speed columns for every player
    Velocities {
        /// Input tracking CSV file path
        #[arg(long)]
        input: PathBuf,

        /// Output CSV file path
        #[arg(long)]
        output: PathBuf,

        /// Velocity config file (.json, .yaml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Smoothing filter (savitzky_golay, moving_average)
        #[arg(long)]
        filter: Option<FilterKind>,

        /// Smoothing window in frames
        #[arg(long)]
        window: Option<usize>,

        /// Savitzky-Golay polynomial order
        #[arg(long)]
        poly_order: Option<usize>,

        /// Speed bound in m/s (0 disables rejection)
        #[arg(long)]
        max_speed: Option<f64>,

        /// Keep raw finite-difference velocities
        #[arg(long, default_value = "false")]
        no_smoothing: bool,

        /// Only process one team (e.g., "Home")
        #[arg(long)]
        team: Option<String>,

        /// Output run report JSON file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Remove derived columns (_vx, _vy, _speed, ...) from a tracking CSV
    Sanitize {
        /// Input tracking CSV file path
        #[arg(long)]
        input: PathBuf,

        /// Output CSV file path
        #[arg(long)]
        output: PathBuf,
    },

    /// List players with position columns
    Players {
        /// Input tracking CSV file path
        #[arg(long)]
        input: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Velocities {
            input,
            output,
            config,
            filter,
            window,
            poly_order,
            max_speed,
            no_smoothing,
            team,
            report,
        } => {
            let overrides = tracking_cli::ConfigOverrides {
                filter,
                window,
                poly_order,
                max_speed,
                no_smoothing,
            };
            let config = tracking_cli::resolve_config(config.as_deref(), &overrides)?;

            println!("🏃 Estimating velocities...");
            println!("   Input:  {}", input.display());
            println!("   Output: {}", output.display());
            println!("   Filter: {}", describe_filter(&config));

            let meta = tracking_cli::run_velocities(&input, &output, config, team.as_deref())?;
            print_metadata(&meta);

            if let Some(report_path) = report {
                tracking_cli::save_metadata(&report_path, &meta)?;
                println!("\n📄 Report saved to: {}", report_path.display());
            }
        }

        Commands::Sanitize { input, output } => {
            println!("🧹 Removing derived columns...");
            println!("   Input:  {}", input.display());
            println!("   Output: {}", output.display());

            let removed = tracking_cli::run_sanitize(&input, &output)?;
            println!("\n✅ Removed {} columns", removed.len());
            for name in removed {
                println!("   - {}", name);
            }
        }

        Commands::Players { input } => {
            let players = tracking_cli::list_players(&input)?;
            println!("{} players in {}", players.len(), input.display());
            for player in players {
                println!("   {}", player);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn describe_filter(config: &tracking_core::VelocityConfig) -> String {
    match config.smoothing_filter() {
        Some(filter) => format!("{} (window {})", filter.kind(), config.window),
        None => "none (raw)".to_string(),
    }
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &tracking_cli::RunMetadata) {
    println!("\n✅ Velocities written");
    println!("   Rows:             {}", meta.rows);
    println!("   Players:          {}", meta.players);
    println!("   Half-time row:    {:?}", meta.report.half_time_row);
    println!("   Rejected samples: {}", meta.report.total_rejected());
    println!("   Skipped segments: {}", meta.report.skipped_segments());
    if meta.invalid_cells > 0 {
        println!("   Invalid cells:    {}", meta.invalid_cells);
    }
    println!("   Created:          {}", meta.created_at);
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tracking_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
