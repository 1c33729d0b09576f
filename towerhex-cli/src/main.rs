//! TowerHex CLI - Command-line interface
//!
//! Commands:
//! - reach: Check whether a path survives a set of towers
//! - line: Print the hexes on a line between two cells
//! - range: Print the hexes within a radius (or two radii)
//! - init-config: Write the default map configuration

mod geometry_cmd;
mod reach_cmd;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use towerhex_core::{Hex, MapConfig};

#[derive(Parser)]
#[command(name = "towerhex")]
#[command(about = "Hex-grid geometry and path feasibility for tower defence maps")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Map configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a path survives a set of towers
    Reach(reach_cmd::ReachArgs),
    /// Print the hexes on a line between two cells
    Line(geometry_cmd::LineArgs),
    /// Print the hexes within a radius of a cell
    Range(geometry_cmd::RangeArgs),
    /// Write the default map configuration
    InitConfig {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Reach(args) => {
            let config = load_config(cli.config.as_ref())?;
            reach_cmd::run(args, &config, cli.seed)
        }
        Commands::Line(args) => geometry_cmd::run_line(args),
        Commands::Range(args) => geometry_cmd::run_range(args),
        Commands::InitConfig { path } => {
            MapConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write config: {}", path.display()))?;
            tracing::info!("Wrote default map config to {}", path.display());
            Ok(())
        }
    }
}

/// Load the map config, falling back to the defaults
fn load_config(path: Option<&PathBuf>) -> Result<MapConfig> {
    match path {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("Failed to load map config: {}", path.display())),
        None => Ok(MapConfig::default()),
    }
}

/// Parse an axial `Q,R` pair
pub(crate) fn parse_hex(s: &str) -> Result<Hex, String> {
    let (q, r) = s
        .split_once(',')
        .ok_or_else(|| format!("expected Q,R but got '{}'", s))?;
    let q: i32 = q.trim().parse().map_err(|e| format!("bad q in '{}': {}", s, e))?;
    let r: i32 = r.trim().parse().map_err(|e| format!("bad r in '{}': {}", s, e))?;
    Hex::checked_new(q, r).ok_or_else(|| format!("'{}' is outside the coordinate range", s))
}
