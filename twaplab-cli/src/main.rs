//! TwapLab CLI — run the TWAP execution simulation.
//!
//! Commands:
//! - `run` — execute the full pipeline and print the report
//! - `init-config` — write the default configuration as TOML
//!
//! When `--seed` is omitted, a seed is drawn from entropy and printed so
//! the run can be reproduced. Any configuration or data error exits
//! non-zero without printing a partial report.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use twaplab_runner::{
    render_report, run_simulation, save_artifacts, SeedHierarchy, SimulationConfig,
};

#[derive(Parser)]
#[command(
    name = "twaplab",
    about = "TwapLab — TWAP execution cost simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute the simulation and print the post-trade report.
    Run {
        /// Path to a TOML config file. Defaults to the built-in parameters
        /// (100.0 initial price, 1000-unit order, 30-minute window, 6 slices).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Master seed. Omit to draw one from entropy (it is printed).
        #[arg(long)]
        seed: Option<u64>,

        /// Window start as RFC 3339 (e.g. 2024-06-03T14:30:00Z). Defaults to now.
        #[arg(long)]
        start: Option<String>,

        /// Write result.json / fills.csv / quotes.csv under the output dir.
        #[arg(long, default_value_t = false)]
        save: bool,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Write the default configuration to a TOML file.
    InitConfig {
        /// Destination path.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            seed,
            start,
            save,
            output_dir,
        } => run_cmd(config, seed, start, save, output_dir),
        Commands::InitConfig { path } => init_config_cmd(path),
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    start: Option<String>,
    save: bool,
    output_dir: PathBuf,
) -> Result<()> {
    let config = match config_path {
        Some(path) => SimulationConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let start_time = match start {
        Some(text) => DateTime::parse_from_rfc3339(&text)
            .with_context(|| format!("parsing --start '{text}' as RFC 3339"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let seed = seed.unwrap_or_else(|| SeedHierarchy::from_entropy().master_seed());

    let result = run_simulation(&config, start_time, seed)?;

    println!("Run ID: {}", &result.run_id[..12]);
    println!("Seed:   {seed}");
    println!();
    print!("{}", render_report(&result.metrics));

    if save {
        let run_dir = save_artifacts(&result, &output_dir)?;
        println!();
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

fn init_config_cmd(path: PathBuf) -> Result<()> {
    let text = toml::to_string_pretty(&SimulationConfig::default())
        .context("serializing default config")?;
    std::fs::write(&path, text)
        .with_context(|| format!("writing config to {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
