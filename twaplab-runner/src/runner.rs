//! Simulation runner — wires the pipeline together.
//!
//! Strictly sequential, left to right: price process → schedule → fill
//! simulator → analytics. Any stage error aborts the run; there is no
//! partial result.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use twaplab_core::domain::{Fill, Quote};
use twaplab_core::execution::{execute_plan, ExecutionError};
use twaplab_core::market::{MarketError, PriceProcess};
use twaplab_core::rng::{SeedHierarchy, STAGE_EXECUTION, STAGE_MARKET};
use twaplab_core::schedule::{build_plan, PlanError};

use crate::config::{ConfigError, RunId, SimulationConfig};
use crate::metrics::{ExecutionMetrics, MetricsError};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("market error: {0}")]
    Market(#[from] MarketError),
    #[error("schedule error: {0}")]
    Plan(#[from] PlanError),
    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),
    #[error("analytics error: {0}")]
    Metrics(#[from] MetricsError),
}

/// Complete result of a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    /// Master seed the run was driven by; re-running with it reproduces
    /// the result exactly.
    pub seed: u64,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub quotes: Vec<Quote>,
    pub fills: Vec<Fill>,
    pub metrics: ExecutionMetrics,
}

/// Default schema version for serde deserialization of older JSON without
/// the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run the full pipeline for `config`, starting the window at `start`.
///
/// The seed drives two independent sub-streams (market, execution) via the
/// core seed hierarchy, so the same `(config, start, seed)` triple always
/// yields the same result.
pub fn run_simulation(
    config: &SimulationConfig,
    start: DateTime<Utc>,
    seed: u64,
) -> Result<SimulationResult, RunError> {
    config.validate()?;

    let end = start + minutes_to_duration(config.window_minutes);
    let interval = seconds_to_duration(config.sampling_interval_seconds);
    let seeds = SeedHierarchy::new(seed);

    let mut process = PriceProcess::new(config.initial_price, config.avg_spread, config.volatility)?;
    let mut market_rng = seeds.rng_for(STAGE_MARKET);
    let quotes = process.simulate(start, end, interval, &mut market_rng)?;

    let plan = build_plan(config.order_size, start, end, config.n_slices)?;

    let mut exec_rng = seeds.rng_for(STAGE_EXECUTION);
    let fills = execute_plan(&plan, &quotes, config.slippage_std, &mut exec_rng)?;

    let metrics = ExecutionMetrics::compute(&fills, &quotes)?;

    Ok(SimulationResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        seed,
        window_start: start,
        window_end: end,
        quotes,
        fills,
        metrics,
    })
}

// Microsecond resolution: config validation floors the sampling interval
// at 1 microsecond, so neither conversion can round to a zero Duration.
fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::microseconds((minutes * 60_000_000.0).round() as i64)
}

fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::microseconds((seconds * 1_000_000.0).round() as i64)
}
