//! TwapLab Runner — configuration, orchestration, analytics, reporting.
//!
//! Wires the core pipeline (price process → schedule → fill simulator) to
//! configuration, post-trade analytics, the stdout report, and artifact
//! export. The binary crate (`twaplab-cli`) is a thin shell over this one.

pub mod config;
pub mod export;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::{ConfigError, RunId, SimulationConfig};
pub use export::{export_json, import_json, save_artifacts};
pub use metrics::{ExecutionMetrics, MetricsError};
pub use report::render_report;
pub use runner::{run_simulation, RunError, SimulationResult, SCHEMA_VERSION};
pub use twaplab_core::rng::SeedHierarchy;
