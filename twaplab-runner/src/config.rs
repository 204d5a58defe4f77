//! Serializable simulation configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Unique identifier for a simulation configuration (content-addressable hash).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// All parameters of a simulation run.
///
/// `Default` carries the reference parameters: a 1000-unit buy program over
/// a 30-minute window in 6 slices, sampled once per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Starting mid price for the random walk.
    pub initial_price: f64,
    /// Mean of the per-tick spread draw, as a fraction of mid.
    pub avg_spread: f64,
    /// Std dev of the per-tick relative price shock.
    pub volatility: f64,
    /// Parent order size.
    pub order_size: f64,
    /// Execution window length in minutes.
    pub window_minutes: f64,
    /// Number of equal child orders.
    pub n_slices: usize,
    /// Quote sampling interval in seconds.
    pub sampling_interval_seconds: f64,
    /// Std dev of the per-fill slippage draw.
    pub slippage_std: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            avg_spread: 0.02,
            volatility: 0.0002,
            order_size: 1000.0,
            window_minutes: 30.0,
            n_slices: 6,
            sampling_interval_seconds: 1.0,
            slippage_std: 0.0001,
        }
    }
}

impl SimulationConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run.
    ///
    /// Zero spread, volatility, and slippage std are valid (they make the
    /// corresponding draw deterministic); zero sizes, windows, intervals,
    /// and slice counts are not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_price.is_finite() || self.initial_price <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_price must be positive (got {})",
                self.initial_price
            )));
        }
        if !self.avg_spread.is_finite() || self.avg_spread < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "avg_spread must be non-negative (got {})",
                self.avg_spread
            )));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "volatility must be non-negative (got {})",
                self.volatility
            )));
        }
        if !self.order_size.is_finite() || self.order_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "order_size must be positive (got {})",
                self.order_size
            )));
        }
        if !self.window_minutes.is_finite() || self.window_minutes <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "window_minutes must be positive (got {})",
                self.window_minutes
            )));
        }
        if self.n_slices == 0 {
            return Err(ConfigError::Invalid("n_slices must be positive".into()));
        }
        // The pipeline works in microsecond Durations; anything below 1 µs
        // would round to a zero interval, so reject it here rather than let
        // the price process fail mid-run.
        if !self.sampling_interval_seconds.is_finite() || self.sampling_interval_seconds < 1e-6 {
            return Err(ConfigError::Invalid(format!(
                "sampling_interval_seconds must be at least 1 microsecond (got {})",
                self.sampling_interval_seconds
            )));
        }
        if !self.slippage_std.is_finite() || self.slippage_std < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "slippage_std must be non-negative (got {})",
                self.slippage_std
            )));
        }
        Ok(())
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, so artifacts from
    /// repeated runs of the same setup land in the same directory family.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("SimulationConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }
}
