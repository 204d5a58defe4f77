//! Execution analytics — pure functions over the quote and fill streams.
//!
//! The benchmark is the volume-weighted average mid over the *entire*
//! simulated window, independent of which quotes were actually hit. Every
//! division is guarded: empty or zero-sum inputs are errors, never NaN.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use twaplab_core::domain::{Fill, Quote};

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("empty input: no market quotes to benchmark against")]
    EmptyQuotes,

    #[error("empty input: no fills to aggregate")]
    EmptyFills,

    #[error("degenerate aggregate: total market volume is zero")]
    ZeroMarketVolume,

    #[error("degenerate aggregate: total filled size is zero")]
    ZeroFilledSize,
}

/// Post-trade snapshot comparing achieved execution against the VWAP
/// benchmark.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionMetrics {
    /// Volume-weighted average mid over the full quote stream.
    pub vwap: f64,
    /// Size-weighted average fill price.
    pub avg_execution_price: f64,
    /// (achieved / benchmark - 1) in basis points.
    pub execution_cost_bps: f64,
    pub avg_slippage_bps: f64,
    /// Sample (n - 1) std dev of slippage in bps. `None` below 2 fills —
    /// the statistic is undefined there, not zero.
    pub slippage_std_bps: Option<f64>,
    /// Total size executed.
    pub total_volume: f64,
}

impl ExecutionMetrics {
    /// Compute all metrics from the fill and quote streams.
    pub fn compute(fills: &[Fill], quotes: &[Quote]) -> Result<Self, MetricsError> {
        let vwap = vwap(quotes)?;
        let avg_execution_price = avg_execution_price(fills)?;

        let slippages: Vec<f64> = fills.iter().map(|f| f.slippage).collect();

        Ok(Self {
            vwap,
            avg_execution_price,
            execution_cost_bps: (avg_execution_price / vwap - 1.0) * 10_000.0,
            avg_slippage_bps: mean_f64(&slippages) * 10_000.0,
            slippage_std_bps: sample_std(&slippages).map(|s| s * 10_000.0),
            total_volume: fills.iter().map(|f| f.size).sum(),
        })
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Volume-weighted average mid price over the quote stream.
pub fn vwap(quotes: &[Quote]) -> Result<f64, MetricsError> {
    if quotes.is_empty() {
        return Err(MetricsError::EmptyQuotes);
    }
    let total_volume: f64 = quotes.iter().map(|q| q.volume).sum();
    if total_volume <= 0.0 {
        return Err(MetricsError::ZeroMarketVolume);
    }
    let weighted: f64 = quotes.iter().map(|q| q.mid * q.volume).sum();
    Ok(weighted / total_volume)
}

/// Size-weighted average execution price over the fill stream.
pub fn avg_execution_price(fills: &[Fill]) -> Result<f64, MetricsError> {
    if fills.is_empty() {
        return Err(MetricsError::EmptyFills);
    }
    let total_size: f64 = fills.iter().map(|f| f.size).sum();
    if total_size <= 0.0 {
        return Err(MetricsError::ZeroFilledSize);
    }
    let weighted: f64 = fills.iter().map(|f| f.price * f.size).sum();
    Ok(weighted / total_size)
}

fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); `None` below 2 values.
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean_f64(values);
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}
