//! Human-readable execution report.
//!
//! Field order and formats are fixed: currency at 4 decimals, basis points
//! at 2, volume at 0. A degenerate slippage std (fewer than 2 fills) prints
//! as an explicit `undefined` marker instead of a number.

use crate::metrics::ExecutionMetrics;

/// Render the post-trade report.
pub fn render_report(metrics: &ExecutionMetrics) -> String {
    let std_line = match metrics.slippage_std_bps {
        Some(std_bps) => format!("Slippage Std Dev: {:.2} bps", std_bps),
        None => "Slippage Std Dev: undefined (fewer than 2 fills)".to_string(),
    };

    format!(
        "Execution Results:\n\
         VWAP (benchmark): ${:.4}\n\
         Average Execution Price: ${:.4}\n\
         Execution Cost vs VWAP: {:.2} bps\n\
         Average Slippage: {:.2} bps\n\
         {}\n\
         Total Volume Executed: {:.0}\n",
        metrics.vwap,
        metrics.avg_execution_price,
        metrics.execution_cost_bps,
        metrics.avg_slippage_bps,
        std_line,
        metrics.total_volume,
    )
}
