use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// TWAP execution schedule: a parent order sliced into equal child orders
/// at evenly spaced target timestamps.
///
/// Immutable once built. `target_timestamps` is strictly increasing, with
/// `target_timestamps[i] = start + i * (end - start) / n_slices` — the last
/// slice fires strictly before the window end, never at it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionPlan {
    pub total_size: f64,
    /// Per-child size, `total_size / n_slices`.
    pub slice_size: f64,
    pub target_timestamps: Vec<DateTime<Utc>>,
}

impl ExecutionPlan {
    pub fn n_slices(&self) -> usize {
        self.target_timestamps.len()
    }
}
