//! Execution schedule — even slicing of a parent order over a time window.
//!
//! Pure function of its inputs: no randomness, no side effects.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::domain::ExecutionPlan;

/// Invalid-configuration errors raised before any simulation runs.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid configuration: n_slices must be positive")]
    ZeroSlices,

    #[error("invalid configuration: total size must be positive (got {0})")]
    NonPositiveSize(f64),

    #[error("invalid configuration: window end {end} must be after start {start}")]
    EmptyWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error(
        "invalid configuration: window is too short to give {n_slices} slices \
         distinct timestamps"
    )]
    WindowTooShort { n_slices: usize },
}

/// Build a TWAP plan: `n_slices` equal child orders at evenly spaced target
/// timestamps.
///
/// `target_timestamps[i] = start + i * (end - start) / n_slices`. The upper
/// bound is exclusive — the last slice fires strictly before `end`. An
/// inclusive-endpoint scheme (spacing `(end - start) / (n_slices - 1)`) is a
/// deliberate non-choice, pinned by tests.
pub fn build_plan(
    total_size: f64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    n_slices: usize,
) -> Result<ExecutionPlan, PlanError> {
    if n_slices == 0 {
        return Err(PlanError::ZeroSlices);
    }
    if total_size <= 0.0 {
        return Err(PlanError::NonPositiveSize(total_size));
    }
    if end <= start {
        return Err(PlanError::EmptyWindow { start, end });
    }

    // Microsecond arithmetic keeps the spacing exact for integral-second
    // windows and slice counts well past anything realistic.
    let total_us = (end - start)
        .num_microseconds()
        .ok_or(PlanError::WindowTooShort { n_slices })?;
    if (total_us as u64) < n_slices as u64 {
        // Slices would collide at microsecond resolution; the timestamps
        // must be strictly increasing.
        return Err(PlanError::WindowTooShort { n_slices });
    }

    // The product can exceed i64 for multi-millennium windows; the quotient
    // is always < total_us, so it fits once divided.
    let target_timestamps = (0..n_slices)
        .map(|i| {
            let offset_us = total_us as i128 * i as i128 / n_slices as i128;
            start + Duration::microseconds(offset_us as i64)
        })
        .collect();

    Ok(ExecutionPlan {
        total_size,
        slice_size: total_size / n_slices as f64,
        target_timestamps,
    })
}
