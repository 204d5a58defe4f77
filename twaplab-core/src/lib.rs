//! TwapLab Core — market simulation and TWAP execution primitives.
//!
//! This crate contains the computational pipeline, left to right:
//! - Domain types (quotes, execution plans, fills)
//! - Price process: multiplicative random-walk mid with stochastic spread
//! - Execution schedule: even slicing of a parent order over a time window
//! - Fill simulator: nearest-quote matching with Gaussian slippage
//! - Deterministic RNG hierarchy for reproducible runs
//!
//! No I/O lives here; orchestration, analytics, and reporting belong to
//! `twaplab-runner`.

pub mod domain;
pub mod execution;
pub mod market;
pub mod rng;
pub mod schedule;
