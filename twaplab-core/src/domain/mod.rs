//! Domain types for TwapLab.

pub mod fill;
pub mod plan;
pub mod quote;

pub use fill::Fill;
pub use plan::ExecutionPlan;
pub use quote::Quote;
