use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Simulated execution of one child order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fill {
    /// The plan's target timestamp, not the market timestamp used for pricing.
    pub timestamp: DateTime<Utc>,
    /// Timestamp of the quote this fill was priced against.
    pub quote_timestamp: DateTime<Utc>,
    pub size: f64,
    /// Executed price: matched quote's ask adjusted by slippage.
    pub price: f64,
    /// Market mid at the matched quote.
    pub mid_price_reference: f64,
    /// Relative slippage applied to the ask. Can be negative.
    pub slippage: f64,
}
