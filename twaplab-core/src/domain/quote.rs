use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-of-book market snapshot for one simulation tick.
///
/// Immutable once generated. The quote stream is ordered by timestamp
/// ascending with no duplicate timestamps. `bid <= mid <= ask` holds for
/// every quote the price process emits (spread draws are floored at zero).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub timestamp: DateTime<Utc>,
    pub bid: f64,
    pub ask: f64,
    pub mid: f64,
    /// Traded volume observed during this tick (not order-book depth).
    pub volume: f64,
}

impl Quote {
    /// Quoted spread as a fraction of mid.
    pub fn spread(&self) -> f64 {
        (self.ask - self.bid) / self.mid
    }
}
