//! Price process — synthetic top-of-book quote generation.
//!
//! The mid price follows a multiplicative random walk: each tick draws a
//! relative shock from N(0, volatility) and applies `mid *= 1 + shock`.
//! Spread is drawn independently per tick from N(avg_spread, avg_spread/10)
//! and floored at zero so `bid <= mid <= ask` holds for every quote. Tick
//! volume is Exp-distributed with mean [`MEAN_TICK_VOLUME`], independent of
//! price.
//!
//! The process owns mutable state: repeated calls continue the walk rather
//! than regenerate it. Re-initialize to restart.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal};
use thiserror::Error;

use crate::domain::Quote;

/// Mean of the per-tick volume draw.
pub const MEAN_TICK_VOLUME: f64 = 100.0;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("initial mid price must be positive (got {0})")]
    NonPositiveInitialMid(f64),

    #[error("average spread must be non-negative (got {0})")]
    NegativeSpread(f64),

    #[error("volatility must be non-negative (got {0})")]
    NegativeVolatility(f64),

    #[error(
        "mid price became non-positive ({mid}) at {timestamp}; \
         volatility is too large for a multiplicative walk"
    )]
    NonPositiveMid {
        mid: f64,
        timestamp: DateTime<Utc>,
    },

    #[error("sampling interval must be positive (got {0})")]
    NonPositiveInterval(Duration),

    #[error("window end {end} must not precede start {start}")]
    WindowEndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// Synthetic top-of-book price process.
///
/// `avg_spread` and `volatility` are static configuration; `mid_price`
/// evolves tick to tick and is never reset mid-run.
#[derive(Debug, Clone)]
pub struct PriceProcess {
    mid_price: f64,
    noise: Normal<f64>,
    spread: Normal<f64>,
    volume: Exp<f64>,
}

impl PriceProcess {
    /// Validates parameters and pre-builds the tick distributions.
    ///
    /// Zero spread and zero volatility are accepted and yield a fully
    /// deterministic price path (bid == mid == ask every tick).
    pub fn new(initial_mid: f64, avg_spread: f64, volatility: f64) -> Result<Self, MarketError> {
        if initial_mid <= 0.0 {
            return Err(MarketError::NonPositiveInitialMid(initial_mid));
        }
        if avg_spread < 0.0 {
            return Err(MarketError::NegativeSpread(avg_spread));
        }
        if volatility < 0.0 {
            return Err(MarketError::NegativeVolatility(volatility));
        }

        // Inputs are validated non-negative, so construction cannot fail.
        let noise = Normal::new(0.0, volatility).expect("validated volatility");
        let spread = Normal::new(avg_spread, avg_spread / 10.0).expect("validated spread");
        let volume = Exp::new(1.0 / MEAN_TICK_VOLUME).expect("positive constant rate");

        Ok(Self {
            mid_price: initial_mid,
            noise,
            spread,
            volume,
        })
    }

    pub fn mid_price(&self) -> f64 {
        self.mid_price
    }

    /// Advance the walk one tick and emit the quote at `timestamp`.
    ///
    /// A walk that drives the mid non-positive is a fatal configuration
    /// error, never clamped.
    pub fn next_quote<R: Rng>(
        &mut self,
        timestamp: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Quote, MarketError> {
        let shock = self.noise.sample(rng);
        self.mid_price *= 1.0 + shock;
        if self.mid_price <= 0.0 {
            return Err(MarketError::NonPositiveMid {
                mid: self.mid_price,
                timestamp,
            });
        }

        // Floor pathological spread draws at zero so bid <= mid <= ask holds.
        let spread = self.spread.sample(rng).max(0.0);
        let volume = self.volume.sample(rng);

        Ok(Quote {
            timestamp,
            bid: self.mid_price * (1.0 - spread / 2.0),
            ask: self.mid_price * (1.0 + spread / 2.0),
            mid: self.mid_price,
            volume,
        })
    }

    /// Generate the quote stream from `start` through `end` inclusive at a
    /// fixed sampling interval.
    ///
    /// Tick count is `floor((end - start) / interval) + 1`; `start == end`
    /// yields a single quote.
    pub fn simulate<R: Rng>(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: Duration,
        rng: &mut R,
    ) -> Result<Vec<Quote>, MarketError> {
        if interval <= Duration::zero() {
            return Err(MarketError::NonPositiveInterval(interval));
        }
        if end < start {
            return Err(MarketError::WindowEndBeforeStart { start, end });
        }

        let mut quotes = Vec::new();
        let mut current = start;
        while current <= end {
            quotes.push(self.next_quote(current, rng)?);
            current += interval;
        }
        Ok(quotes)
    }
}
