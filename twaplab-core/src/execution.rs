//! Fill simulator — matches scheduled child orders against the quote stream.
//!
//! Each target timestamp is matched to the quote with minimum absolute time
//! distance (earlier quote wins exact ties), then filled at the ask adjusted
//! by a Gaussian slippage draw. Execution always lifts the ask: this models
//! a one-directional buy program.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::domain::{ExecutionPlan, Fill, Quote};

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("empty market data: no quotes available to match fills against")]
    EmptyMarketData,

    #[error("invalid configuration: slippage std must be non-negative (got {0})")]
    NegativeSlippageStd(f64),
}

/// Simulate execution of `plan` against `quotes`.
///
/// `quotes` must be ordered by timestamp ascending (the price process
/// guarantees this); matching binary-searches the stream, so behavior is
/// identical to the naive linear nearest-neighbor scan. Fills come back in
/// target-timestamp order, one per slice.
pub fn execute_plan<R: Rng>(
    plan: &ExecutionPlan,
    quotes: &[Quote],
    slippage_std: f64,
    rng: &mut R,
) -> Result<Vec<Fill>, ExecutionError> {
    if quotes.is_empty() {
        return Err(ExecutionError::EmptyMarketData);
    }
    if slippage_std < 0.0 {
        return Err(ExecutionError::NegativeSlippageStd(slippage_std));
    }
    // Validated non-negative above, so construction cannot fail.
    let slippage_dist = Normal::new(0.0, slippage_std).expect("validated slippage std");

    let fills = plan
        .target_timestamps
        .iter()
        .map(|&target| {
            let quote = nearest_quote(quotes, target);
            let slippage = slippage_dist.sample(rng);
            Fill {
                timestamp: target,
                quote_timestamp: quote.timestamp,
                size: plan.slice_size,
                price: quote.ask * (1.0 + slippage),
                mid_price_reference: quote.mid,
                slippage,
            }
        })
        .collect();

    Ok(fills)
}

/// Quote with minimum |timestamp - target|; the earlier quote wins ties.
fn nearest_quote(quotes: &[Quote], target: chrono::DateTime<chrono::Utc>) -> &Quote {
    // First quote at or after the target.
    let idx = quotes.partition_point(|q| q.timestamp < target);

    match idx {
        0 => &quotes[0],
        i if i == quotes.len() => &quotes[i - 1],
        i => {
            let before = &quotes[i - 1];
            let after = &quotes[i];
            // Strict inequality: on an exact tie the earlier quote wins.
            if after.timestamp - target < target - before.timestamp {
                after
            } else {
                before
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::build_plan;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 14, 30, 0).unwrap()
    }

    fn quote_at(offset_secs: i64, ask: f64) -> Quote {
        Quote {
            timestamp: t0() + Duration::seconds(offset_secs),
            bid: ask - 0.02,
            ask,
            mid: ask - 0.01,
            volume: 100.0,
        }
    }

    #[test]
    fn empty_quote_stream_fails() {
        let plan = build_plan(100.0, t0(), t0() + Duration::seconds(60), 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = execute_plan(&plan, &[], 0.0001, &mut rng);
        assert!(matches!(result, Err(ExecutionError::EmptyMarketData)));
    }

    #[test]
    fn negative_slippage_std_fails() {
        let plan = build_plan(100.0, t0(), t0() + Duration::seconds(60), 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = execute_plan(&plan, &[quote_at(0, 100.0)], -0.1, &mut rng);
        assert!(matches!(result, Err(ExecutionError::NegativeSlippageStd(_))));
    }

    #[test]
    fn zero_slippage_fills_exactly_at_ask() {
        let quotes: Vec<Quote> = (0..60).map(|s| quote_at(s, 100.0 + s as f64)).collect();
        let plan = build_plan(100.0, t0(), t0() + Duration::seconds(60), 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let fills = execute_plan(&plan, &quotes, 0.0, &mut rng).unwrap();
        assert_eq!(fills.len(), 4);
        for fill in &fills {
            assert_eq!(fill.slippage, 0.0);
            let matched = quotes
                .iter()
                .find(|q| q.timestamp == fill.quote_timestamp)
                .unwrap();
            assert_eq!(fill.price, matched.ask);
            assert_eq!(fill.mid_price_reference, matched.mid);
        }
    }

    #[test]
    fn single_quote_matches_every_slice() {
        let quotes = vec![quote_at(30, 101.5)];
        let plan = build_plan(100.0, t0(), t0() + Duration::seconds(60), 5).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let fills = execute_plan(&plan, &quotes, 0.0, &mut rng).unwrap();
        for fill in &fills {
            assert_eq!(fill.quote_timestamp, quotes[0].timestamp);
            assert_eq!(fill.price, 101.5);
        }
    }

    #[test]
    fn exact_tie_matches_earlier_quote() {
        // Quotes at t+0 and t+2; target at t+1 is equidistant.
        let quotes = vec![quote_at(0, 100.0), quote_at(2, 200.0)];
        let target = t0() + Duration::seconds(1);
        assert_eq!(nearest_quote(&quotes, target).timestamp, quotes[0].timestamp);
    }

    #[test]
    fn targets_outside_the_stream_clamp_to_endpoints() {
        let quotes = vec![quote_at(10, 100.0), quote_at(20, 101.0)];
        assert_eq!(
            nearest_quote(&quotes, t0()).timestamp,
            quotes[0].timestamp
        );
        assert_eq!(
            nearest_quote(&quotes, t0() + Duration::seconds(300)).timestamp,
            quotes[1].timestamp
        );
    }

    #[test]
    fn matching_is_idempotent_under_a_fixed_seed() {
        let quotes: Vec<Quote> = (0..120).map(|s| quote_at(s, 100.0 + (s % 7) as f64)).collect();
        let plan = build_plan(1000.0, t0(), t0() + Duration::seconds(120), 6).unwrap();

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let fills_a = execute_plan(&plan, &quotes, 0.0001, &mut rng_a).unwrap();
        let fills_b = execute_plan(&plan, &quotes, 0.0001, &mut rng_b).unwrap();
        assert_eq!(fills_a, fills_b);
    }

    #[test]
    fn fill_sizes_sum_to_total() {
        let quotes: Vec<Quote> = (0..60).map(|s| quote_at(s, 100.0)).collect();
        let plan = build_plan(1000.0, t0(), t0() + Duration::seconds(60), 7).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let fills = execute_plan(&plan, &quotes, 0.0001, &mut rng).unwrap();
        let total: f64 = fills.iter().map(|f| f.size).sum();
        assert!((total - 1000.0).abs() < 1e-9);
    }
}
