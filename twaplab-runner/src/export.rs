//! Result export — JSON and CSV artifact generation.
//!
//! Two export formats for simulation results:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: fill and quote tapes for external analysis tools
//!
//! The persisted JSON includes a `schema_version` field; unknown versions
//! are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use twaplab_core::domain::{Fill, Quote};

use crate::runner::{SimulationResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `SimulationResult` to pretty JSON.
pub fn export_json(result: &SimulationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize SimulationResult to JSON")
}

/// Deserialize a `SimulationResult` from JSON, rejecting unknown schema
/// versions.
pub fn import_json(json: &str) -> Result<SimulationResult> {
    let result: SimulationResult =
        serde_json::from_str(json).context("failed to deserialize SimulationResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the fill tape as CSV.
///
/// Columns: target_timestamp, quote_timestamp, size, price,
/// mid_price_reference, slippage
pub fn export_fills_csv(fills: &[Fill]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "target_timestamp",
        "quote_timestamp",
        "size",
        "price",
        "mid_price_reference",
        "slippage",
    ])?;

    for f in fills {
        wtr.write_record([
            &f.timestamp.to_rfc3339(),
            &f.quote_timestamp.to_rfc3339(),
            &format!("{:.6}", f.size),
            &format!("{:.6}", f.price),
            &format!("{:.6}", f.mid_price_reference),
            &format!("{:.8}", f.slippage),
        ])?;
    }

    let bytes = wtr.into_inner().context("failed to flush fills CSV")?;
    String::from_utf8(bytes).context("fills CSV is not valid UTF-8")
}

/// Export the quote tape as CSV.
///
/// Columns: timestamp, bid, mid, ask, volume
pub fn export_quotes_csv(quotes: &[Quote]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["timestamp", "bid", "mid", "ask", "volume"])?;

    for q in quotes {
        wtr.write_record([
            &q.timestamp.to_rfc3339(),
            &format!("{:.6}", q.bid),
            &format!("{:.6}", q.mid),
            &format!("{:.6}", q.ask),
            &format!("{:.4}", q.volume),
        ])?;
    }

    let bytes = wtr.into_inner().context("failed to flush quotes CSV")?;
    String::from_utf8(bytes).context("quotes CSV is not valid UTF-8")
}

// ─── Artifact directory ─────────────────────────────────────────────

/// Write the full artifact set (result.json, fills.csv, quotes.csv) under
/// `<output_dir>/<run_id prefix>/` and return the run directory.
pub fn save_artifacts(result: &SimulationResult, output_dir: &Path) -> Result<PathBuf> {
    // The full blake3 hex is unwieldy as a directory name; 12 chars is
    // plenty to avoid collisions between configs.
    let run_dir = output_dir.join(&result.run_id[..12.min(result.run_id.len())]);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir {}", run_dir.display()))?;

    std::fs::write(run_dir.join("result.json"), export_json(result)?)
        .context("failed to write result.json")?;
    std::fs::write(run_dir.join("fills.csv"), export_fills_csv(&result.fills)?)
        .context("failed to write fills.csv")?;
    std::fs::write(
        run_dir.join("quotes.csv"),
        export_quotes_csv(&result.quotes)?,
    )
    .context("failed to write quotes.csv")?;

    Ok(run_dir)
}
