//! Artifact export — JSON reports and CSV curves.
//!
//! Every persisted report carries a `schema_version`; loaders reject
//! artifacts written by a newer schema rather than misreading them.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::analysis::{TradabilityReport, SCHEMA_VERSION};
use crate::capacity_decay::CapacityLevelPoint;
use crate::sweep::CostLevelPoint;

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a report to pretty JSON.
pub fn export_report_json(report: &TradabilityReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize TradabilityReport to JSON")
}

/// Deserialize a report, rejecting unknown schema versions.
pub fn import_report_json(json: &str) -> Result<TradabilityReport> {
    let report: TradabilityReport =
        serde_json::from_str(json).context("failed to deserialize TradabilityReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

/// Write `{run_id}.json` into `dir`, creating it if needed.
/// Returns the path written.
pub fn save_report(report: &TradabilityReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output dir {}", dir.display()))?;
    let path = dir.join(format!("{}.json", report.run_id));
    std::fs::write(&path, export_report_json(report)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Cost-sensitivity curve as CSV.
///
/// Columns: cost_per_trade, annualized_return, sharpe, max_drawdown.
/// An undefined Sharpe is an empty cell, never a zero.
pub fn export_cost_curve_csv(points: &[CostLevelPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["cost_per_trade", "annualized_return", "sharpe", "max_drawdown"])?;
    for p in points {
        wtr.write_record([
            format!("{:.8}", p.cost_per_trade),
            format!("{:.8}", p.annualized_return),
            p.sharpe.map_or(String::new(), |s| format!("{s:.6}")),
            format!("{:.8}", p.max_drawdown),
        ])?;
    }
    finish(wtr)
}

/// Capacity-decay curve as CSV.
///
/// Columns: capital, impact_drag, annualized_return, sharpe, max_drawdown.
pub fn export_capacity_curve_csv(points: &[CapacityLevelPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "capital",
        "impact_drag",
        "annualized_return",
        "sharpe",
        "max_drawdown",
    ])?;
    for p in points {
        wtr.write_record([
            format!("{:.2}", p.capital),
            format!("{:.10}", p.impact_drag),
            format!("{:.8}", p.annualized_return),
            p.sharpe.map_or(String::new(), |s| format!("{s:.6}")),
            format!("{:.8}", p.max_drawdown),
        ])?;
    }
    finish(wtr)
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<CostLevelPoint> {
        vec![
            CostLevelPoint {
                cost_per_trade: 0.0,
                annualized_return: 0.12,
                sharpe: Some(1.5),
                max_drawdown: -0.08,
            },
            CostLevelPoint {
                cost_per_trade: 0.005,
                annualized_return: 0.0,
                sharpe: None,
                max_drawdown: -0.20,
            },
        ]
    }

    #[test]
    fn cost_curve_csv_has_header_and_rows() {
        let csv = export_cost_curve_csv(&sample_points()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("cost_per_trade,annualized_return,sharpe,max_drawdown")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn undefined_sharpe_is_an_empty_cell() {
        let csv = export_cost_curve_csv(&sample_points()).unwrap();
        let row = csv.lines().nth(2).unwrap();
        let cells: Vec<&str> = row.split(',').collect();
        assert_eq!(cells[2], "");
    }
}
