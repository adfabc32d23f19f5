//! Turnover accounting — position deltas and the annualized turnover scalar.
//!
//! Turnover is the transmission mechanism between the gross and net regimes:
//! every unit of |Δweight| is a unit of notional that pays friction.

use crate::error::AnalysisError;
use crate::series::{PositionSeries, TradeSeries};

/// Convert a position series into a trade series and annualized turnover.
///
/// The trade series has the same length as the position series with a
/// defined zero at t = 0 (entering the first position is not charged;
/// there is no prior weight to rebalance from).
///
/// `annualized_turnover = Σ|Δweight| × periods_per_year / n_periods`.
/// A constant-position series yields exactly 0.0, which downstream stages
/// must treat as "costs never bind" rather than divide by.
///
/// Requires at least 2 observations.
pub fn compute_turnover(
    positions: &PositionSeries,
    periods_per_year: f64,
) -> Result<(TradeSeries, f64), AnalysisError> {
    if positions.len() < 2 {
        return Err(AnalysisError::InsufficientHistory {
            required: 2,
            actual: positions.len(),
        });
    }
    if !(periods_per_year.is_finite() && periods_per_year > 0.0) {
        return Err(AnalysisError::InvalidConfig(format!(
            "periods_per_year must be positive and finite, got {periods_per_year}"
        )));
    }

    let weights: Vec<f64> = positions.weights().collect();
    let mut deltas = Vec::with_capacity(weights.len());
    deltas.push(0.0);
    for w in weights.windows(2) {
        deltas.push((w[1] - w[0]).abs());
    }

    let trades = TradeSeries::from_deltas(deltas);
    let annualized = trades.total() * periods_per_year / trades.len() as f64;

    Ok((trades, annualized))
}

/// Mean |Δweight| per period, i.e. annualized turnover divided back down.
/// Used by the capacity estimator.
pub fn daily_turnover(annualized_turnover: f64, periods_per_year: f64) -> f64 {
    if periods_per_year <= 0.0 {
        return 0.0;
    }
    annualized_turnover / periods_per_year
}
