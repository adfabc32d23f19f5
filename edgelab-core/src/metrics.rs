//! Performance metrics — pure functions that turn a return series into
//! risk-adjusted statistics.
//!
//! Every metric is a pure function: returns in, scalar out. Statistics that
//! can be undefined (Sharpe under zero volatility, hit rate with no directed
//! periods) are `Option<f64>`, never a zero standing in for "no answer".

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::volatility::sample_std;

/// Aggregate statistics for one return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Arithmetic mean return × periods per year.
    pub annualized_return: f64,
    /// Sample standard deviation × √(periods per year).
    pub annualized_volatility: f64,
    /// `None` when annualized volatility is numerically zero.
    pub sharpe: Option<f64>,
    /// Fraction of directed periods where the position was on the right
    /// side of the move. `None` when no period had a nonzero expected
    /// direction or no direction series was supplied.
    pub hit_rate: Option<f64>,
    /// Maximum peak-to-trough decline of the compounded cumulative curve.
    /// Always ≤ 0; exactly 0 only for a non-decreasing curve.
    pub max_drawdown: f64,
    /// Number of return observations used.
    pub sample_size: usize,
}

impl PerformanceMetrics {
    /// Compute all metrics from a return series.
    ///
    /// `expected_direction`, when supplied, must align one-to-one with
    /// `returns` (the position sign held over each period); it feeds the hit
    /// rate only. Requires at least 2 observations.
    pub fn compute(
        returns: &[f64],
        periods_per_year: f64,
        expected_direction: Option<&[f64]>,
    ) -> Result<Self, AnalysisError> {
        if returns.len() < 2 {
            return Err(AnalysisError::InsufficientHistory {
                required: 2,
                actual: returns.len(),
            });
        }
        if !(periods_per_year.is_finite() && periods_per_year > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "periods_per_year must be positive and finite, got {periods_per_year}"
            )));
        }
        if let Some(dir) = expected_direction {
            if dir.len() != returns.len() {
                return Err(AnalysisError::MisalignedSeries {
                    context: "returns vs expected direction",
                    expected: returns.len(),
                    actual: dir.len(),
                });
            }
        }

        let ann_return = annualized_return(returns, periods_per_year);
        let ann_vol = annualized_volatility(returns, periods_per_year);

        Ok(Self {
            annualized_return: ann_return,
            annualized_volatility: ann_vol,
            sharpe: sharpe_ratio(ann_return, ann_vol),
            hit_rate: expected_direction.and_then(|dir| hit_rate(returns, dir)),
            max_drawdown: max_drawdown(returns),
            sample_size: returns.len(),
        })
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Arithmetic annualization: mean(returns) × periods_per_year.
pub fn annualized_return(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64 * periods_per_year
}

/// Sample standard deviation × √(periods_per_year).
pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    sample_std(returns) * periods_per_year.sqrt()
}

/// Annualized return over annualized volatility, or `None` when volatility
/// is numerically zero. A constant return stream has direction but no
/// risk-adjusted magnitude; reporting 0.0 here would read as "no edge".
pub fn sharpe_ratio(annualized_return: f64, annualized_volatility: f64) -> Option<f64> {
    if annualized_volatility < 1e-15 {
        return None;
    }
    Some(annualized_return / annualized_volatility)
}

/// Fraction of directed periods where the call was right.
///
/// `returns` are position-signed strategy returns, so the held direction is
/// already embedded in the sign: a directed period counts as a hit exactly
/// when its return is positive — a short that earns on a falling asset is a
/// hit, a short that loses on a rising one is a miss.
///
/// Periods with zero expected direction (flat signal) are excluded from
/// both numerator and denominator. `None` when no period qualifies.
pub fn hit_rate(returns: &[f64], expected_direction: &[f64]) -> Option<f64> {
    let mut directed = 0_usize;
    let mut hits = 0_usize;
    for (&r, &d) in returns.iter().zip(expected_direction) {
        if d == 0.0 {
            continue;
        }
        directed += 1;
        if r > 0.0 {
            hits += 1;
        }
    }
    if directed == 0 {
        return None;
    }
    Some(hits as f64 / directed as f64)
}

/// Maximum peak-to-trough decline of the compounded cumulative curve.
///
/// Walks the curve `Π(1 + r)` tracking the running peak. The result is
/// ≤ 0 by construction and 0 only when the curve never declines.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let mut equity = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut max_dd = 0.0_f64;
    for &r in returns {
        equity *= 1.0 + r;
        if equity > peak {
            peak = equity;
        }
        let dd = (equity - peak) / peak;
        if dd < max_dd {
            max_dd = dd;
        }
    }
    max_dd
}
