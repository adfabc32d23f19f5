//! Break-even cost solver — the cost-per-unit-traded at which net Sharpe
//! crosses zero.
//!
//! The solver reduces the full cost model to a single parameter c and
//! charges `c × |Δweight|` per period. With a sign change bracketed, a
//! bisection narrows to a crossing within tolerance. The bracket is widened
//! dynamically but every loop carries a hard ceiling; the solver always
//! terminates.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::metrics::{annualized_return, annualized_volatility, sharpe_ratio};
use crate::series::TradeSeries;

/// Tolerance, iteration, and bracket parameters for the root search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Bracket width, in cost units, at which the search stops.
    pub tolerance: f64,
    /// Hard ceiling on bisection iterations.
    pub max_iterations: usize,
    /// First upper bracket tried (0.1 = 10% of notional per unit traded).
    pub initial_upper: f64,
    /// Hard ceiling on bracket doublings while hunting a sign change.
    pub max_widenings: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-5,
            max_iterations: 100,
            initial_upper: 0.1,
            max_widenings: 60,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "solver tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if !(self.initial_upper.is_finite() && self.initial_upper > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "solver initial_upper must be positive and finite, got {}",
                self.initial_upper
            )));
        }
        if self.max_iterations == 0 {
            return Err(AnalysisError::InvalidConfig(
                "solver max_iterations must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of the break-even search. The reason a numeric answer is missing
/// is part of the result, never folded into 0, infinity, or NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BreakEven {
    /// Net Sharpe crosses zero at this cost per unit traded.
    Solved { cost: f64, iterations: usize },
    /// Iteration ceiling hit before the bracket narrowed to tolerance.
    /// Carries the best bracket midpoint; not a success.
    NotConverged { best_estimate: f64, iterations: usize },
    /// No sign change found below the widening ceiling.
    NoRootInRange { tested_upper: f64 },
    /// Zero turnover: costs never bind, no threshold exists.
    Undefined,
}

/// Find the cost-per-unit-traded at which net Sharpe equals zero.
///
/// - zero turnover → `BreakEven::Undefined` (distinct from a numeric zero)
/// - net Sharpe already ≤ 0 cost-free → `Solved { cost: 0.0 }` (the
///   crossing sits at or below zero cost; the edge is gone before friction)
/// - otherwise bisection on a dynamically widened bracket.
pub fn solve_break_even_cost(
    gross: &[f64],
    trades: &TradeSeries,
    annualized_turnover: f64,
    periods_per_year: f64,
    config: &SolverConfig,
) -> Result<BreakEven, AnalysisError> {
    config.validate()?;
    if gross.len() != trades.len() {
        return Err(AnalysisError::MisalignedSeries {
            context: "gross returns vs trades",
            expected: trades.len(),
            actual: gross.len(),
        });
    }
    if gross.len() < 2 {
        return Err(AnalysisError::InsufficientHistory {
            required: 2,
            actual: gross.len(),
        });
    }

    if annualized_turnover == 0.0 || trades.trades().iter().all(|&t| t == 0.0) {
        return Ok(BreakEven::Undefined);
    }

    let sharpe_at = |c: f64| net_sharpe(gross, trades.trades(), c, periods_per_year);

    if sharpe_at(0.0) <= 0.0 {
        return Ok(BreakEven::Solved {
            cost: 0.0,
            iterations: 0,
        });
    }

    // Widen until the upper bracket is unprofitable.
    let mut upper = config.initial_upper;
    let mut widenings = 0;
    loop {
        let s = sharpe_at(upper);
        if s < 0.0 {
            break;
        }
        if s == 0.0 {
            return Ok(BreakEven::Solved {
                cost: upper,
                iterations: 0,
            });
        }
        widenings += 1;
        if widenings > config.max_widenings {
            return Ok(BreakEven::NoRootInRange {
                tested_upper: upper,
            });
        }
        upper *= 2.0;
    }

    // Bisection: invariant sharpe(lower) > 0 > sharpe(upper).
    let mut lower = 0.0_f64;
    for iteration in 1..=config.max_iterations {
        let mid = 0.5 * (lower + upper);
        let s = sharpe_at(mid);
        if s == 0.0 {
            return Ok(BreakEven::Solved {
                cost: mid,
                iterations: iteration,
            });
        }
        if s > 0.0 {
            lower = mid;
        } else {
            upper = mid;
        }
        if upper - lower < config.tolerance {
            return Ok(BreakEven::Solved {
                cost: 0.5 * (lower + upper),
                iterations: iteration,
            });
        }
    }

    Ok(BreakEven::NotConverged {
        best_estimate: 0.5 * (lower + upper),
        iterations: config.max_iterations,
    })
}

/// Net Sharpe under the single-parameter cost series `c × |Δweight|`.
///
/// A degenerate zero-volatility net series is mapped to ±∞ by the sign of
/// its mean so the bisection keeps its bracket; the value never leaves
/// this function.
fn net_sharpe(gross: &[f64], trades: &[f64], c: f64, periods_per_year: f64) -> f64 {
    let net: Vec<f64> = gross
        .iter()
        .zip(trades)
        .map(|(g, t)| g - c * t)
        .collect();
    let ar = annualized_return(&net, periods_per_year);
    let av = annualized_volatility(&net, periods_per_year);
    match sharpe_ratio(ar, av) {
        Some(s) => s,
        None if ar > 0.0 => f64::INFINITY,
        None if ar < 0.0 => f64::NEG_INFINITY,
        None => 0.0,
    }
}
