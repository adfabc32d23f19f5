//! Cost-sensitivity sweep — net performance across a grid of cost levels.
//!
//! Each grid point reduces the cost model to the same single parameter the
//! break-even solver uses (`c × |Δweight|` per period) and recomputes net
//! metrics. Points are independent, so the grid evaluates in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use edgelab_core::{net_returns, AnalysisError, PerformanceMetrics, TradeSeries};

/// Grid of cost-per-unit-traded levels to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostGrid {
    pub levels: Vec<f64>,
}

impl CostGrid {
    /// Evenly spaced levels from 0 to `max_cost` inclusive.
    pub fn linear(max_cost: f64, steps: usize) -> Self {
        let steps = steps.max(2);
        let levels = (0..steps)
            .map(|i| max_cost * i as f64 / (steps - 1) as f64)
            .collect();
        Self { levels }
    }
}

impl Default for CostGrid {
    /// 0 to 1% per unit traded, 50 points.
    fn default() -> Self {
        Self::linear(0.01, 50)
    }
}

/// Net performance at one cost level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLevelPoint {
    pub cost_per_trade: f64,
    pub annualized_return: f64,
    pub sharpe: Option<f64>,
    pub max_drawdown: f64,
}

/// Evaluate net metrics at every grid level, in parallel.
pub fn cost_sensitivity(
    gross: &[f64],
    trades: &TradeSeries,
    periods_per_year: f64,
    grid: &CostGrid,
) -> Result<Vec<CostLevelPoint>, AnalysisError> {
    if gross.len() != trades.len() {
        return Err(AnalysisError::MisalignedSeries {
            context: "gross returns vs trades",
            expected: trades.len(),
            actual: gross.len(),
        });
    }

    grid.levels
        .par_iter()
        .map(|&cost| {
            let costs: Vec<f64> = trades.trades().iter().map(|t| cost * t).collect();
            let net = net_returns(gross, &costs)?;
            let m = PerformanceMetrics::compute(&net, periods_per_year, None)?;
            Ok(CostLevelPoint {
                cost_per_trade: cost,
                annualized_return: m.annualized_return,
                sharpe: m.sharpe,
                max_drawdown: m.max_drawdown,
            })
        })
        .collect()
}
