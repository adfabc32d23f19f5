//! Capacity decay — net performance as deployed capital grows.
//!
//! At each capital level the strategy's participation in daily volume is
//! `capital × daily_turnover / ADV`; the linear impact model turns that into
//! an annualized drag applied uniformly across periods. The ladder shows
//! where the edge collapses; the breakpoint against a Sharpe floor is the
//! maximum viable capital.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use edgelab_core::{AnalysisError, PerformanceMetrics};

/// Capital levels to evaluate, in dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityLadder {
    pub levels: Vec<f64>,
}

impl CapacityLadder {
    /// Log-spaced levels from `min` to `max` inclusive.
    pub fn log_spaced(min: f64, max: f64, steps: usize) -> Self {
        let steps = steps.max(2);
        let (lo, hi) = (min.ln(), max.ln());
        let levels = (0..steps)
            .map(|i| (lo + (hi - lo) * i as f64 / (steps - 1) as f64).exp())
            .collect();
        Self { levels }
    }
}

impl Default for CapacityLadder {
    /// $1M to $1B, 20 points.
    fn default() -> Self {
        Self::log_spaced(1e6, 1e9, 20)
    }
}

/// Net performance at one capital level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityLevelPoint {
    pub capital: f64,
    /// Annualized impact drag at this level, as a non-negative fraction.
    pub impact_drag: f64,
    pub annualized_return: f64,
    pub sharpe: Option<f64>,
    pub max_drawdown: f64,
}

/// Simulate net performance across the capital ladder, in parallel.
///
/// `daily_turnover` is mean |Δweight| per period; `avg_daily_dollar_volume`
/// must be positive (a no-volume market cannot absorb any capital).
pub fn simulate_capacity_decay(
    gross: &[f64],
    daily_turnover: f64,
    avg_daily_dollar_volume: f64,
    impact_coefficient: f64,
    periods_per_year: f64,
    ladder: &CapacityLadder,
) -> Result<Vec<CapacityLevelPoint>, AnalysisError> {
    if !(avg_daily_dollar_volume.is_finite() && avg_daily_dollar_volume > 0.0) {
        return Err(AnalysisError::InvalidConfig(format!(
            "avg_daily_dollar_volume must be positive and finite, got {avg_daily_dollar_volume}"
        )));
    }
    if !(daily_turnover.is_finite() && daily_turnover >= 0.0) {
        return Err(AnalysisError::InvalidConfig(format!(
            "daily_turnover must be non-negative and finite, got {daily_turnover}"
        )));
    }

    ladder
        .levels
        .par_iter()
        .map(|&capital| {
            let participation = capital * daily_turnover / avg_daily_dollar_volume;
            let impact_drag = participation * impact_coefficient;
            let per_period_drag = impact_drag / periods_per_year;
            let net: Vec<f64> = gross.iter().map(|g| g - per_period_drag).collect();
            let m = PerformanceMetrics::compute(&net, periods_per_year, None)?;
            Ok(CapacityLevelPoint {
                capital,
                impact_drag,
                annualized_return: m.annualized_return,
                sharpe: m.sharpe,
                max_drawdown: m.max_drawdown,
            })
        })
        .collect()
}

/// Largest ladder level whose net Sharpe still clears the floor.
///
/// `None` when no level qualifies (the edge is below the floor even at the
/// smallest capital) or when Sharpe is undefined everywhere.
pub fn max_viable_capital(points: &[CapacityLevelPoint], sharpe_floor: f64) -> Option<f64> {
    points
        .iter()
        .filter(|p| p.sharpe.is_some_and(|s| s >= sharpe_floor))
        .map(|p| p.capital)
        .fold(None, |acc, c| Some(acc.map_or(c, |a: f64| a.max(c))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steady_gross(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| if i % 3 == 0 { -0.004 } else { 0.008 })
            .collect()
    }

    #[test]
    fn ladder_ends_are_exact() {
        let ladder = CapacityLadder::log_spaced(1e6, 1e9, 4);
        assert!((ladder.levels[0] - 1e6).abs() / 1e6 < 1e-12);
        assert!((ladder.levels[3] - 1e9).abs() / 1e9 < 1e-12);
    }

    #[test]
    fn drag_grows_with_capital_and_sharpe_shrinks() {
        let points = simulate_capacity_decay(
            &steady_gross(60),
            0.5,
            1e8,
            0.001,
            252.0,
            &CapacityLadder::default(),
        )
        .unwrap();

        for pair in points.windows(2) {
            assert!(pair[1].impact_drag >= pair[0].impact_drag);
            let (a, b) = (pair[0].sharpe.unwrap(), pair[1].sharpe.unwrap());
            assert!(b <= a + 1e-12);
        }
    }

    #[test]
    fn zero_turnover_strategy_never_decays() {
        let points = simulate_capacity_decay(
            &steady_gross(60),
            0.0,
            1e8,
            0.001,
            252.0,
            &CapacityLadder::default(),
        )
        .unwrap();
        let first = points.first().unwrap().sharpe.unwrap();
        assert!(points.iter().all(|p| p.impact_drag == 0.0));
        assert!(points
            .iter()
            .all(|p| (p.sharpe.unwrap() - first).abs() < 1e-12));
    }

    #[test]
    fn breakpoint_respects_the_floor() {
        let gross = steady_gross(60);
        let points =
            simulate_capacity_decay(&gross, 0.5, 1e8, 0.001, 252.0, &CapacityLadder::default())
                .unwrap();
        let base_sharpe = points[0].sharpe.unwrap();

        // A floor just under the small-capital Sharpe keeps some levels...
        let viable = max_viable_capital(&points, base_sharpe - 0.01).unwrap();
        assert!(viable >= 1e6);
        // ...an unreachable floor keeps none.
        assert_eq!(max_viable_capital(&points, base_sharpe + 100.0), None);
    }

    #[test]
    fn zero_volume_market_is_rejected() {
        assert!(matches!(
            simulate_capacity_decay(
                &steady_gross(10),
                0.5,
                0.0,
                0.001,
                252.0,
                &CapacityLadder::default()
            ),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
