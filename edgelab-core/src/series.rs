//! Series value objects — the immutable inputs and derived series of one
//! analysis pass.
//!
//! `PriceVolumeSeries` and `PositionSeries` are caller-owned and borrowed
//! read-only by every downstream stage. `TradeSeries` is derived per run and
//! never persisted. Constructors validate; once built, a series is known-good.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// One observation of market state: price and dollar volume on a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
    /// Dollar volume traded that period (price × shares).
    pub dollar_volume: f64,
}

/// Ordered price/volume observations with strictly increasing dates.
///
/// Gap tolerance is a caller concern: the series does not require
/// consecutive calendar dates, only strict ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceVolumeSeries {
    points: Vec<PricePoint>,
}

impl PriceVolumeSeries {
    /// Build a validated series.
    ///
    /// Rejects non-monotonic dates, non-positive or non-finite prices, and
    /// negative or non-finite dollar volume.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, AnalysisError> {
        for (i, p) in points.iter().enumerate() {
            if !p.price.is_finite() || p.price <= 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "price at index {i} must be positive and finite, got {}",
                    p.price
                )));
            }
            if !p.dollar_volume.is_finite() || p.dollar_volume < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "dollar volume at index {i} must be non-negative and finite, got {}",
                    p.dollar_volume
                )));
            }
            if i > 0 && points[i - 1].date >= p.date {
                return Err(AnalysisError::NonMonotonicTimestamps { index: i });
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }

    pub fn dollar_volumes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.dollar_volume)
    }

    /// Mean dollar volume over the whole series. 0.0 for an empty series.
    pub fn avg_daily_dollar_volume(&self) -> f64 {
        if self.points.is_empty() {
            return 0.0;
        }
        self.points.iter().map(|p| p.dollar_volume).sum::<f64>() / self.points.len() as f64
    }
}

/// One signal observation: signed position weight on a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionPoint {
    pub date: NaiveDate,
    /// Signed position weight in [-1, 1]. Positive = long, negative = short.
    pub weight: f64,
}

/// Ordered position weights with strictly increasing dates.
///
/// Produced by the external signal generator; consumed read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSeries {
    points: Vec<PositionPoint>,
}

impl PositionSeries {
    /// Build a validated series. Weights must be finite and within [-1, 1].
    pub fn new(points: Vec<PositionPoint>) -> Result<Self, AnalysisError> {
        for (i, p) in points.iter().enumerate() {
            if !p.weight.is_finite() || p.weight.abs() > 1.0 {
                return Err(AnalysisError::InvalidWeight {
                    index: i,
                    weight: p.weight,
                });
            }
            if i > 0 && points[i - 1].date >= p.date {
                return Err(AnalysisError::NonMonotonicTimestamps { index: i });
            }
        }
        Ok(Self { points })
    }

    /// Convenience constructor for tests and synthetic runs: sequential
    /// business-agnostic dates starting at `start`.
    pub fn from_weights(start: NaiveDate, weights: &[f64]) -> Result<Self, AnalysisError> {
        let points = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| PositionPoint {
                date: start + chrono::Duration::days(i as i64),
                weight: w,
            })
            .collect();
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PositionPoint] {
        &self.points
    }

    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.weight)
    }

    /// Check one-to-one date alignment with a price/volume series.
    pub fn aligned_with(&self, prices: &PriceVolumeSeries) -> Result<(), AnalysisError> {
        if self.len() != prices.len() {
            return Err(AnalysisError::MisalignedSeries {
                context: "positions vs prices",
                expected: prices.len(),
                actual: self.len(),
            });
        }
        for (i, (pos, px)) in self.points.iter().zip(prices.points()).enumerate() {
            if pos.date != px.date {
                return Err(AnalysisError::MisalignedDates {
                    context: "positions vs prices",
                    index: i,
                });
            }
        }
        Ok(())
    }
}

/// Per-period absolute position change, same length as the position series
/// with a defined zero at t = 0.
///
/// Ephemeral: recomputed per analysis run, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSeries {
    trades: Vec<f64>,
}

impl TradeSeries {
    pub(crate) fn from_deltas(trades: Vec<f64>) -> Self {
        Self { trades }
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn trades(&self) -> &[f64] {
        &self.trades
    }

    /// Sum of absolute position changes over the whole series.
    pub fn total(&self) -> f64 {
        self.trades.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn market(days: &[u32]) -> Vec<PricePoint> {
        days.iter()
            .map(|&day| PricePoint {
                date: d(day),
                price: 100.0,
                dollar_volume: 1e8,
            })
            .collect()
    }

    #[test]
    fn accepts_strictly_increasing_dates() {
        assert!(PriceVolumeSeries::new(market(&[2, 3, 4])).is_ok());
    }

    #[test]
    fn rejects_duplicate_dates() {
        let err = PriceVolumeSeries::new(market(&[2, 2, 3])).unwrap_err();
        assert_eq!(err, AnalysisError::NonMonotonicTimestamps { index: 1 });
    }

    #[test]
    fn rejects_out_of_order_dates() {
        let err = PriceVolumeSeries::new(market(&[3, 2])).unwrap_err();
        assert_eq!(err, AnalysisError::NonMonotonicTimestamps { index: 1 });
    }

    #[test]
    fn rejects_non_positive_price() {
        let mut pts = market(&[2]);
        pts[0].price = 0.0;
        assert!(PriceVolumeSeries::new(pts).is_err());
    }

    #[test]
    fn rejects_weight_outside_convention() {
        let err = PositionSeries::from_weights(d(2), &[0.0, 1.5]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidWeight {
                index: 1,
                weight: 1.5
            }
        );
    }

    #[test]
    fn rejects_nan_weight() {
        assert!(PositionSeries::from_weights(d(2), &[f64::NAN]).is_err());
    }

    #[test]
    fn alignment_checks_length_and_dates() {
        let prices = PriceVolumeSeries::new(market(&[2, 3, 4])).unwrap();
        let positions = PositionSeries::from_weights(d(2), &[0.0, 1.0, 1.0]).unwrap();
        assert!(positions.aligned_with(&prices).is_ok());

        let short = PositionSeries::from_weights(d(2), &[0.0, 1.0]).unwrap();
        assert!(matches!(
            short.aligned_with(&prices),
            Err(AnalysisError::MisalignedSeries { .. })
        ));
    }
}
