//! CSV ingestion — the upstream collaborator role of the pipeline.
//!
//! Two input files per analysis:
//! - market: `date,price,dollar_volume` (one row per period)
//! - positions: `date,weight` (aligned one-to-one with the market file)
//!
//! Gross returns are computed here, not in the core: the return over period
//! t is the weight entering it times the price move, with a defined zero at
//! t = 0. The core only ever sees already-aligned series.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use edgelab_core::{
    AnalysisError, PositionPoint, PositionSeries, PricePoint, PriceVolumeSeries,
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read or parse {path}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Series(#[from] AnalysisError),
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    date: NaiveDate,
    price: f64,
    dollar_volume: f64,
}

#[derive(Debug, Deserialize)]
struct PositionRow {
    date: NaiveDate,
    weight: f64,
}

/// Aligned inputs for one analysis pass.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub market: PriceVolumeSeries,
    pub positions: PositionSeries,
    pub gross_returns: Vec<f64>,
}

/// Load a market CSV (`date,price,dollar_volume`).
pub fn load_market_csv(path: &Path) -> Result<PriceVolumeSeries, LoadError> {
    let rows: Vec<MarketRow> = read_rows(path)?;
    let points = rows
        .into_iter()
        .map(|r| PricePoint {
            date: r.date,
            price: r.price,
            dollar_volume: r.dollar_volume,
        })
        .collect();
    Ok(PriceVolumeSeries::new(points)?)
}

/// Load a positions CSV (`date,weight`).
pub fn load_positions_csv(path: &Path) -> Result<PositionSeries, LoadError> {
    let rows: Vec<PositionRow> = read_rows(path)?;
    let points = rows
        .into_iter()
        .map(|r| PositionPoint {
            date: r.date,
            weight: r.weight,
        })
        .collect();
    Ok(PositionSeries::new(points)?)
}

/// Load both files and derive gross returns.
pub fn load_series(market_path: &Path, positions_path: &Path) -> Result<LoadedSeries, LoadError> {
    let market = load_market_csv(market_path)?;
    let positions = load_positions_csv(positions_path)?;
    positions.aligned_with(&market)?;
    let gross_returns = gross_returns(&market, &positions);
    Ok(LoadedSeries {
        market,
        positions,
        gross_returns,
    })
}

/// Gross return over period t: weight entering the period times the simple
/// price return, zero at t = 0. Assumes the series are aligned.
pub fn gross_returns(market: &PriceVolumeSeries, positions: &PositionSeries) -> Vec<f64> {
    let prices: Vec<f64> = market.prices().collect();
    let weights: Vec<f64> = positions.weights().collect();
    let mut gross = Vec::with_capacity(prices.len());
    gross.push(0.0);
    for t in 1..prices.len() {
        gross.push(weights[t - 1] * (prices[t] / prices[t - 1] - 1.0));
    }
    gross
}

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| LoadError::Csv {
        path: path.display().to_string(),
        source,
    })?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| LoadError::Csv {
            path: path.display().to_string(),
            source,
        })
}
