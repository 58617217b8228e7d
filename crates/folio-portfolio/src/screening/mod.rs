//! Momentum screening of a ticker universe.
//!
//! Each ticker is scored by its trailing total return over the supplied
//! price window, `last / first − 1` on its own first and last observations.
//! Tickers with fewer than two observations are left out of the ranking.

use folio_core::PriceMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult, DataStage};

/// Trailing return of one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumScore {
    /// Instrument ticker.
    pub ticker: String,
    /// `last / first − 1` over the window.
    pub trailing_return: f64,
}

/// Scores every ticker with at least two observations, best first.
///
/// Ties keep the matrix column order.
#[must_use]
pub fn rank_by_momentum(prices: &PriceMatrix) -> Vec<MomentumScore> {
    let mut scores: Vec<MomentumScore> = prices
        .tickers()
        .iter()
        .filter_map(|ticker| {
            let observations = prices.observations(ticker);
            if observations.len() < 2 {
                return None;
            }
            let first = observations.first()?.1;
            let last = observations.last()?.1;
            let trailing_return = last / first - 1.0;
            trailing_return.is_finite().then(|| MomentumScore {
                ticker: ticker.clone(),
                trailing_return,
            })
        })
        .collect();

    scores.sort_by(|a, b| b.trailing_return.total_cmp(&a.trailing_return));
    scores
}

/// Picks the `count` strongest tickers from a ranking window.
///
/// # Errors
///
/// - `UnavailablePriceData` if the window holds no prices at all
/// - `InsufficientData(Ranking)` if it has fewer than two dated rows, or
///   fewer than two tickers survive ranking and selection
pub fn select_top(prices: &PriceMatrix, count: usize) -> AnalyticsResult<Vec<MomentumScore>> {
    if prices.is_empty() {
        return Err(AnalyticsError::unavailable("no prices in the ranking window"));
    }
    if prices.num_rows() < 2 {
        return Err(AnalyticsError::insufficient(
            DataStage::Ranking,
            format!("{} price rows in the ranking window, need at least 2", prices.num_rows()),
        ));
    }

    let mut ranked = rank_by_momentum(prices);
    ranked.truncate(count);
    if ranked.len() < 2 {
        return Err(AnalyticsError::insufficient(
            DataStage::Ranking,
            format!("{} tickers left after ranking, need at least 2", ranked.len()),
        ));
    }
    Ok(ranked)
}
