//! Weights, objectives and portfolio metrics.

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::AnalyticsError;

/// Annualized return, volatility and Sharpe ratio of a weighted portfolio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// `(w·μ) × 252`.
    pub annualized_return: f64,
    /// `sqrt(wᵀΣw) × sqrt(252)`.
    pub annualized_volatility: f64,
    /// `(return − rf) / volatility`, 0 when volatility is 0.
    pub sharpe: f64,
}

/// Ticker weights in a fixed order.
///
/// Serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weights {
    entries: Vec<(String, f64)>,
}

impl Weights {
    /// Pairs tickers with weights, truncating to the shorter list.
    #[must_use]
    pub fn new(tickers: &[String], values: &[f64]) -> Self {
        Self {
            entries: tickers.iter().cloned().zip(values.iter().copied()).collect(),
        }
    }

    /// Number of tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no weights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight for a ticker.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.entries.iter().find(|(t, _)| t == ticker).map(|(_, w)| *w)
    }

    /// Tickers in order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Weights in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, w)| *w).collect()
    }

    /// (ticker, weight) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(t, w)| (t.as_str(), *w))
    }

    /// Sum of all weights.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

impl Serialize for Weights {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ticker, weight) in &self.entries {
            map.serialize_entry(ticker, weight)?;
        }
        map.end()
    }
}

/// Optimization objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// Maximize the Sharpe ratio.
    #[default]
    #[serde(rename = "sharpe")]
    Sharpe,
    /// Minimize annualized volatility.
    #[serde(rename = "vol")]
    Volatility,
    /// Minimize the magnitude of the maximum drawdown.
    #[serde(rename = "mdd")]
    MaxDrawdown,
}

impl Objective {
    /// Wire name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Sharpe => "sharpe",
            Objective::Volatility => "vol",
            Objective::MaxDrawdown => "mdd",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sharpe" => Ok(Objective::Sharpe),
            "vol" => Ok(Objective::Volatility),
            "mdd" => Ok(Objective::MaxDrawdown),
            other => Err(AnalyticsError::UnsupportedObjective(other.to_string())),
        }
    }
}
