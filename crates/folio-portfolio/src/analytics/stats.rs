//! Returns statistics and annualized metrics.
//!
//! Per-period mean and sample covariance of a [`ReturnsMatrix`], scaled to
//! a yearly basis with [`TRADING_DAYS_PER_YEAR`].

use folio_core::ReturnsMatrix;
use folio_math::statistics::{covariance_matrix, dot, mean_vector, quadratic_form};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult, DataStage};
use crate::types::PortfolioMetrics;

/// Trading periods per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Mean vector and covariance matrix of per-period returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatistics {
    mean: Vec<f64>,
    covariance: Vec<Vec<f64>>,
}

impl ReturnStatistics {
    /// Estimates statistics from a returns matrix.
    ///
    /// # Errors
    ///
    /// Fails with `InsufficientData` when there are fewer than two periods.
    pub fn from_returns(returns: &ReturnsMatrix) -> AnalyticsResult<Self> {
        Self::from_rows(returns.rows())
    }

    /// Estimates statistics from period-by-asset rows.
    ///
    /// # Errors
    ///
    /// Fails with `InsufficientData` when there are fewer than two rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> AnalyticsResult<Self> {
        if rows.len() < 2 {
            return Err(AnalyticsError::insufficient(
                DataStage::Optimization,
                format!("{} return periods, need at least 2", rows.len()),
            ));
        }
        Ok(Self {
            mean: mean_vector(rows)?,
            covariance: covariance_matrix(rows)?,
        })
    }

    /// Number of assets.
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.mean.len()
    }

    /// Per-period mean returns.
    #[must_use]
    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    /// Per-period covariance matrix.
    #[must_use]
    pub fn covariance(&self) -> &[Vec<f64>] {
        &self.covariance
    }

    /// `(w·μ) × 252`.
    #[must_use]
    pub fn annualized_return(&self, weights: &[f64]) -> f64 {
        dot(weights, &self.mean) * TRADING_DAYS_PER_YEAR
    }

    /// `sqrt(wᵀΣw) × sqrt(252)`.
    #[must_use]
    pub fn annualized_volatility(&self, weights: &[f64]) -> f64 {
        // Rounding can leave a tiny negative variance for near-singular Σ.
        quadratic_form(weights, &self.covariance).max(0.0).sqrt() * TRADING_DAYS_PER_YEAR.sqrt()
    }

    /// Sharpe ratio, 0 when volatility is 0.
    #[must_use]
    pub fn sharpe(&self, weights: &[f64], risk_free_rate: f64) -> f64 {
        self.metrics(weights, risk_free_rate).sharpe
    }

    /// All three metrics at `weights`.
    #[must_use]
    pub fn metrics(&self, weights: &[f64], risk_free_rate: f64) -> PortfolioMetrics {
        let annualized_return = self.annualized_return(weights);
        let annualized_volatility = self.annualized_volatility(weights);
        let sharpe = if annualized_volatility == 0.0 {
            0.0
        } else {
            (annualized_return - risk_free_rate) / annualized_volatility
        };
        PortfolioMetrics {
            annualized_return,
            annualized_volatility,
            sharpe,
        }
    }
}
