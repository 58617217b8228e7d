//! Error types for portfolio analytics.
//!
//! Row-level anomalies (malformed rows, zero prices, unmapped tickers) are
//! never errors; they reduce the result set and show up in diagnostic
//! fields. The variants here are stage-level failures surfaced to callers.

use std::fmt;

use folio_core::CoreError;
use folio_math::MathError;
use thiserror::Error;

/// Result type for portfolio analytics.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Pipeline stage that lacked data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataStage {
    /// Momentum ranking of the universe.
    Ranking,
    /// Weight optimization.
    Optimization,
    /// Horizon return computation.
    Horizon,
}

impl fmt::Display for DataStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataStage::Ranking => "ranking",
            DataStage::Optimization => "optimization",
            DataStage::Horizon => "horizon",
        })
    }
}

/// Errors that can occur during portfolio analytics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Nothing usable to compute on.
    #[error("No valid {what} found")]
    EmptyInput {
        /// What was empty (holdings, tickers).
        what: String,
    },

    /// The price provider returned nothing for the request.
    #[error("Price data unavailable: {reason}")]
    UnavailablePriceData {
        /// Which request came back empty.
        reason: String,
    },

    /// A stage had too few observations or instruments.
    #[error("Insufficient data for {stage}: {reason}")]
    InsufficientData {
        /// The stage that failed.
        stage: DataStage,
        /// What was missing.
        reason: String,
    },

    /// Objective name not recognized.
    #[error("Unsupported objective '{0}' (expected sharpe, vol or mdd)")]
    UnsupportedObjective(String),

    /// Numerical failure in statistics or the solver.
    #[error(transparent)]
    Math(#[from] MathError),

    /// Malformed dated container.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalyticsError {
    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(what: impl Into<String>) -> Self {
        Self::EmptyInput { what: what.into() }
    }

    /// Create an unavailable price data error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::UnavailablePriceData {
            reason: reason.into(),
        }
    }

    /// Create an insufficient data error.
    #[must_use]
    pub fn insufficient(stage: DataStage, reason: impl Into<String>) -> Self {
        Self::InsufficientData {
            stage,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::insufficient(DataStage::Ranking, "1 ticker left");
        assert_eq!(err.to_string(), "Insufficient data for ranking: 1 ticker left");

        let err = AnalyticsError::UnsupportedObjective("sortino".into());
        assert!(err.to_string().contains("sortino"));

        let err = AnalyticsError::empty_input("holdings");
        assert_eq!(err.to_string(), "No valid holdings found");
    }

    #[test]
    fn test_from_math_error() {
        let err: AnalyticsError = MathError::insufficient_data(2, 1).into();
        assert!(matches!(err, AnalyticsError::Math(_)));
    }
}
