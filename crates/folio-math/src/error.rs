//! Error types for mathematical operations.

use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during statistics and optimization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Vector or matrix lengths disagree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Bounds admit no point satisfying the sum constraint.
    #[error("Infeasible constraints: target sum {total} outside [{lower_sum}, {upper_sum}]")]
    Infeasible {
        /// Sum of lower bounds.
        lower_sum: f64,
        /// Sum of upper bounds.
        upper_sum: f64,
        /// Required sum.
        total: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// The optimization backend failed before producing a result.
    #[error("Solver failure ({solver}): {reason}")]
    SolverFailure {
        /// Backend name.
        solver: &'static str,
        /// Backend message.
        reason: String,
    },
}

impl MathError {
    /// Creates a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }
}
