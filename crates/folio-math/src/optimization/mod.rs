//! Constrained minimization over a bounded hyperplane.
//!
//! A [`ConstrainedProblem`] pairs a scalar objective with per-variable
//! bounds `lo_i ≤ x_i ≤ hi_i` and one linear equality `Σ x_i = total`.
//! Backends implement [`ConstrainedMinimizer`] and are interchangeable:
//!
//! - [`ProjectedGradient`]: projected gradient descent with Armijo
//!   backtracking and numerical gradients (default)
//! - [`SimplexNelderMead`]: argmin's Nelder-Mead on the projected objective
//!
//! # Example
//!
//! ```rust
//! use folio_math::optimization::{
//!     ConstrainedMinimizer, ConstrainedProblem, OptimizationConfig, ProjectedGradient,
//! };
//!
//! // Minimize (x - 0.8)^2 + (y - 0.6)^2 with x + y = 1, 0 <= x, y <= 1
//! let problem = ConstrainedProblem::long_only(2, |w: &[f64]| {
//!     (w[0] - 0.8).powi(2) + (w[1] - 0.6).powi(2)
//! })
//! .unwrap();
//!
//! let result = ProjectedGradient::default()
//!     .minimize(&problem, &problem.equal_weight(), &OptimizationConfig::default())
//!     .unwrap();
//! assert!((result.parameters[0] - 0.6).abs() < 1e-6);
//! ```

mod nelder_mead;
mod projected_gradient;
mod projection;

pub use nelder_mead::SimplexNelderMead;
pub use projected_gradient::ProjectedGradient;
pub use projection::project_onto_bounded_simplex;

use std::fmt;
use std::sync::Arc;

use crate::error::{MathError, MathResult};

/// Shared scalar objective.
pub type Objective = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Step size for numerical gradients.
    pub step_size: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 1000,
            step_size: 1e-6,
        }
    }
}

impl OptimizationConfig {
    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of an optimization run.
///
/// Returned even when `converged` is false; the parameters are then the
/// best feasible point reached.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// An objective with box bounds and a sum-equality constraint.
#[derive(Clone)]
pub struct ConstrainedProblem {
    objective: Objective,
    lower: Vec<f64>,
    upper: Vec<f64>,
    total: f64,
}

impl fmt::Debug for ConstrainedProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedProblem")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("total", &self.total)
            .finish_non_exhaustive()
    }
}

impl ConstrainedProblem {
    /// Creates a problem with explicit bounds and target sum.
    ///
    /// # Errors
    ///
    /// Fails if bound vectors differ in length, are empty, cross, or the
    /// target sum is unreachable within the bounds.
    pub fn new<F>(objective: F, lower: Vec<f64>, upper: Vec<f64>, total: f64) -> MathResult<Self>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        if lower.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if lower.len() != upper.len() {
            return Err(MathError::dimension_mismatch(lower.len(), upper.len()));
        }
        if lower.iter().zip(&upper).any(|(lo, hi)| lo > hi || lo.is_nan() || hi.is_nan()) {
            return Err(MathError::invalid_input("lower bound exceeds upper bound"));
        }

        let lower_sum: f64 = lower.iter().sum();
        let upper_sum: f64 = upper.iter().sum();
        if total < lower_sum - 1e-12 || total > upper_sum + 1e-12 {
            return Err(MathError::Infeasible {
                lower_sum,
                upper_sum,
                total,
            });
        }

        Ok(Self {
            objective: Arc::new(objective),
            lower,
            upper,
            total,
        })
    }

    /// Long-only, fully invested: `0 ≤ x_i ≤ 1`, `Σ x_i = 1`.
    ///
    /// # Errors
    ///
    /// Fails if `n` is zero.
    pub fn long_only<F>(n: usize, objective: F) -> MathResult<Self>
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self::new(objective, vec![0.0; n], vec![1.0; n], 1.0)
    }

    /// Number of variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Required sum of the variables.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Objective value at `x`.
    #[must_use]
    pub fn evaluate(&self, x: &[f64]) -> f64 {
        (self.objective)(x)
    }

    /// Closest feasible point to `x` in Euclidean distance.
    #[must_use]
    pub fn project(&self, x: &[f64]) -> Vec<f64> {
        project_onto_bounded_simplex(x, &self.lower, &self.upper, self.total)
    }

    /// `total / n` in every coordinate, projected if the bounds exclude it.
    #[must_use]
    pub fn equal_weight(&self) -> Vec<f64> {
        let n = self.dimension();
        let x = vec![self.total / n as f64; n];
        if self.is_feasible(&x, 0.0) {
            x
        } else {
            self.project(&x)
        }
    }

    /// True if `x` respects the bounds and the sum within `tol`.
    #[must_use]
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(v, (lo, hi))| *v >= lo - tol && *v <= hi + tol)
            && (x.iter().sum::<f64>() - self.total).abs() <= tol.max(1e-12)
    }
}

/// A backend that minimizes a [`ConstrainedProblem`].
pub trait ConstrainedMinimizer: Send + Sync {
    /// Minimizes from `initial`, which need not be feasible.
    ///
    /// # Errors
    ///
    /// Fails on a length mismatch or a backend failure. Non-convergence is
    /// reported through [`OptimizationResult::converged`], not as an error.
    fn minimize(
        &self,
        problem: &ConstrainedProblem,
        initial: &[f64],
        config: &OptimizationConfig,
    ) -> MathResult<OptimizationResult>;

    /// Backend name.
    fn name(&self) -> &'static str;
}
