//! Long-only weight optimization.
//!
//! Builds the objective for the requested [`Objective`] over a returns
//! matrix and hands it to any [`ConstrainedMinimizer`] with the constraints
//! `0 ≤ w_i ≤ 1` and `Σ w_i = 1`, starting from equal weights.
//!
//! | Objective | Minimized quantity |
//! |-----------|--------------------|
//! | `sharpe` | negative annualized Sharpe ratio |
//! | `vol` | annualized volatility |
//! | `mdd` | magnitude of max drawdown of the portfolio growth path |

use folio_core::ReturnsMatrix;
use folio_math::optimization::{ConstrainedMinimizer, ConstrainedProblem, OptimizationConfig};
use serde::{Deserialize, Serialize};

use crate::analytics::{max_drawdown_of_returns, ReturnStatistics};
use crate::error::{AnalyticsError, AnalyticsResult, DataStage};
use crate::types::{Objective, PortfolioMetrics, Weights};

/// How the solver run ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverDiagnostics {
    /// Backend name.
    pub backend: String,
    /// Whether the backend met its stopping criterion.
    pub converged: bool,
    /// Iterations used.
    pub iterations: u32,
    /// Objective value at the returned weights.
    pub objective_value: f64,
}

/// Optimized weights with their metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedPortfolio {
    /// One weight per ticker, in returns-matrix column order.
    pub weights: Weights,
    /// Annualized metrics at `weights`.
    pub metrics: PortfolioMetrics,
    /// Solver outcome.
    pub solver: SolverDiagnostics,
}

/// Finds long-only, fully invested weights minimizing `objective`.
///
/// A non-converged solver run is not an error: its best feasible point is
/// returned and [`SolverDiagnostics::converged`] is false.
///
/// # Errors
///
/// - `InsufficientData(Optimization)` with fewer than two assets or periods
/// - `Math` if the solver rejects the problem
pub fn optimize_weights(
    returns: &ReturnsMatrix,
    objective: Objective,
    risk_free_rate: f64,
    minimizer: &dyn ConstrainedMinimizer,
    config: &OptimizationConfig,
) -> AnalyticsResult<OptimizedPortfolio> {
    let n = returns.num_assets();
    if n < 2 {
        return Err(AnalyticsError::insufficient(
            DataStage::Optimization,
            format!("{n} assets with return history, need at least 2"),
        ));
    }

    let stats = ReturnStatistics::from_returns(returns)?;
    let problem = build_problem(&stats, returns.rows(), objective, risk_free_rate, n)?;

    log::debug!(
        "optimizing {} over {} assets and {} periods with {}",
        objective,
        n,
        returns.num_periods(),
        minimizer.name()
    );

    let result = minimizer.minimize(&problem, &problem.equal_weight(), config)?;
    if !result.converged {
        log::warn!(
            "{} did not converge after {} iterations, using best point",
            minimizer.name(),
            result.iterations
        );
    }

    Ok(OptimizedPortfolio {
        metrics: stats.metrics(&result.parameters, risk_free_rate),
        weights: Weights::new(returns.tickers(), &result.parameters),
        solver: SolverDiagnostics {
            backend: minimizer.name().to_string(),
            converged: result.converged,
            iterations: result.iterations,
            objective_value: result.objective_value,
        },
    })
}

fn build_problem(
    stats: &ReturnStatistics,
    rows: &[Vec<f64>],
    objective: Objective,
    risk_free_rate: f64,
    n: usize,
) -> AnalyticsResult<ConstrainedProblem> {
    let problem = match objective {
        Objective::Sharpe => {
            let stats = stats.clone();
            ConstrainedProblem::long_only(n, move |w: &[f64]| -stats.sharpe(w, risk_free_rate))?
        }
        Objective::Volatility => {
            let stats = stats.clone();
            ConstrainedProblem::long_only(n, move |w: &[f64]| stats.annualized_volatility(w))?
        }
        Objective::MaxDrawdown => {
            let rows = rows.to_vec();
            ConstrainedProblem::long_only(n, move |w: &[f64]| {
                let path: Vec<f64> = rows
                    .iter()
                    .map(|row| row.iter().zip(w).map(|(r, wi)| r * wi).sum())
                    .collect();
                max_drawdown_of_returns(&path).abs()
            })?
        }
    };
    Ok(problem)
}
