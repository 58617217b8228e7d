//! Nelder-Mead backend built on argmin.

use argmin::core::{CostFunction, Executor, State, TerminationReason};
use argmin::solver::neldermead::NelderMead;

use super::{ConstrainedMinimizer, ConstrainedProblem, OptimizationConfig, OptimizationResult};
use crate::error::{MathError, MathResult};

/// Derivative-free Nelder-Mead on the projected objective.
///
/// The simplex moves freely; each vertex is scored at its projection onto
/// the feasible set plus a quadratic penalty on the distance to it, which
/// keeps the search near the constraint surface. The reported parameters
/// are the projection of the best vertex.
#[derive(Debug, Clone, Copy)]
pub struct SimplexNelderMead {
    /// Edge length of the initial simplex.
    pub initial_step: f64,
    /// Weight of the distance-to-feasible penalty.
    pub penalty: f64,
}

impl Default for SimplexNelderMead {
    fn default() -> Self {
        Self {
            initial_step: 0.05,
            penalty: 1e3,
        }
    }
}

struct ProjectedCost {
    problem: ConstrainedProblem,
    penalty: f64,
}

impl CostFunction for ProjectedCost {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, x: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let feasible = self.problem.project(x);
        let distance: f64 = x.iter().zip(&feasible).map(|(a, b)| (a - b).powi(2)).sum();
        Ok(self.problem.evaluate(&feasible) + self.penalty * distance)
    }
}

impl ConstrainedMinimizer for SimplexNelderMead {
    fn minimize(
        &self,
        problem: &ConstrainedProblem,
        initial: &[f64],
        config: &OptimizationConfig,
    ) -> MathResult<OptimizationResult> {
        let n = problem.dimension();
        if initial.len() != n {
            return Err(MathError::dimension_mismatch(n, initial.len()));
        }

        let x0 = problem.project(initial);
        let mut simplex = Vec::with_capacity(n + 1);
        simplex.push(x0.clone());
        for i in 0..n {
            let mut point = x0.clone();
            point[i] += self.initial_step;
            simplex.push(point);
        }

        let failure = |e: argmin::core::Error| MathError::SolverFailure {
            solver: "nelder_mead",
            reason: e.to_string(),
        };

        let solver = NelderMead::new(simplex)
            .with_sd_tolerance(config.tolerance)
            .map_err(failure)?;
        let cost = ProjectedCost {
            problem: problem.clone(),
            penalty: self.penalty,
        };
        let res = Executor::new(cost, solver)
            .configure(|state| state.max_iters(u64::from(config.max_iterations)))
            .run()
            .map_err(failure)?;

        let converged = matches!(
            res.state.get_termination_reason(),
            Some(TerminationReason::SolverConverged)
        );
        let iterations = u32::try_from(res.state.get_iter()).unwrap_or(u32::MAX);
        let best = res.state.best_param.clone().unwrap_or(x0);
        let parameters = problem.project(&best);
        let objective_value = problem.evaluate(&parameters);

        if converged {
            log::debug!("nelder-mead converged in {iterations} iterations, f = {objective_value:.6e}");
        } else {
            log::warn!("nelder-mead stopped without convergence after {iterations} iterations");
        }

        Ok(OptimizationResult {
            parameters,
            objective_value,
            iterations,
            converged,
        })
    }

    fn name(&self) -> &'static str {
        "nelder_mead"
    }
}
