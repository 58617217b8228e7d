//! Projected gradient descent.

use super::{ConstrainedMinimizer, ConstrainedProblem, OptimizationConfig, OptimizationResult};
use crate::error::{MathError, MathResult};
use crate::statistics::dot;

/// Projected gradient descent with Armijo backtracking.
///
/// Each iteration takes a central-difference gradient, steps against it,
/// and projects back onto the feasible set. The step grows after every
/// accepted move and halves on rejection.
///
/// Converges when any of these holds:
/// - the projected gradient step `P(x − ∇f) − x` is below `tolerance`
/// - the stationarity gap `∇f · (x − P(x − ∇f))` is below
///   `function_tolerance · (1 + |f|)`
/// - the objective change is below `function_tolerance · (1 + |f|)` and the
///   accepted move is below `tolerance`
///
/// The gap is non-negative and vanishes exactly at a KKT point. When
/// backtracking runs out of step the run is reported converged only if the
/// gap is already below `√function_tolerance · (1 + |f|)`, which separates
/// rounding-limited progress at an optimum from a stuck kink.
#[derive(Debug, Clone, Copy)]
pub struct ProjectedGradient {
    /// Sufficient-decrease constant for the Armijo test.
    pub armijo: f64,
    /// Relative objective change treated as stalled.
    pub function_tolerance: f64,
    /// Smallest trial step before giving up.
    pub min_step: f64,
    /// Largest trial step.
    pub max_step: f64,
}

impl Default for ProjectedGradient {
    fn default() -> Self {
        Self {
            armijo: 1e-4,
            function_tolerance: 1e-12,
            min_step: 1e-14,
            max_step: 1e6,
        }
    }
}

impl ProjectedGradient {
    fn gradient(problem: &ConstrainedProblem, x: &[f64], h: f64) -> Vec<f64> {
        let mut probe = x.to_vec();
        (0..x.len())
            .map(|i| {
                probe[i] = x[i] + h;
                let up = problem.evaluate(&probe);
                probe[i] = x[i] - h;
                let down = problem.evaluate(&probe);
                probe[i] = x[i];
                (up - down) / (2.0 * h)
            })
            .collect()
    }
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn stepped(x: &[f64], g: &[f64], step: f64) -> Vec<f64> {
    x.iter().zip(g).map(|(xi, gi)| xi - step * gi).collect()
}

impl ConstrainedMinimizer for ProjectedGradient {
    fn minimize(
        &self,
        problem: &ConstrainedProblem,
        initial: &[f64],
        config: &OptimizationConfig,
    ) -> MathResult<OptimizationResult> {
        if initial.len() != problem.dimension() {
            return Err(MathError::dimension_mismatch(problem.dimension(), initial.len()));
        }

        let mut x = problem.project(initial);
        let mut fx = problem.evaluate(&x);
        let mut step = 1.0;

        let done = |x: Vec<f64>, fx: f64, iterations: u32, converged: bool| -> MathResult<OptimizationResult> {
            if converged {
                log::debug!("projected gradient converged in {iterations} iterations, f = {fx:.6e}");
            } else {
                log::warn!("projected gradient stopped without convergence after {iterations} iterations, f = {fx:.6e}");
            }
            Ok(OptimizationResult {
                parameters: x,
                objective_value: fx,
                iterations,
                converged,
            })
        };

        for iteration in 0..config.max_iterations {
            let g = Self::gradient(problem, &x, config.step_size);
            if g.iter().any(|v| !v.is_finite()) {
                return done(x, fx, iteration, false);
            }

            // Unit projected-gradient step vanishes at a KKT point.
            let target = problem.project(&stepped(&x, &g, 1.0));
            let gap: f64 = g.iter().zip(x.iter().zip(&target)).map(|(gi, (xi, ti))| gi * (xi - ti)).sum();
            let scale = 1.0 + fx.abs();
            if max_abs_diff(&target, &x) < config.tolerance || gap <= self.function_tolerance * scale {
                return done(x, fx, iteration, true);
            }

            let (candidate, f_candidate) = loop {
                let candidate = problem.project(&stepped(&x, &g, step));
                let direction: Vec<f64> = candidate.iter().zip(&x).map(|(c, xi)| c - xi).collect();
                let f_candidate = problem.evaluate(&candidate);
                if f_candidate <= fx + self.armijo * dot(&g, &direction) {
                    break (candidate, f_candidate);
                }
                step *= 0.5;
                if step < self.min_step {
                    let stationary = gap <= self.function_tolerance.sqrt() * scale;
                    return done(x, fx, iteration, stationary);
                }
            };

            let moved = max_abs_diff(&candidate, &x);
            let change = (fx - f_candidate).abs();
            x = candidate;
            fx = f_candidate;

            if change <= self.function_tolerance * (1.0 + fx.abs()) && moved <= config.tolerance {
                return done(x, fx, iteration + 1, true);
            }
            step = (step * 2.0).min(self.max_step);
        }

        done(x, fx, config.max_iterations, false)
    }

    fn name(&self) -> &'static str {
        "projected_gradient"
    }
}
