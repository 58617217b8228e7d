//! Engine configuration.

use folio_math::optimization::{
    ConstrainedMinimizer, OptimizationConfig, ProjectedGradient, SimplexNelderMead,
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lookback windows, benchmark and solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Annual risk-free rate used in the Sharpe ratio.
    pub risk_free_rate: f64,
    /// Momentum ranking window, in months before the as-of date.
    pub ranking_lookback_months: u32,
    /// Optimization window, in years before the as-of date.
    pub optimization_lookback_years: u32,
    /// Benchmark history, in years before the as-of date.
    pub benchmark_lookback_years: u32,
    /// Benchmark index ticker.
    pub benchmark_ticker: String,
    /// Appended to universe symbols to form provider tickers.
    pub ticker_suffix: String,
    /// Days of history searched for a holding's current price.
    pub current_price_window_days: u32,
    /// Selection size when a request does not give one.
    pub default_num_stocks: usize,
    /// Solver settings.
    pub solver: SolverConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.0,
            ranking_lookback_months: 6,
            optimization_lookback_years: 1,
            benchmark_lookback_years: 5,
            benchmark_ticker: "^NSEI".to_string(),
            ticker_suffix: ".NS".to_string(),
            current_price_window_days: 5,
            default_num_stocks: 10,
            solver: SolverConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Checks that every window is non-empty and the rate is finite.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(EngineError::Config("risk_free_rate must be finite".into()));
        }
        for (name, value) in [
            ("ranking_lookback_months", self.ranking_lookback_months),
            ("optimization_lookback_years", self.optimization_lookback_years),
            ("benchmark_lookback_years", self.benchmark_lookback_years),
            ("current_price_window_days", self.current_price_window_days),
        ] {
            if value == 0 {
                return Err(EngineError::Config(format!("{name} must be positive")));
            }
        }
        if self.benchmark_ticker.trim().is_empty() {
            return Err(EngineError::Config("benchmark_ticker is empty".into()));
        }
        self.solver.validate()
    }
}

/// Constrained-optimization backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Projected gradient descent.
    #[default]
    ProjectedGradient,
    /// Nelder-Mead on the projected objective.
    NelderMead,
}

/// Solver selection and stopping rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Backend used for every optimization request.
    pub backend: SolverBackend,
    /// Convergence tolerance.
    pub tolerance: f64,
    /// Iteration cap.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let defaults = OptimizationConfig::default();
        Self {
            backend: SolverBackend::default(),
            tolerance: defaults.tolerance,
            max_iterations: defaults.max_iterations,
        }
    }
}

impl SolverConfig {
    fn validate(&self) -> EngineResult<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EngineError::Config("solver.tolerance must be positive".into()));
        }
        if self.max_iterations == 0 {
            return Err(EngineError::Config("solver.max_iterations must be positive".into()));
        }
        Ok(())
    }

    /// The configured backend.
    pub fn minimizer(&self) -> Box<dyn ConstrainedMinimizer> {
        match self.backend {
            SolverBackend::ProjectedGradient => Box::new(ProjectedGradient::default()),
            SolverBackend::NelderMead => Box::new(SimplexNelderMead::default()),
        }
    }

    /// Stopping rule for the backend.
    pub fn optimization_config(&self) -> OptimizationConfig {
        OptimizationConfig::default()
            .with_tolerance(self.tolerance)
            .with_max_iterations(self.max_iterations)
    }
}
