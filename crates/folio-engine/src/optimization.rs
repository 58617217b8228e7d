//! Optimization requests.
//!
//! Pipeline: filter the universe, rank it by trailing return over the
//! ranking window, optimize weights for the top names over the optimization
//! window, then compare the weighted portfolio with the benchmark index.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use folio_core::Date;
use folio_portfolio::{
    compare_to_benchmark, optimize_weights, select_top, AnalyticsError, BenchmarkComparison,
    ChartSeries, DataStage, Horizon, Objective, PortfolioMetrics, SolverDiagnostics, Weights,
};
use folio_traits::market_data::DateRange;
use folio_traits::reference_data::{UniverseEntry, DEFAULT_ASSET_CLASS};

use crate::error::EngineResult;
use crate::universe::filter_universe;
use crate::AnalyticsEngine;

/// Sector shown for tickers missing from the universe.
const UNKNOWN_SECTOR: &str = "Unknown";

/// Optimization request body. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeRequest {
    /// Keep universe entries in these sectors.
    pub sectors: Vec<String>,
    /// Keep universe entries in these asset classes.
    pub asset_classes: Vec<String>,
    /// How many top-ranked tickers to optimize over.
    pub num_stocks: Option<usize>,
    /// `sharpe`, `vol` or `mdd`.
    pub objective: Option<String>,
}

/// One row of the enriched weight table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightRow {
    /// Provider ticker.
    pub ticker: String,
    /// Exchange symbol.
    pub symbol: String,
    /// Sector from the universe.
    pub sector: String,
    /// Asset class from the universe.
    pub asset_class: String,
    /// Optimized weight.
    pub weight: f64,
}

/// Portfolio and benchmark return over one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BenchmarkPair {
    /// Portfolio return.
    #[serde(rename = "Portfolio")]
    pub portfolio: Option<f64>,
    /// Benchmark return.
    #[serde(rename = "Nifty")]
    pub benchmark: Option<f64>,
}

/// Chart series for one horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    /// Shared dates.
    pub dates: Vec<Date>,
    /// Portfolio growth index.
    pub portfolio: Vec<f64>,
    /// Benchmark growth index.
    #[serde(rename = "nifty")]
    pub benchmark: Vec<f64>,
}

impl From<&ChartSeries> for ChartPayload {
    fn from(series: &ChartSeries) -> Self {
        Self {
            dates: series.dates.clone(),
            portfolio: series.portfolio.clone(),
            benchmark: series.benchmark.clone(),
        }
    }
}

/// Optimization response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    /// Ranked selection, best trailing return first.
    pub selected_stocks: Vec<String>,
    /// Optimized weight per ticker.
    pub weights: Weights,
    /// Weights with universe metadata.
    pub weight_table: Vec<WeightRow>,
    /// Annualized metrics at the optimized weights.
    pub metrics: PortfolioMetrics,
    /// Returns per horizon.
    pub benchmark_returns: BTreeMap<Horizon, BenchmarkPair>,
    /// Aligned growth indices per horizon.
    pub chart_data: BTreeMap<Horizon, ChartPayload>,
    /// Solver outcome.
    pub solver: SolverDiagnostics,
}

fn weight_table(weights: &Weights, universe: &[UniverseEntry]) -> Vec<WeightRow> {
    let by_ticker: HashMap<&str, &UniverseEntry> =
        universe.iter().map(|e| (e.ticker.as_str(), e)).collect();

    weights
        .iter()
        .map(|(ticker, weight)| {
            let entry = by_ticker.get(ticker);
            WeightRow {
                ticker: ticker.to_string(),
                symbol: entry.map_or_else(|| ticker.to_string(), |e| e.symbol.clone()),
                sector: entry
                    .map(|e| e.sector.clone())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| UNKNOWN_SECTOR.to_string()),
                asset_class: entry
                    .map_or_else(|| DEFAULT_ASSET_CLASS.to_string(), |e| e.asset_class.clone()),
                weight,
            }
        })
        .collect()
}

fn horizon_maps(
    comparison: &BenchmarkComparison,
) -> (BTreeMap<Horizon, BenchmarkPair>, BTreeMap<Horizon, ChartPayload>) {
    let returns = comparison
        .horizons
        .iter()
        .map(|h| {
            (
                h.horizon,
                BenchmarkPair {
                    portfolio: h.portfolio,
                    benchmark: h.benchmark,
                },
            )
        })
        .collect();
    let charts = comparison
        .charts
        .iter()
        .map(|(h, series)| (*h, ChartPayload::from(series)))
        .collect();
    (returns, charts)
}

impl AnalyticsEngine {
    /// Runs the screening, optimization and benchmark pipeline as of `as_of`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedObjective` before any data is loaded
    /// - `Source(NotFound)` when the universe is missing
    /// - `UnavailablePriceData` when the ranking window has no prices
    /// - `InsufficientData` when ranking or optimization lack data
    pub async fn optimize(
        &self,
        request: &OptimizeRequest,
        as_of: Date,
    ) -> EngineResult<OptimizationReport> {
        let objective: Objective = request.objective.as_deref().unwrap_or("sharpe").parse()?;
        let num_stocks = request.num_stocks.unwrap_or(self.config.default_num_stocks);

        let universe = self.universe().await?;
        let candidates: Vec<String> =
            filter_universe(&universe, &request.sectors, &request.asset_classes)
                .into_iter()
                .map(|e| e.ticker)
                .collect();

        // Ranking
        let ranking_start = as_of.add_months(-(self.config.ranking_lookback_months as i32))?;
        let ranking_prices = self
            .prices
            .fetch_prices(&candidates, DateRange::new(ranking_start, as_of)?)
            .await?
            .drop_empty_rows();
        let ranked = select_top(&ranking_prices, num_stocks)?;
        let selected: Vec<String> = ranked.iter().map(|s| s.ticker.clone()).collect();
        debug!(
            candidates = candidates.len(),
            selected = ?selected,
            "ranked universe by trailing return"
        );

        // Optimization
        let opt_start = as_of.add_years(-(self.config.optimization_lookback_years as i32))?;
        let returns = self
            .prices
            .fetch_prices(&selected, DateRange::new(opt_start, as_of)?)
            .await?
            .select(&selected)
            .drop_empty_rows()
            .drop_empty_columns()
            .pct_change();
        if returns.num_assets() < 2 || returns.num_periods() < 2 {
            return Err(AnalyticsError::insufficient(
                DataStage::Optimization,
                format!(
                    "{} return series with {} periods, need at least 2 of each",
                    returns.num_assets(),
                    returns.num_periods()
                ),
            )
            .into());
        }

        let optimized = {
            let minimizer = self.config.solver.minimizer();
            optimize_weights(
                &returns,
                objective,
                self.config.risk_free_rate,
                minimizer.as_ref(),
                &self.config.solver.optimization_config(),
            )?
        };
        if !optimized.solver.converged {
            warn!(
                objective = %objective,
                backend = %optimized.solver.backend,
                iterations = optimized.solver.iterations,
                "solver did not converge, returning best weights found"
            );
        }

        // Benchmark
        let bench_start = as_of.add_years(-(self.config.benchmark_lookback_years as i32))?;
        let benchmark = self
            .prices
            .fetch_series(&self.config.benchmark_ticker, DateRange::new(bench_start, as_of)?)
            .await?;
        if benchmark.is_empty() {
            warn!(ticker = %self.config.benchmark_ticker, "no benchmark prices");
        }
        let portfolio_returns = returns.portfolio_returns(&optimized.weights.values())?;
        let comparison = compare_to_benchmark(&portfolio_returns, &benchmark.returns(), as_of)?;
        let (benchmark_returns, chart_data) = horizon_maps(&comparison);

        info!(
            objective = %objective,
            selected = selected.len(),
            optimized = optimized.weights.len(),
            converged = optimized.solver.converged,
            sharpe = optimized.metrics.sharpe,
            "optimization complete"
        );

        Ok(OptimizationReport {
            weight_table: weight_table(&optimized.weights, &universe),
            selected_stocks: selected,
            weights: optimized.weights,
            metrics: optimized.metrics,
            benchmark_returns,
            chart_data,
            solver: optimized.solver,
        })
    }
}
