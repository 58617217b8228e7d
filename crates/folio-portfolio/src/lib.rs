//! # Folio Portfolio
//!
//! Performance, screening and optimization analytics for equity portfolios.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Explicit "today"**: every date-relative computation takes an `as_of` date
//! - **Diagnostics over silence**: excluded holdings and solver convergence
//!   are part of the results, not log lines
//!
//! ## Features
//!
//! - **Holdings Performance**: invested vs current value, gain/loss, top movers
//! - **Exposures**: sector and asset-class weights from a classification snapshot
//! - **Screening**: trailing-return momentum ranking of a ticker universe
//! - **Optimization**: long-only weights for Sharpe, volatility or max drawdown
//! - **Benchmark Comparison**: 1M/3M/6M/YTD/1Y returns against an index
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use folio_portfolio::prelude::*;
//!
//! let holdings = vec![
//!     Holding::new("A", "2024-01-01", 100.0, 10.0),
//!     Holding::new("B", "2024-01-01", 50.0, 20.0),
//! ];
//! let prices = HashMap::from([("A".to_string(), 110.0), ("B".to_string(), 45.0)]);
//!
//! let result = calculate_holdings_performance(&holdings, &prices, &ClassificationSnapshot::empty(0));
//! assert_eq!(result.total_invested, 2000.0);
//! assert_eq!(result.total_gain_loss, 0.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Returns statistics, holdings performance, drawdown
//! - [`benchmark`] - Horizon comparison against a benchmark index
//! - [`bucketing`] - Sector and asset-class exposure
//! - [`optimizer`] - Constrained weight optimization
//! - [`screening`] - Momentum ranking and selection
//! - [`types`] - Holdings, classifications, weights, horizons

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod benchmark;
pub mod bucketing;
pub mod error;
pub mod optimizer;
pub mod screening;
pub mod types;

pub use error::{AnalyticsError, AnalyticsResult, DataStage};

pub use types::{
    ChartSeries, Classification, ClassificationSnapshot, ExcludedHolding, ExclusionReason,
    Holding, HoldingPerformance, HoldingsAnalytics, Horizon, HorizonReturn, Objective,
    PortfolioMetrics, Weights, UNCLASSIFIED,
};

pub use analytics::{
    calculate_holdings_performance, max_drawdown, max_drawdown_of_returns, unmapped_tickers,
    ReturnStatistics, TOP_MOVERS, TRADING_DAYS_PER_YEAR,
};
pub use benchmark::{compare_to_benchmark, BenchmarkComparison};
pub use bucketing::{bucket_by_asset_class, bucket_by_sector};
pub use optimizer::{optimize_weights, OptimizedPortfolio, SolverDiagnostics};
pub use screening::{rank_by_momentum, select_top, MomentumScore};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        calculate_holdings_performance, max_drawdown, unmapped_tickers, ReturnStatistics,
    };
    pub use crate::benchmark::{compare_to_benchmark, BenchmarkComparison};
    pub use crate::error::{AnalyticsError, AnalyticsResult, DataStage};
    pub use crate::optimizer::{optimize_weights, OptimizedPortfolio};
    pub use crate::screening::{select_top, MomentumScore};
    pub use crate::types::{
        Classification, ClassificationSnapshot, Holding, HoldingsAnalytics, Horizon, Objective,
        PortfolioMetrics, Weights,
    };
}
