//! Domain types for portfolio analytics.
//!
//! - [`Holding`]: An uploaded position (ticker, entry price, quantity)
//! - [`HoldingsAnalytics`]: Aggregated performance and exposures
//! - [`ClassificationSnapshot`]: Versioned ticker → sector/asset-class map
//! - [`Weights`], [`Objective`], [`PortfolioMetrics`]: Optimization in/out
//! - [`Horizon`], [`HorizonReturn`], [`ChartSeries`]: Benchmark comparison

mod classification;
mod holding;
mod horizon;
mod metrics;

pub use classification::{Classification, ClassificationSnapshot, UNCLASSIFIED};
pub use holding::{
    ExcludedHolding, ExclusionReason, Holding, HoldingPerformance, HoldingsAnalytics,
};
pub use horizon::{ChartSeries, Horizon, HorizonReturn};
pub use metrics::{Objective, PortfolioMetrics, Weights};
