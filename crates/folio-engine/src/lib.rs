//! # Folio Engine
//!
//! Request orchestration for Folio.
//!
//! This crate provides:
//! - [`AnalyticsEngine`]: holdings analytics and optimization requests over
//!   injected price, universe and classification sources
//! - [`ClassificationRegistry`]: versioned classification snapshots with
//!   wholesale reload
//! - [`EngineConfig`]: lookback windows, benchmark and solver selection
//!
//! ## Architecture
//!
//! ```text
//! Holdings ─> PriceSource (current prices) ─┬─> calculate_holdings_performance ─> HoldingsReport
//!                                           │
//!              ClassificationRegistry ──────┘
//!
//! OptimizeRequest ─> UniverseSource ─> select_top ─> optimize_weights ─┬─> OptimizationReport
//!                                                                       │
//!                    PriceSource (benchmark) ─> compare_to_benchmark ───┘
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let engine = AnalyticsEngineBuilder::new()
//!     .with_prices(price_source)
//!     .with_universe(universe_source)
//!     .with_classifications(mapping_source)
//!     .with_config(config)
//!     .build()?;
//!
//! engine.reload_classifications().await?;
//! let report = engine.optimize(&OptimizeRequest::default(), Date::today()).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod error;
pub mod holdings;
pub mod optimization;
pub mod registry;
pub mod universe;

pub use builder::AnalyticsEngineBuilder;
pub use config::{EngineConfig, SolverBackend, SolverConfig};
pub use error::{EngineError, EngineResult};
pub use holdings::HoldingsReport;
pub use optimization::{
    BenchmarkPair, ChartPayload, OptimizationReport, OptimizeRequest, WeightRow,
};
pub use registry::ClassificationRegistry;

use std::sync::Arc;

use folio_portfolio::ClassificationSnapshot;
use folio_traits::market_data::PriceSource;
use folio_traits::reference_data::UniverseSource;

/// Serves holdings analytics and optimization requests.
///
/// The engine is shared across request handlers; it holds no per-request
/// state. Each request reads one classification snapshot and keeps it.
pub struct AnalyticsEngine {
    config: EngineConfig,
    prices: Arc<dyn PriceSource>,
    universe: Arc<dyn UniverseSource>,
    classifications: ClassificationRegistry,
}

impl AnalyticsEngine {
    pub(crate) fn new(
        config: EngineConfig,
        prices: Arc<dyn PriceSource>,
        universe: Arc<dyn UniverseSource>,
        classifications: ClassificationRegistry,
    ) -> Self {
        Self {
            config,
            prices,
            universe,
            classifications,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Name of the configured price source.
    pub fn price_source_name(&self) -> &str {
        self.prices.name()
    }

    /// The classification snapshot in effect now.
    pub fn classification_snapshot(&self) -> Arc<ClassificationSnapshot> {
        self.classifications.snapshot()
    }

    /// Reload the classification map and publish it as a new version.
    pub async fn reload_classifications(&self) -> EngineResult<Arc<ClassificationSnapshot>> {
        self.classifications.reload().await
    }
}
