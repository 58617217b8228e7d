//! Builder for the analytics engine.

use std::sync::Arc;

use folio_traits::market_data::PriceSource;
use folio_traits::reference_data::{ClassificationSource, UniverseSource};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::registry::ClassificationRegistry;
use crate::AnalyticsEngine;

/// Builder for constructing an [`AnalyticsEngine`].
pub struct AnalyticsEngineBuilder {
    config: Option<EngineConfig>,
    prices: Option<Arc<dyn PriceSource>>,
    universe: Option<Arc<dyn UniverseSource>>,
    classifications: Option<Arc<dyn ClassificationSource>>,
}

impl AnalyticsEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            prices: None,
            universe: None,
            classifications: None,
        }
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the price source.
    pub fn with_prices(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.prices = Some(source);
        self
    }

    /// Set the optimizer universe.
    pub fn with_universe(mut self, source: Arc<dyn UniverseSource>) -> Self {
        self.universe = Some(source);
        self
    }

    /// Set the classification map source.
    pub fn with_classifications(mut self, source: Arc<dyn ClassificationSource>) -> Self {
        self.classifications = Some(source);
        self
    }

    /// Build the engine.
    ///
    /// The classification registry starts empty; call
    /// [`AnalyticsEngine::reload_classifications`] to load it.
    pub fn build(self) -> Result<AnalyticsEngine, EngineError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let prices = self
            .prices
            .ok_or_else(|| EngineError::Config("price source not configured".into()))?;

        let universe = self
            .universe
            .ok_or_else(|| EngineError::Config("universe source not configured".into()))?;

        let classifications = self
            .classifications
            .ok_or_else(|| EngineError::Config("classification source not configured".into()))?;

        Ok(AnalyticsEngine::new(
            config,
            prices,
            universe,
            ClassificationRegistry::new(classifications),
        ))
    }
}

impl Default for AnalyticsEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
