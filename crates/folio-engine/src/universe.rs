//! Universe metadata queries and filtering.

use std::collections::BTreeSet;

use tracing::warn;

use folio_traits::error::TraitError;
use folio_traits::reference_data::UniverseEntry;

use crate::error::EngineResult;
use crate::AnalyticsEngine;

/// Entries matching the sector and asset-class filters.
///
/// An empty filter list matches everything. When the filters leave nothing,
/// the whole universe is returned instead.
pub fn filter_universe(
    entries: &[UniverseEntry],
    sectors: &[String],
    asset_classes: &[String],
) -> Vec<UniverseEntry> {
    let filtered: Vec<UniverseEntry> = entries
        .iter()
        .filter(|e| sectors.is_empty() || sectors.contains(&e.sector))
        .filter(|e| asset_classes.is_empty() || asset_classes.contains(&e.asset_class))
        .cloned()
        .collect();

    if filtered.is_empty() {
        entries.to_vec()
    } else {
        filtered
    }
}

fn sorted_unique<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl AnalyticsEngine {
    /// The full optimizer universe.
    ///
    /// # Errors
    ///
    /// `Source(NotFound)` when the universe file is missing.
    pub async fn universe(&self) -> EngineResult<Vec<UniverseEntry>> {
        Ok(self.universe.load_universe().await?)
    }

    /// Universe entries, or none when the universe is missing.
    pub async fn list_tickers(&self) -> EngineResult<Vec<UniverseEntry>> {
        match self.universe.load_universe().await {
            Ok(entries) => Ok(entries),
            Err(TraitError::NotFound(reason)) => {
                warn!(%reason, "universe unavailable, listing nothing");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Sorted distinct sectors in the universe.
    pub async fn list_sectors(&self) -> EngineResult<Vec<String>> {
        let entries = self.list_tickers().await?;
        Ok(sorted_unique(entries.iter().map(|e| e.sector.as_str())))
    }

    /// Sorted distinct asset classes in the universe.
    pub async fn list_asset_classes(&self) -> EngineResult<Vec<String>> {
        let entries = self.list_tickers().await?;
        Ok(sorted_unique(entries.iter().map(|e| e.asset_class.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use folio_ext_file::{
        EmptyPriceSource, InMemoryClassificationSource, InMemoryUniverseSource,
        MissingUniverseSource,
    };
    use folio_traits::reference_data::UniverseSource;

    use crate::AnalyticsEngineBuilder;

    fn universe() -> Vec<UniverseEntry> {
        vec![
            UniverseEntry::from_symbol("TCS", ".NS", "IT", None),
            UniverseEntry::from_symbol("INFY", ".NS", "IT", None),
            UniverseEntry::from_symbol("HDFCBANK", ".NS", "Banks", None),
            UniverseEntry::from_symbol("GOLDBEES", ".NS", "", Some("Gold")),
        ]
    }

    fn engine(source: Arc<dyn UniverseSource>) -> AnalyticsEngine {
        AnalyticsEngineBuilder::new()
            .with_prices(Arc::new(EmptyPriceSource))
            .with_universe(source)
            .with_classifications(Arc::new(InMemoryClassificationSource::default()))
            .build()
            .unwrap()
    }

    fn tickers(entries: &[UniverseEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.ticker.as_str()).collect()
    }

    #[test]
    fn test_filter_by_sector_and_class() {
        let all = universe();
        let it = filter_universe(&all, &["IT".into()], &[]);
        assert_eq!(tickers(&it), vec!["TCS.NS", "INFY.NS"]);

        let gold = filter_universe(&all, &[], &["Gold".into()]);
        assert_eq!(tickers(&gold), vec!["GOLDBEES.NS"]);

        let none = filter_universe(&all, &["IT".into()], &["Gold".into()]);
        assert_eq!(none.len(), all.len());
    }

    #[tokio::test]
    async fn test_listings() {
        let engine = engine(Arc::new(InMemoryUniverseSource::new(universe())));
        assert_eq!(engine.list_sectors().await.unwrap(), vec!["Banks", "IT"]);
        assert_eq!(engine.list_asset_classes().await.unwrap(), vec!["Equity", "Gold"]);
        assert_eq!(engine.list_tickers().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_missing_universe_lists_nothing() {
        let engine = engine(Arc::new(MissingUniverseSource));
        assert!(engine.list_sectors().await.unwrap().is_empty());
        assert!(engine.list_tickers().await.unwrap().is_empty());
        assert!(engine.universe().await.is_err());
    }
}
