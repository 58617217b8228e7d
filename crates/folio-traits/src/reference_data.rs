//! Reference data source traits.
//!
//! - [`UniverseSource`]: The optimizable ticker universe with metadata
//! - [`ClassificationSource`]: Ticker → sector / asset class rows
//!
//! Reference data is static/semi-static (reloaded on demand, not real-time).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TraitResult;

/// Asset class assumed when a universe row has none.
pub const DEFAULT_ASSET_CLASS: &str = "Equity";

/// One instrument of the optimizer universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseEntry {
    /// Price-provider ticker (symbol plus exchange suffix).
    pub ticker: String,
    /// Exchange symbol.
    pub symbol: String,
    /// Sector label.
    pub sector: String,
    /// Asset class label.
    pub asset_class: String,
}

impl UniverseEntry {
    /// Builds an entry, appending `suffix` to the symbol for the ticker.
    #[must_use]
    pub fn from_symbol(symbol: &str, suffix: &str, sector: &str, asset_class: Option<&str>) -> Self {
        let symbol = symbol.trim();
        let asset_class = asset_class
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ASSET_CLASS);
        Self {
            ticker: format!("{symbol}{suffix}"),
            symbol: symbol.to_string(),
            sector: sector.trim().to_string(),
            asset_class: asset_class.to_string(),
        }
    }
}

/// Trait for universe providers.
#[async_trait]
pub trait UniverseSource: Send + Sync {
    /// Full universe in source order.
    ///
    /// A source that does not exist fails with `TraitError::NotFound`.
    async fn load_universe(&self) -> TraitResult<Vec<UniverseEntry>>;
}

/// One classification row as stored by the source.
///
/// Labels may be blank; normalization happens when a snapshot is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    /// Instrument ticker.
    pub ticker: String,
    /// Sector label, possibly blank.
    pub sector: String,
    /// Asset class label, possibly blank.
    pub asset_class: String,
}

/// Trait for classification providers.
#[async_trait]
pub trait ClassificationSource: Send + Sync {
    /// Every classification row.
    ///
    /// A missing backing store is not an error: it yields no rows.
    async fn load_classifications(&self) -> TraitResult<Vec<ClassificationRecord>>;

    /// Where the rows come from, for logs and diagnostics.
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_entry_defaults() {
        let entry = UniverseEntry::from_symbol(" TCS ", ".NS", " IT ", Some("  "));
        assert_eq!(entry.ticker, "TCS.NS");
        assert_eq!(entry.symbol, "TCS");
        assert_eq!(entry.sector, "IT");
        assert_eq!(entry.asset_class, DEFAULT_ASSET_CLASS);

        let entry = UniverseEntry::from_symbol("GOLDBEES", ".NS", "Commodities", Some("Gold"));
        assert_eq!(entry.asset_class, "Gold");
    }
}
