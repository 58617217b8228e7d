//! Ticker classification snapshots.
//!
//! A [`ClassificationSnapshot`] is an immutable, versioned ticker →
//! (sector, asset class) map. Reloading produces a new snapshot; readers
//! keep whichever snapshot they started with.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Label used for unknown or blank classifications.
pub const UNCLASSIFIED: &str = "Other";

/// Sector and asset class of one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Sector label.
    pub sector: String,
    /// Asset class label.
    pub asset_class: String,
}

impl Classification {
    /// Creates a classification, substituting [`UNCLASSIFIED`] for blanks.
    #[must_use]
    pub fn new(sector: impl Into<String>, asset_class: impl Into<String>) -> Self {
        fn or_other(s: String) -> String {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                UNCLASSIFIED.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Self {
            sector: or_other(sector.into()),
            asset_class: or_other(asset_class.into()),
        }
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self {
            sector: UNCLASSIFIED.to_string(),
            asset_class: UNCLASSIFIED.to_string(),
        }
    }
}

/// Immutable ticker classification map with a version number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSnapshot {
    version: u64,
    entries: HashMap<String, Classification>,
}

impl ClassificationSnapshot {
    /// Creates a snapshot. Later entries for a ticker replace earlier ones.
    #[must_use]
    pub fn new<I>(version: u64, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Classification)>,
    {
        Self {
            version,
            entries: entries.into_iter().collect(),
        }
    }

    /// A snapshot with no entries.
    #[must_use]
    pub fn empty(version: u64) -> Self {
        Self {
            version,
            entries: HashMap::new(),
        }
    }

    /// Snapshot version.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Same entries under a different version.
    #[must_use]
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Number of mapped tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no ticker is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if the ticker has an entry.
    #[must_use]
    pub fn contains(&self, ticker: &str) -> bool {
        self.entries.contains_key(ticker)
    }

    /// The entry for a ticker, if mapped.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&Classification> {
        self.entries.get(ticker)
    }

    /// Sector for a ticker, [`UNCLASSIFIED`] if unmapped.
    #[must_use]
    pub fn sector(&self, ticker: &str) -> &str {
        self.get(ticker).map_or(UNCLASSIFIED, |c| c.sector.as_str())
    }

    /// Asset class for a ticker, [`UNCLASSIFIED`] if unmapped.
    #[must_use]
    pub fn asset_class(&self, ticker: &str) -> &str {
        self.get(ticker).map_or(UNCLASSIFIED, |c| c.asset_class.as_str())
    }
}
