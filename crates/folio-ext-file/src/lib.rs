//! # Folio Ext File
//!
//! File-based data sources for the Folio analytics engine.
//!
//! This crate provides default implementations for offline runs, tests and static data:
//! - Holdings CSV parser with skipped-row diagnostics
//! - CSV classification map (ticker → sector / asset class)
//! - CSV universe metadata (Symbol, Sector, AssetClass)
//! - Wide-format CSV and in-memory price sources
//!
//! For live prices, use the Yahoo extension.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod holdings;
mod market_data;
mod reference_data;

pub use holdings::*;
pub use market_data::*;
pub use reference_data::*;

use std::path::Path;
use std::sync::Arc;

use folio_traits::reference_data::{ClassificationSource, UniverseSource};

/// Create file-based reference data sources: the classification map and
/// the optimizer universe.
pub fn create_file_reference_data(
    mapping_csv: impl AsRef<Path>,
    universe_csv: impl AsRef<Path>,
    ticker_suffix: &str,
) -> (Arc<dyn ClassificationSource>, Arc<dyn UniverseSource>) {
    (
        Arc::new(CsvClassificationSource::new(mapping_csv)),
        Arc::new(CsvUniverseSource::new(universe_csv, ticker_suffix)),
    )
}
