//! File-based reference data sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use folio_traits::error::{TraitError, TraitResult};
use folio_traits::reference_data::*;

// =============================================================================
// CSV CLASSIFICATION SOURCE
// =============================================================================

/// CSV classification map: `ticker, sector, asset_class`, header optional.
///
/// The file is re-read on every load so a reload picks up edits.
pub struct CsvClassificationSource {
    file_path: PathBuf,
}

impl CsvClassificationSource {
    /// Create a new CSV classification source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the mapping file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Parses classification rows from CSV text.
///
/// The first row is a header when any of its fields is `ticker` or
/// `symbol`. Rows without a ticker are ignored.
pub fn parse_classification_csv(text: &str) -> TraitResult<Vec<ClassificationRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let row = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
        if index == 0
            && row
                .iter()
                .any(|f| f.eq_ignore_ascii_case("ticker") || f.eq_ignore_ascii_case("symbol"))
        {
            continue;
        }
        let ticker = row.get(0).unwrap_or_default();
        if ticker.is_empty() {
            continue;
        }
        records.push(ClassificationRecord {
            ticker: ticker.to_string(),
            sector: row.get(1).unwrap_or_default().to_string(),
            asset_class: row.get(2).unwrap_or_default().to_string(),
        });
    }
    Ok(records)
}

#[async_trait]
impl ClassificationSource for CsvClassificationSource {
    async fn load_classifications(&self) -> TraitResult<Vec<ClassificationRecord>> {
        let text = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.file_path.display(),
                    "mapping file not found, all tickers will map to 'Other'"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records = parse_classification_csv(&text)?;
        tracing::info!(
            path = %self.file_path.display(),
            loaded = records.len(),
            "loaded classification mapping"
        );
        Ok(records)
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

// =============================================================================
// CSV UNIVERSE SOURCE
// =============================================================================

/// CSV record for the universe file.
#[derive(Debug, Deserialize)]
struct UniverseRecord {
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Sector", default)]
    sector: String,
    #[serde(rename = "AssetClass", default)]
    asset_class: Option<String>,
}

/// CSV universe: columns `Symbol, Sector` and optional `AssetClass`.
pub struct CsvUniverseSource {
    file_path: PathBuf,
    ticker_suffix: String,
}

impl CsvUniverseSource {
    /// Create a new CSV universe source; `ticker_suffix` is appended to
    /// each symbol to form the price-provider ticker.
    pub fn new(file_path: impl AsRef<Path>, ticker_suffix: impl Into<String>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            ticker_suffix: ticker_suffix.into(),
        }
    }

    /// Path of the universe file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Parses universe rows from CSV text. Rows without a symbol are ignored.
pub fn parse_universe_csv(text: &str, ticker_suffix: &str) -> TraitResult<Vec<UniverseEntry>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let record: UniverseRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
        if record.symbol.is_empty() {
            continue;
        }
        entries.push(UniverseEntry::from_symbol(
            &record.symbol,
            ticker_suffix,
            &record.sector,
            record.asset_class.as_deref(),
        ));
    }
    Ok(entries)
}

#[async_trait]
impl UniverseSource for CsvUniverseSource {
    async fn load_universe(&self) -> TraitResult<Vec<UniverseEntry>> {
        let text = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => TraitError::NotFound(format!(
                    "Universe mapping file missing at {}",
                    self.file_path.display()
                )),
                _ => TraitError::IoError(e.to_string()),
            })?;
        parse_universe_csv(&text, &self.ticker_suffix)
    }
}

// =============================================================================
// IN-MEMORY SOURCES
// =============================================================================

/// Fixed universe for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUniverseSource {
    entries: Vec<UniverseEntry>,
}

impl InMemoryUniverseSource {
    /// Create a source over the given entries.
    pub fn new(entries: Vec<UniverseEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl UniverseSource for InMemoryUniverseSource {
    async fn load_universe(&self) -> TraitResult<Vec<UniverseEntry>> {
        Ok(self.entries.clone())
    }
}

/// Universe source with no backing file.
pub struct MissingUniverseSource;

#[async_trait]
impl UniverseSource for MissingUniverseSource {
    async fn load_universe(&self) -> TraitResult<Vec<UniverseEntry>> {
        Err(TraitError::NotFound("no universe configured".into()))
    }
}

/// Fixed classification rows for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClassificationSource {
    records: Vec<ClassificationRecord>,
}

impl InMemoryClassificationSource {
    /// Create a source over the given rows.
    pub fn new(records: Vec<ClassificationRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl ClassificationSource for InMemoryClassificationSource {
    async fn load_classifications(&self) -> TraitResult<Vec<ClassificationRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
