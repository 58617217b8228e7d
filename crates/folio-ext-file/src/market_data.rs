//! File-based and in-memory price sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use parking_lot::RwLock;

use folio_core::{Date, PriceMatrix};
use folio_traits::error::{TraitError, TraitResult};
use folio_traits::market_data::*;

/// Cuts a stored matrix down to a request.
fn slice(prices: &PriceMatrix, tickers: &[String], range: DateRange) -> PriceMatrix {
    prices
        .clone()
        .select(tickers)
        .since(range.start)
        .before(range.end)
        .drop_empty_rows()
        .drop_empty_columns()
}

// =============================================================================
// IN-MEMORY PRICE SOURCE
// =============================================================================

/// Price source over a fixed matrix, for tests and offline runs.
#[derive(Debug, Default)]
pub struct InMemoryPriceSource {
    prices: RwLock<PriceMatrix>,
}

impl InMemoryPriceSource {
    /// Create a source over `prices`.
    pub fn new(prices: PriceMatrix) -> Self {
        Self {
            prices: RwLock::new(prices),
        }
    }

    /// Replace the stored prices.
    pub fn replace(&self, prices: PriceMatrix) {
        *self.prices.write() = prices;
    }
}

#[async_trait]
impl PriceSource for InMemoryPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_prices(&self, tickers: &[String], range: DateRange) -> TraitResult<PriceMatrix> {
        Ok(slice(&self.prices.read(), tickers, range))
    }
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// Wide CSV of adjusted closes: `Date,TICKER1,TICKER2,...`, one row per
/// date. Empty cells are missing prices.
pub struct CsvPriceSource {
    file_path: PathBuf,
    inner: InMemoryPriceSource,
}

impl CsvPriceSource {
    /// Create a new CSV price source, loading the file.
    pub fn new(file_path: impl AsRef<Path>) -> TraitResult<Self> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            inner: InMemoryPriceSource::default(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload prices from file.
    pub fn reload(&self) -> TraitResult<()> {
        let text = std::fs::read_to_string(&self.file_path)?;
        let prices = parse_price_csv(&text)?;
        tracing::info!(
            path = %self.file_path.display(),
            tickers = prices.num_tickers(),
            rows = prices.num_rows(),
            "loaded price file"
        );
        self.inner.replace(prices);
        Ok(())
    }
}

/// Parses a wide price CSV.
pub fn parse_price_csv(text: &str) -> TraitResult<PriceMatrix> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| TraitError::ParseError(e.to_string()))?
        .clone();
    let tickers: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
        let date_field = record.get(0).unwrap_or_default();
        let date = Date::parse(date_field)
            .map_err(|e| TraitError::ParseError(format!("bad date '{date_field}': {e}")))?;
        let values = (1..=tickers.len())
            .map(|i| record.get(i).and_then(|v| v.parse::<f64>().ok()))
            .collect();
        rows.push((date, values));
    }

    PriceMatrix::from_rows(tickers, rows).map_err(|e| TraitError::ParseError(e.to_string()))
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch_prices(&self, tickers: &[String], range: DateRange) -> TraitResult<PriceMatrix> {
        self.inner.fetch_prices(tickers, range).await
    }
}

// =============================================================================
// EMPTY SOURCE
// =============================================================================

/// Price source that never has data.
pub struct EmptyPriceSource;

#[async_trait]
impl PriceSource for EmptyPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn name(&self) -> &str {
        "empty"
    }

    async fn fetch_prices(&self, _tickers: &[String], _range: DateRange) -> TraitResult<PriceMatrix> {
        Ok(PriceMatrix::empty())
    }
}
