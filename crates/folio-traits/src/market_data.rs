//! Price data source traits.
//!
//! A [`PriceSource`] answers one question: given tickers and a date range,
//! return the adjusted closes it has as a [`PriceMatrix`]. Missing tickers
//! and non-trading days are simply absent, never errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{TraitError, TraitResult};
use folio_core::{DatedSeries, Date, PriceMatrix};

/// Source type for price data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Remote HTTP API
    Network,
    /// File-based (CSV)
    File,
    /// In-process fixtures
    Memory,
}

/// Half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First date included.
    pub start: Date,
    /// First date excluded.
    pub end: Date,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    pub fn new(start: Date, end: Date) -> TraitResult<Self> {
        if end < start {
            return Err(TraitError::InvalidInput(format!(
                "date range end {end} before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The `days` days before `end`.
    #[must_use]
    pub fn days_before(end: Date, days: i64) -> Self {
        Self {
            start: end.add_days(-days.abs()),
            end,
        }
    }

    /// True if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }
}

/// Trait for historical price providers.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Short name for logs.
    fn name(&self) -> &str;

    /// Adjusted closes for `tickers` inside `range`, one column per ticker
    /// that has any data.
    async fn fetch_prices(&self, tickers: &[String], range: DateRange) -> TraitResult<PriceMatrix>;

    /// Adjusted closes for a single ticker.
    async fn fetch_series(&self, ticker: &str, range: DateRange) -> TraitResult<DatedSeries> {
        let prices = self.fetch_prices(&[ticker.to_string()], range).await?;
        DatedSeries::new(prices.observations(ticker))
            .map_err(|e| TraitError::ParseError(e.to_string()))
    }
}
