//! # Folio Ext Yahoo
//!
//! Live adjusted-close prices from the Yahoo Finance chart API.
//!
//! One daily-interval chart request is made per ticker, a few at a time.
//! Tickers the API does not know, or that fail to download, are left out of
//! the returned matrix with a warning; the engine decides whether what is
//! left is enough.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_core::Date;
//! use folio_ext_yahoo::YahooPriceSource;
//! use folio_traits::{DateRange, PriceSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = YahooPriceSource::new().unwrap();
//!     let end = Date::today();
//!     let prices = source
//!         .fetch_prices(&["TCS.NS".to_string()], DateRange::days_before(end, 30))
//!         .await
//!         .unwrap();
//!     println!("{} rows", prices.num_rows());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod chart;

pub use chart::parse_chart;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use folio_core::{Date, PriceMatrix};
use folio_traits::error::{TraitError, TraitResult};
use folio_traits::market_data::{DateRange, PriceSource, SourceType};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const MAX_CONCURRENT_REQUESTS: usize = 8;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Yahoo Finance price source.
#[derive(Debug, Clone)]
pub struct YahooPriceSource {
    client: reqwest::Client,
    base_url: String,
}

impl YahooPriceSource {
    /// Create a client against the public endpoint.
    pub fn new() -> TraitResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against another chart endpoint (proxies, mocks).
    pub fn with_base_url(base_url: impl Into<String>) -> TraitResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TraitError::ConnectionFailed(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn build_url(&self, ticker: &str, range: DateRange) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=div%2Csplit",
            self.base_url,
            ticker,
            chart::unix_midnight(range.start),
            chart::unix_midnight(range.end),
        )
    }

    async fn fetch_one(
        client: reqwest::Client,
        url: String,
        range: DateRange,
    ) -> TraitResult<Vec<(Date, f64)>> {
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TraitError::Timeout
                } else {
                    TraitError::ConnectionFailed(e.to_string())
                }
            })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TraitError::RateLimited);
        }

        let text = response
            .text()
            .await
            .map_err(|e| TraitError::ConnectionFailed(e.to_string()))?;

        let mut points = chart::parse_chart(&text)?;
        points.retain(|(date, _)| range.contains(*date));
        Ok(points)
    }
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Network
    }

    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_prices(&self, tickers: &[String], range: DateRange) -> TraitResult<PriceMatrix> {
        let permits = Arc::new(Semaphore::new(MAX_CONCURRENT_REQUESTS));
        let mut tasks = JoinSet::new();

        for ticker in tickers {
            let ticker = ticker.clone();
            let url = self.build_url(&ticker, range);
            let client = self.client.clone();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let result = Self::fetch_one(client, url, range).await;
                (ticker, result)
            });
        }

        let mut series = Vec::with_capacity(tickers.len());
        while let Some(joined) = tasks.join_next().await {
            let (ticker, result) =
                joined.map_err(|e| TraitError::Internal(format!("price download task failed: {e}")))?;
            match result {
                Ok(points) if !points.is_empty() => series.push((ticker, points)),
                Ok(_) => tracing::warn!(%ticker, "no prices returned"),
                Err(e) => tracing::warn!(%ticker, error = %e, "price download failed"),
            }
        }

        // Keep request order regardless of completion order.
        series.sort_by_key(|(ticker, _)| tickers.iter().position(|t| t == ticker));
        tracing::debug!(
            requested = tickers.len(),
            received = series.len(),
            start = %range.start,
            end = %range.end,
            "fetched prices from yahoo"
        );
        Ok(PriceMatrix::from_series(series))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let source = YahooPriceSource::with_base_url("http://localhost:9/chart/").unwrap();
        let range = DateRange::new(
            Date::from_ymd(2024, 1, 1).unwrap(),
            Date::from_ymd(2024, 12, 1).unwrap(),
        )
        .unwrap();
        let url = source.build_url("^NSEI", range);

        assert!(url.starts_with("http://localhost:9/chart/^NSEI?"));
        assert!(url.contains("period1=1704067200"));
        assert!(url.contains("period2=1733011200"));
        assert!(url.contains("interval=1d"));
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty_matrix() {
        // Port 9 (discard) is closed on test machines; every download fails.
        let source = YahooPriceSource::with_base_url("http://127.0.0.1:9/chart").unwrap();
        let range = DateRange::days_before(Date::from_ymd(2024, 6, 1).unwrap(), 5);
        let prices = source
            .fetch_prices(&["AAA.NS".to_string(), "BBB.NS".to_string()], range)
            .await
            .unwrap();
        assert!(prices.is_empty());
    }
}
