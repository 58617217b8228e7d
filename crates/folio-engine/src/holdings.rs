//! Holdings analytics requests.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use folio_core::Date;
use folio_portfolio::{
    calculate_holdings_performance, unmapped_tickers, AnalyticsError, ExcludedHolding, Holding,
    HoldingPerformance, HoldingsAnalytics,
};
use folio_traits::market_data::DateRange;

use crate::error::EngineResult;
use crate::AnalyticsEngine;

/// Holdings analytics response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsReport {
    /// Current value of the included holdings.
    pub portfolio_value: f64,
    /// Amount invested in the included holdings.
    pub total_invested: f64,
    /// `portfolio_value − total_invested`.
    pub total_gain_loss: f64,
    /// Total return as a fraction.
    pub total_return: f64,
    /// Best performers as (ticker, fractional gain).
    pub top_gainers: Vec<(String, f64)>,
    /// Worst performers as (ticker, fractional loss), worst first.
    pub top_losers: Vec<(String, f64)>,
    /// Current-value weight per sector.
    pub sector_exposure: BTreeMap<String, f64>,
    /// Current-value weight per asset class.
    pub asset_allocation: BTreeMap<String, f64>,
    /// Included holdings, best performer first.
    pub portfolio_details: Vec<HoldingPerformance>,
    /// Distinct holding tickers missing from the classification map.
    pub unmapped_tickers: Vec<String>,
    /// Tickers a current price was looked up for.
    pub prices_fetched: usize,
    /// Holdings in the upload.
    pub total_holdings: usize,
    /// Holdings left out of the totals, with the reason.
    pub excluded_holdings: Vec<ExcludedHolding>,
    /// Version of the classification map used.
    pub classification_version: u64,
}

impl HoldingsReport {
    fn new(
        analytics: HoldingsAnalytics,
        unmapped: Vec<String>,
        prices_fetched: usize,
        total_holdings: usize,
        classification_version: u64,
    ) -> Self {
        Self {
            portfolio_value: analytics.total_current_value,
            total_invested: analytics.total_invested,
            total_gain_loss: analytics.total_gain_loss,
            total_return: analytics.total_return_pct / 100.0,
            top_gainers: analytics.top_gainers,
            top_losers: analytics.top_losers,
            sector_exposure: analytics.sector_exposure,
            asset_allocation: analytics.asset_allocation,
            portfolio_details: analytics.holdings,
            unmapped_tickers: unmapped,
            prices_fetched,
            total_holdings,
            excluded_holdings: analytics.excluded,
            classification_version,
        }
    }
}

impl AnalyticsEngine {
    /// Latest price per ticker within the current-price window.
    ///
    /// Tickers are looked up exactly as given; blanks are skipped and
    /// duplicates collapse. Tickers without an observation map to `0.0`.
    ///
    /// # Errors
    ///
    /// `UnavailablePriceData` when no ticker is left to look up or the
    /// provider returns nothing at all.
    pub async fn current_prices(
        &self,
        tickers: &[String],
        as_of: Date,
    ) -> EngineResult<HashMap<String, f64>> {
        let unique: Vec<String> = tickers
            .iter()
            .filter(|t| !t.trim().is_empty())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if unique.is_empty() {
            return Err(AnalyticsError::unavailable("no tickers to price").into());
        }

        let range = DateRange::days_before(as_of, i64::from(self.config.current_price_window_days));
        let prices = self.prices.fetch_prices(&unique, range).await?;
        if prices.is_empty() {
            return Err(AnalyticsError::unavailable(format!(
                "no prices between {} and {} for {} tickers",
                range.start,
                range.end,
                unique.len()
            ))
            .into());
        }

        Ok(unique
            .into_iter()
            .map(|ticker| {
                let price = prices.last_observation(&ticker).unwrap_or(0.0);
                (ticker, price)
            })
            .collect())
    }

    /// Performance analytics for uploaded holdings as of `as_of`.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` when there are no holdings
    /// - `UnavailablePriceData` when no current price could be fetched
    /// - `Source` when the price provider fails outright
    pub async fn analyze_holdings(
        &self,
        holdings: &[Holding],
        as_of: Date,
    ) -> EngineResult<HoldingsReport> {
        if holdings.is_empty() {
            return Err(AnalyticsError::empty_input("holdings").into());
        }

        let snapshot = self.classifications.snapshot();
        let tickers: Vec<String> = holdings.iter().map(|h| h.ticker.clone()).collect();
        let current_prices = self.current_prices(&tickers, as_of).await?;
        debug!(
            requested = tickers.len(),
            priced = current_prices.values().filter(|p| **p > 0.0).count(),
            "current prices fetched"
        );

        let analytics = calculate_holdings_performance(holdings, &current_prices, &snapshot);
        let unmapped = unmapped_tickers(holdings, &snapshot);

        info!(
            holdings = holdings.len(),
            included = analytics.holdings.len(),
            excluded = analytics.excluded.len(),
            unmapped = unmapped.len(),
            classification_version = snapshot.version(),
            "holdings analytics complete"
        );

        Ok(HoldingsReport::new(
            analytics,
            unmapped,
            current_prices.len(),
            holdings.len(),
            snapshot.version(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use approx::assert_relative_eq;
    use folio_core::PriceMatrix;
    use folio_ext_file::{
        EmptyPriceSource, InMemoryClassificationSource, InMemoryPriceSource, MissingUniverseSource,
    };
    use folio_portfolio::ExclusionReason;
    use folio_traits::market_data::PriceSource;
    use folio_traits::ClassificationRecord;

    use crate::{AnalyticsEngineBuilder, EngineError};

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 6, day).unwrap()
    }

    fn engine(prices: Arc<dyn PriceSource>) -> AnalyticsEngine {
        let mapping = InMemoryClassificationSource::new(vec![ClassificationRecord {
            ticker: "TCS.NS".into(),
            sector: "IT".into(),
            asset_class: "Equity".into(),
        }]);
        AnalyticsEngineBuilder::new()
            .with_prices(prices)
            .with_universe(Arc::new(MissingUniverseSource))
            .with_classifications(Arc::new(mapping))
            .build()
            .unwrap()
    }

    fn market() -> Arc<InMemoryPriceSource> {
        let prices = PriceMatrix::from_series(vec![
            ("TCS.NS", vec![(d(3), 3800.0), (d(4), 3900.0), (d(7), 4000.0)]),
            ("INFY.NS", vec![(d(4), 1500.0), (d(5), 1400.0)]),
            // After the as-of date; must not be used.
            ("HDFC.NS", vec![(d(10), 1600.0)]),
        ]);
        Arc::new(InMemoryPriceSource::new(prices))
    }

    #[tokio::test]
    async fn test_current_prices_window() {
        let engine = engine(market());
        let prices = engine
            .current_prices(
                &["TCS.NS".into(), "INFY.NS".into(), "HDFC.NS".into(), " ".into(), "TCS.NS".into()],
                d(8),
            )
            .await
            .unwrap();

        assert_eq!(prices.len(), 3);
        assert_eq!(prices["TCS.NS"], 4000.0);
        assert_eq!(prices["INFY.NS"], 1400.0);
        assert_eq!(prices["HDFC.NS"], 0.0);
    }

    #[tokio::test]
    async fn test_analyze_holdings() {
        let engine = engine(market());
        engine.reload_classifications().await.unwrap();

        let holdings = vec![
            Holding::new("TCS.NS", "2024-01-02", 3200.0, 10.0),
            Holding::new("INFY.NS", "2024-01-02", 1600.0, 5.0),
            Holding::new("HDFC.NS", "2024-01-02", 1500.0, 2.0),
        ];
        let report = engine.analyze_holdings(&holdings, d(8)).await.unwrap();

        assert_relative_eq!(report.total_invested, 40_000.0);
        assert_relative_eq!(report.portfolio_value, 47_000.0);
        assert_relative_eq!(report.total_return, 0.175, epsilon = 1e-12);
        assert_eq!(report.top_gainers, vec![("TCS.NS".to_string(), 0.25)]);
        assert_eq!(report.top_losers, vec![("INFY.NS".to_string(), -0.125)]);
        assert_relative_eq!(report.sector_exposure["IT"], 40_000.0 / 47_000.0, epsilon = 1e-12);
        assert_relative_eq!(report.sector_exposure["Other"], 7_000.0 / 47_000.0, epsilon = 1e-12);
        assert_eq!(report.excluded_holdings.len(), 1);
        assert_eq!(report.excluded_holdings[0].reason, ExclusionReason::MissingPrice);
        assert_eq!(report.prices_fetched, 3);
        assert_eq!(report.total_holdings, 3);
        assert_eq!(report.classification_version, 1);

        assert_eq!(report.unmapped_tickers, vec!["HDFC.NS".to_string(), "INFY.NS".to_string()]);
    }

    #[tokio::test]
    async fn test_report_wire_names() {
        let engine = engine(market());
        let holdings = vec![Holding::new("TCS.NS", "2024-01-02", 3200.0, 1.0)];
        let report = engine.analyze_holdings(&holdings, d(8)).await.unwrap();

        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "portfolioValue",
            "totalInvested",
            "totalGainLoss",
            "totalReturn",
            "topGainers",
            "topLosers",
            "sectorExposure",
            "assetAllocation",
            "portfolioDetails",
            "unmappedTickers",
            "pricesFetched",
            "totalHoldings",
            "excludedHoldings",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["topGainers"][0][0], "TCS.NS");
        assert_eq!(json["portfolioDetails"][0]["gain_loss_pct"], 25.0);
    }

    #[tokio::test]
    async fn test_empty_holdings() {
        let engine = engine(market());
        let err = engine.analyze_holdings(&[], d(8)).await.unwrap_err();
        assert!(matches!(err, EngineError::Analytics(AnalyticsError::EmptyInput { .. })));
    }

    #[tokio::test]
    async fn test_blank_tickers_are_unavailable() {
        let engine = engine(market());
        let holdings = vec![
            Holding::new("", "2024-01-02", 3200.0, 1.0),
            Holding::new("   ", "2024-01-02", 1600.0, 2.0),
        ];
        let err = engine.analyze_holdings(&holdings, d(8)).await.unwrap_err();
        assert!(err.is_unavailable_prices());

        let err = engine.current_prices(&[" ".into()], d(8)).await.unwrap_err();
        assert!(err.is_unavailable_prices());
    }

    #[tokio::test]
    async fn test_padded_ticker_is_priced_and_included() {
        let engine = engine(market());
        let holdings = vec![Holding::new("  INFY.NS ", "2024-01-02", 1600.0, 5.0)];
        let report = engine.analyze_holdings(&holdings, d(8)).await.unwrap();

        assert!(report.excluded_holdings.is_empty());
        assert_eq!(report.portfolio_details[0].ticker, "INFY.NS");
        assert_relative_eq!(report.portfolio_value, 7_000.0);
        assert_relative_eq!(report.total_invested, 8_000.0);
    }

    #[tokio::test]
    async fn test_provider_with_nothing() {
        let engine = engine(Arc::new(EmptyPriceSource));
        let holdings = vec![Holding::new("TCS.NS", "2024-01-02", 3200.0, 1.0)];
        let err = engine.analyze_holdings(&holdings, d(8)).await.unwrap_err();
        assert!(err.is_unavailable_prices());
    }
}
