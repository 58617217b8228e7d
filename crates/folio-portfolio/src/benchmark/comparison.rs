//! Horizon returns of a portfolio against a benchmark index.

use folio_core::{AlignedSeries, DatedSeries, Date};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult, DataStage};
use crate::types::{ChartSeries, Horizon, HorizonReturn};

/// Per-horizon returns and chart series.
///
/// Both lists follow [`Horizon::ALL`] order and always hold every horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Returns per horizon.
    pub horizons: Vec<HorizonReturn>,
    /// Aligned index levels per horizon.
    pub charts: Vec<(Horizon, ChartSeries)>,
}

impl BenchmarkComparison {
    /// Returns for one horizon.
    #[must_use]
    pub fn horizon(&self, horizon: Horizon) -> Option<&HorizonReturn> {
        self.horizons.iter().find(|h| h.horizon == horizon)
    }

    /// Chart series for one horizon.
    #[must_use]
    pub fn chart(&self, horizon: Horizon) -> Option<&ChartSeries> {
        self.charts.iter().find(|(h, _)| *h == horizon).map(|(_, c)| c)
    }

    /// Both returns for a horizon, failing when the window was too short.
    ///
    /// # Errors
    ///
    /// `InsufficientData(Horizon)` when either return is missing.
    pub fn require(&self, horizon: Horizon) -> AnalyticsResult<(f64, f64)> {
        match self.horizon(horizon) {
            Some(HorizonReturn {
                portfolio: Some(p),
                benchmark: Some(b),
                ..
            }) => Ok((*p, *b)),
            _ => Err(AnalyticsError::insufficient(
                DataStage::Horizon,
                format!("fewer than 2 aligned observations in the {horizon} window"),
            )),
        }
    }
}

/// Compares a portfolio return series with a benchmark return series.
///
/// Each series is compounded into its own growth-of-one index, then the two
/// indices are inner-joined on date. For each horizon the joined index is
/// cut at the horizon start and each side reports `last / first − 1`, or
/// `None` with fewer than two points in the window.
///
/// # Errors
///
/// Fails only if a horizon start date cannot be represented.
pub fn compare_to_benchmark(
    portfolio_returns: &DatedSeries,
    benchmark_returns: &DatedSeries,
    as_of: Date,
) -> AnalyticsResult<BenchmarkComparison> {
    let aligned = portfolio_returns
        .cumulative_index()
        .inner_join(&benchmark_returns.cumulative_index());

    let mut comparison = BenchmarkComparison::default();
    for horizon in Horizon::ALL {
        let window = aligned.since(horizon.start(as_of)?);
        comparison.horizons.push(HorizonReturn {
            horizon,
            portfolio: window.left_series().total_return(),
            benchmark: window.right_series().total_return(),
        });
        comparison.charts.push((horizon, chart_series(window)));
    }
    Ok(comparison)
}

fn chart_series(window: AlignedSeries) -> ChartSeries {
    ChartSeries {
        dates: window.dates,
        portfolio: window.left,
        benchmark: window.right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn daily(start: Date, returns: &[f64]) -> DatedSeries {
        DatedSeries::new(
            returns
                .iter()
                .enumerate()
                .map(|(i, r)| (start.add_days(i as i64), *r))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_short_history_fills_short_horizons_only() {
        let as_of = Date::from_ymd(2024, 6, 15).unwrap();
        let start = as_of.add_days(-10);
        let portfolio = daily(start, &[0.01; 10]);
        let benchmark = daily(start, &[0.005; 10]);

        let cmp = compare_to_benchmark(&portfolio, &benchmark, as_of).unwrap();
        assert_eq!(cmp.horizons.len(), 5);
        assert_eq!(cmp.charts.len(), 5);

        // Ten days of history fit every window.
        for h in &cmp.horizons {
            assert!(h.portfolio.is_some(), "{}", h.horizon);
        }
        let one_month = cmp.horizon(Horizon::OneMonth).unwrap();
        // First index point already includes the first day's return.
        assert_relative_eq!(one_month.portfolio.unwrap(), 1.01f64.powi(9) - 1.0, epsilon = 1e-12);
        assert_relative_eq!(one_month.benchmark.unwrap(), 1.005f64.powi(9) - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_windows_too_short_report_none() {
        let as_of = Date::from_ymd(2024, 6, 15).unwrap();
        // Ten days of data ending eight months ago.
        let start = as_of.add_months(-8).unwrap();
        let portfolio = daily(start, &[0.01; 10]);
        let benchmark = daily(start, &[0.02; 10]);

        let cmp = compare_to_benchmark(&portfolio, &benchmark, as_of).unwrap();
        for horizon in [Horizon::OneMonth, Horizon::ThreeMonths, Horizon::SixMonths] {
            let h = cmp.horizon(horizon).unwrap();
            assert_eq!(h.portfolio, None);
            assert_eq!(h.benchmark, None);
            assert!(cmp.chart(horizon).unwrap().dates.is_empty());
            assert!(matches!(
                cmp.require(horizon),
                Err(AnalyticsError::InsufficientData {
                    stage: DataStage::Horizon,
                    ..
                })
            ));
        }
        let (p, b) = cmp.require(Horizon::OneYear).unwrap();
        assert!(p > 0.0 && b > p);
    }

    #[test]
    fn test_only_shared_dates_are_compared() {
        let as_of = Date::from_ymd(2024, 6, 15).unwrap();
        let start = as_of.add_days(-6);
        let portfolio = daily(start, &[0.01, 0.01, 0.01, 0.01, 0.01]);
        let benchmark = DatedSeries::new(vec![
            (start.add_days(1), 0.0),
            (start.add_days(3), 0.0),
            (start.add_days(5), 0.0),
        ])
        .unwrap();

        let cmp = compare_to_benchmark(&portfolio, &benchmark, as_of).unwrap();
        let chart = cmp.chart(Horizon::OneMonth).unwrap();
        assert_eq!(chart.dates.len(), 2);
        assert_eq!(chart.portfolio.len(), 2);
        assert_relative_eq!(chart.portfolio[0], 1.01f64.powi(2), epsilon = 1e-12);
        assert_relative_eq!(chart.benchmark[1], 1.0, epsilon = 1e-12);
    }
}
