//! Adjusted-close price matrix.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{Date, ReturnsMatrix};
use crate::error::{CoreError, CoreResult};

/// Dated rows × ticker columns of adjusted close prices.
///
/// Rows are strictly increasing by date. A `None` entry means the ticker
/// has no observation on that date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceMatrix {
    dates: Vec<Date>,
    tickers: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl PriceMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a matrix from dated rows.
    ///
    /// Rows are sorted by date. Non-finite values are stored as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if a row width differs from the ticker count or a
    /// date repeats.
    pub fn from_rows(
        tickers: Vec<String>,
        mut rows: Vec<(Date, Vec<Option<f64>>)>,
    ) -> CoreResult<Self> {
        for (_, row) in &rows {
            if row.len() != tickers.len() {
                return Err(CoreError::dimension_mismatch(
                    "price row",
                    tickers.len(),
                    row.len(),
                ));
            }
        }

        rows.sort_by_key(|(date, _)| *date);
        for pair in rows.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(CoreError::DuplicateDate {
                    date: pair[0].0.to_string(),
                });
            }
        }

        let (dates, values) = rows
            .into_iter()
            .map(|(date, row)| {
                let row = row
                    .into_iter()
                    .map(|v| v.filter(|x| x.is_finite()))
                    .collect();
                (date, row)
            })
            .unzip();

        Ok(Self {
            dates,
            tickers,
            values,
        })
    }

    /// Builds a matrix from per-ticker observations.
    ///
    /// The row index is the union of all observation dates. A later
    /// observation for the same ticker and date replaces an earlier one;
    /// a repeated ticker merges into its first column.
    #[must_use]
    pub fn from_series<I, S>(series: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<(Date, f64)>)>,
        S: Into<String>,
    {
        let mut tickers: Vec<String> = Vec::new();
        let mut columns: Vec<BTreeMap<Date, f64>> = Vec::new();
        let mut all_dates = BTreeSet::new();

        for (ticker, points) in series {
            let ticker = ticker.into();
            let idx = match tickers.iter().position(|t| *t == ticker) {
                Some(idx) => idx,
                None => {
                    tickers.push(ticker);
                    columns.push(BTreeMap::new());
                    tickers.len() - 1
                }
            };
            for (date, value) in points {
                if value.is_finite() {
                    all_dates.insert(date);
                    columns[idx].insert(date, value);
                }
            }
        }

        let dates: Vec<Date> = all_dates.into_iter().collect();
        let values = dates
            .iter()
            .map(|date| columns.iter().map(|col| col.get(date).copied()).collect())
            .collect();

        Self {
            dates,
            tickers,
            values,
        }
    }

    /// True when the matrix has no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.tickers.is_empty()
    }

    /// Row dates, ascending.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column tickers.
    #[must_use]
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Number of dated rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.dates.len()
    }

    /// Number of ticker columns.
    #[must_use]
    pub fn num_tickers(&self) -> usize {
        self.tickers.len()
    }

    /// Price at (row, column), if present.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    fn column_index(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// The full column for a ticker, gaps included.
    #[must_use]
    pub fn column(&self, ticker: &str) -> Option<Vec<Option<f64>>> {
        let col = self.column_index(ticker)?;
        Some(self.values.iter().map(|row| row[col]).collect())
    }

    /// Non-missing observations for a ticker, in date order.
    #[must_use]
    pub fn observations(&self, ticker: &str) -> Vec<(Date, f64)> {
        let Some(col) = self.column_index(ticker) else {
            return Vec::new();
        };
        self.dates
            .iter()
            .zip(&self.values)
            .filter_map(|(date, row)| row[col].map(|v| (*date, v)))
            .collect()
    }

    /// Most recent non-missing price for a ticker.
    #[must_use]
    pub fn last_observation(&self, ticker: &str) -> Option<f64> {
        let col = self.column_index(ticker)?;
        self.values.iter().rev().find_map(|row| row[col])
    }

    /// Removes rows where every ticker is missing.
    #[must_use]
    pub fn drop_empty_rows(self) -> Self {
        let (dates, values) = self
            .dates
            .into_iter()
            .zip(self.values)
            .filter(|(_, row)| row.iter().any(Option::is_some))
            .unzip();
        Self {
            dates,
            tickers: self.tickers,
            values,
        }
    }

    /// Removes tickers with no observation at all.
    #[must_use]
    pub fn drop_empty_columns(self) -> Self {
        let keep: Vec<usize> = (0..self.tickers.len())
            .filter(|&col| self.values.iter().any(|row| row[col].is_some()))
            .collect();
        self.project(&keep)
    }

    /// Keeps the requested tickers that are present, in the requested order.
    #[must_use]
    pub fn select(self, tickers: &[String]) -> Self {
        let keep: Vec<usize> = tickers
            .iter()
            .filter_map(|t| self.column_index(t))
            .collect();
        self.project(&keep)
    }

    /// Keeps rows dated on or after `start`.
    #[must_use]
    pub fn since(self, start: Date) -> Self {
        let first = self.dates.partition_point(|d| *d < start);
        Self {
            dates: self.dates[first..].to_vec(),
            tickers: self.tickers,
            values: self.values[first..].to_vec(),
        }
    }

    /// Keeps rows dated strictly before `end`.
    #[must_use]
    pub fn before(mut self, end: Date) -> Self {
        let last = self.dates.partition_point(|d| *d < end);
        self.dates.truncate(last);
        self.values.truncate(last);
        self
    }

    fn project(self, cols: &[usize]) -> Self {
        let tickers = cols.iter().map(|&c| self.tickers[c].clone()).collect();
        let values = self
            .values
            .iter()
            .map(|row| cols.iter().map(|&c| row[c]).collect())
            .collect();
        Self {
            dates: self.dates,
            tickers,
            values,
        }
    }

    /// Period-over-period simple returns.
    ///
    /// A row survives only when every ticker has a price on that date and on
    /// the previous row, and the previous price is non-zero.
    #[must_use]
    pub fn pct_change(&self) -> ReturnsMatrix {
        let mut dates = Vec::new();
        let mut rows = Vec::new();

        for t in 1..self.dates.len() {
            let prev = &self.values[t - 1];
            let cur = &self.values[t];
            let row: Option<Vec<f64>> = prev
                .iter()
                .zip(cur)
                .map(|(p, c)| match (p, c) {
                    (Some(p), Some(c)) if *p != 0.0 => Some(c / p - 1.0),
                    _ => None,
                })
                .collect();
            if let Some(row) = row {
                dates.push(self.dates[t]);
                rows.push(row);
            }
        }

        ReturnsMatrix::from_parts(dates, self.tickers.clone(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 1, day).unwrap()
    }

    fn sample() -> PriceMatrix {
        PriceMatrix::from_rows(
            vec!["AAA".into(), "BBB".into(), "CCC".into()],
            vec![
                (d(3), vec![Some(110.0), None, None]),
                (d(2), vec![Some(100.0), Some(50.0), None]),
                (d(4), vec![None, Some(55.0), None]),
                (d(5), vec![None, None, None]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_sorts_and_validates() {
        let prices = sample();
        assert_eq!(prices.dates()[0], d(2));
        assert_eq!(prices.num_rows(), 4);
        assert_eq!(prices.get(0, 1), Some(50.0));

        let err = PriceMatrix::from_rows(vec!["AAA".into()], vec![(d(2), vec![])]);
        assert!(matches!(err, Err(CoreError::DimensionMismatch { .. })));

        let err = PriceMatrix::from_rows(
            vec!["AAA".into()],
            vec![(d(2), vec![Some(1.0)]), (d(2), vec![Some(2.0)])],
        );
        assert!(matches!(err, Err(CoreError::DuplicateDate { .. })));
    }

    #[test]
    fn test_from_series_unions_dates() {
        let prices = PriceMatrix::from_series(vec![
            ("AAA", vec![(d(2), 1.0), (d(4), 2.0)]),
            ("BBB", vec![(d(3), 5.0), (d(4), f64::NAN)]),
        ]);
        assert_eq!(prices.dates(), &[d(2), d(3), d(4)]);
        assert_eq!(prices.column("BBB").unwrap(), vec![None, Some(5.0), None]);
    }

    #[test]
    fn test_observations_and_last() {
        let prices = sample();
        assert_eq!(prices.observations("AAA"), vec![(d(2), 100.0), (d(3), 110.0)]);
        assert_eq!(prices.last_observation("AAA"), Some(110.0));
        assert_eq!(prices.last_observation("CCC"), None);
        assert_eq!(prices.last_observation("ZZZ"), None);
    }

    #[test]
    fn test_drop_empty_rows_and_columns() {
        let prices = sample().drop_empty_rows().drop_empty_columns();
        assert_eq!(prices.num_rows(), 3);
        assert_eq!(prices.tickers(), &["AAA".to_string(), "BBB".to_string()]);
    }

    #[test]
    fn test_select_since_before() {
        let prices = sample()
            .select(&["BBB".into(), "ZZZ".into()])
            .since(d(3));
        assert_eq!(prices.tickers(), &["BBB".to_string()]);
        assert_eq!(prices.dates(), &[d(3), d(4), d(5)]);

        let prices = prices.before(d(5));
        assert_eq!(prices.dates(), &[d(3), d(4)]);
        assert_eq!(prices.get(1, 0), Some(55.0));
    }

    #[test]
    fn test_pct_change_drops_incomplete_rows() {
        let prices = PriceMatrix::from_rows(
            vec!["AAA".into(), "BBB".into()],
            vec![
                (d(2), vec![Some(100.0), Some(50.0)]),
                (d(3), vec![Some(110.0), Some(55.0)]),
                (d(4), vec![Some(99.0), None]),
                (d(5), vec![Some(99.0), Some(60.0)]),
                (d(8), vec![Some(108.9), Some(54.0)]),
            ],
        )
        .unwrap();

        let returns = prices.pct_change();
        assert_eq!(returns.num_periods(), 2);
        assert_eq!(returns.dates(), &[d(3), d(8)]);
        assert_relative_eq!(returns.rows()[0][0], 0.10, epsilon = 1e-12);
        assert_relative_eq!(returns.rows()[1][1], -0.10, epsilon = 1e-12);
    }
}
