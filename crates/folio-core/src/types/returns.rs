//! Simple-return matrix.

use serde::{Deserialize, Serialize};

use super::{DatedSeries, Date};
use crate::error::{CoreError, CoreResult};

/// Dated rows × ticker columns of simple period returns with no gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnsMatrix {
    dates: Vec<Date>,
    tickers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ReturnsMatrix {
    /// Creates a returns matrix from complete rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the row count differs from the date count, a row
    /// width differs from the ticker count, or dates are not strictly
    /// increasing.
    pub fn new(dates: Vec<Date>, tickers: Vec<String>, rows: Vec<Vec<f64>>) -> CoreResult<Self> {
        if dates.len() != rows.len() {
            return Err(CoreError::dimension_mismatch(
                "returns dates",
                rows.len(),
                dates.len(),
            ));
        }
        if let Some(row) = rows.iter().find(|r| r.len() != tickers.len()) {
            return Err(CoreError::dimension_mismatch(
                "returns row",
                tickers.len(),
                row.len(),
            ));
        }
        if let Some(pair) = dates.windows(2).find(|p| p[0] >= p[1]) {
            return Err(CoreError::DuplicateDate {
                date: pair[1].to_string(),
            });
        }
        Ok(Self::from_parts(dates, tickers, rows))
    }

    pub(crate) fn from_parts(dates: Vec<Date>, tickers: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self {
            dates,
            tickers,
            rows,
        }
    }

    /// Number of return periods (rows).
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.rows.len()
    }

    /// Number of assets (columns).
    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.tickers.len()
    }

    /// Row dates.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column tickers.
    #[must_use]
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Return rows, one per period.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// One asset's returns across all periods.
    #[must_use]
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[col]).collect()
    }

    /// Weighted portfolio return per period.
    ///
    /// # Errors
    ///
    /// Returns an error if the weight count differs from the asset count.
    pub fn portfolio_returns(&self, weights: &[f64]) -> CoreResult<DatedSeries> {
        if weights.len() != self.tickers.len() {
            return Err(CoreError::dimension_mismatch(
                "portfolio weights",
                self.tickers.len(),
                weights.len(),
            ));
        }
        let points = self
            .dates
            .iter()
            .zip(&self.rows)
            .map(|(date, row)| (*date, row.iter().zip(weights).map(|(r, w)| r * w).sum()))
            .collect();
        Ok(DatedSeries::from_sorted(points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(day: u32) -> Date {
        Date::from_ymd(2024, 3, day).unwrap()
    }

    #[test]
    fn test_new_validates_shape() {
        let ok = ReturnsMatrix::new(
            vec![d(1), d(4)],
            vec!["A".into(), "B".into()],
            vec![vec![0.01, 0.02], vec![-0.01, 0.0]],
        );
        assert!(ok.is_ok());

        let bad_width = ReturnsMatrix::new(vec![d(1)], vec!["A".into()], vec![vec![0.1, 0.2]]);
        assert!(bad_width.is_err());

        let unsorted = ReturnsMatrix::new(
            vec![d(4), d(1)],
            vec!["A".into()],
            vec![vec![0.1], vec![0.2]],
        );
        assert!(unsorted.is_err());
    }

    #[test]
    fn test_portfolio_returns() {
        let returns = ReturnsMatrix::new(
            vec![d(1), d(4)],
            vec!["A".into(), "B".into()],
            vec![vec![0.10, -0.02], vec![-0.05, 0.04]],
        )
        .unwrap();

        let series = returns.portfolio_returns(&[0.25, 0.75]).unwrap();
        let values = series.values();
        assert_relative_eq!(values[0], 0.01, epsilon = 1e-12);
        assert_relative_eq!(values[1], 0.0175, epsilon = 1e-12);

        assert!(returns.portfolio_returns(&[1.0]).is_err());
        assert_eq!(returns.column(1), vec![-0.02, 0.04]);
    }
}
