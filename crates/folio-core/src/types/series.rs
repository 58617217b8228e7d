//! Single-instrument dated series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Date-ordered values for one instrument (a price, return, or index path).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatedSeries {
    points: Vec<(Date, f64)>,
}

impl DatedSeries {
    /// Creates a series, sorting by date and dropping non-finite values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DuplicateDate` if a date appears twice.
    pub fn new(mut points: Vec<(Date, f64)>) -> CoreResult<Self> {
        points.retain(|(_, v)| v.is_finite());
        points.sort_by_key(|(date, _)| *date);
        if let Some(pair) = points.windows(2).find(|p| p[0].0 == p[1].0) {
            return Err(CoreError::DuplicateDate {
                date: pair[0].0.to_string(),
            });
        }
        Ok(Self { points })
    }

    pub(crate) fn from_sorted(points: Vec<(Date, f64)>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All (date, value) points.
    #[must_use]
    pub fn points(&self) -> &[(Date, f64)] {
        &self.points
    }

    /// Dates in order.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.points.iter().map(|(d, _)| *d).collect()
    }

    /// Values in date order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    /// Simple returns between consecutive points, dated at the later point.
    ///
    /// Periods whose starting value is zero are skipped.
    #[must_use]
    pub fn returns(&self) -> DatedSeries {
        let points = self
            .points
            .windows(2)
            .filter(|p| p[0].1 != 0.0)
            .map(|p| (p[1].0, p[1].1 / p[0].1 - 1.0))
            .collect();
        Self { points }
    }

    /// Growth-of-one index: running product of `1 + r`.
    #[must_use]
    pub fn cumulative_index(&self) -> DatedSeries {
        let mut level = 1.0;
        let points = self
            .points
            .iter()
            .map(|(date, r)| {
                level *= 1.0 + r;
                (*date, level)
            })
            .collect();
        Self { points }
    }

    /// Points dated on or after `start`.
    #[must_use]
    pub fn since(&self, start: Date) -> DatedSeries {
        let first = self.points.partition_point(|(d, _)| *d < start);
        Self {
            points: self.points[first..].to_vec(),
        }
    }

    /// `last / first − 1`, or `None` with fewer than two points.
    #[must_use]
    pub fn total_return(&self) -> Option<f64> {
        if self.points.len() < 2 {
            return None;
        }
        let first = self.points.first()?.1;
        let last = self.points.last()?.1;
        Some(last / first - 1.0)
    }

    /// Keeps only dates present in both series.
    #[must_use]
    pub fn inner_join(&self, other: &DatedSeries) -> AlignedSeries {
        let right: BTreeMap<Date, f64> = other.points.iter().copied().collect();
        let mut aligned = AlignedSeries::default();
        for (date, left) in &self.points {
            if let Some(r) = right.get(date) {
                aligned.dates.push(*date);
                aligned.left.push(*left);
                aligned.right.push(*r);
            }
        }
        aligned
    }
}

/// Two series sharing one date index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedSeries {
    /// Shared dates, ascending.
    pub dates: Vec<Date>,
    /// Values of the first series.
    pub left: Vec<f64>,
    /// Values of the second series.
    pub right: Vec<f64>,
}

impl AlignedSeries {
    /// Number of aligned dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// True if no dates are shared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rows dated on or after `start`.
    #[must_use]
    pub fn since(&self, start: Date) -> AlignedSeries {
        let first = self.dates.partition_point(|d| *d < start);
        AlignedSeries {
            dates: self.dates[first..].to_vec(),
            left: self.left[first..].to_vec(),
            right: self.right[first..].to_vec(),
        }
    }

    /// The first series on its own.
    #[must_use]
    pub fn left_series(&self) -> DatedSeries {
        DatedSeries::from_sorted(self.dates.iter().copied().zip(self.left.iter().copied()).collect())
    }

    /// The second series on its own.
    #[must_use]
    pub fn right_series(&self) -> DatedSeries {
        DatedSeries::from_sorted(
            self.dates
                .iter()
                .copied()
                .zip(self.right.iter().copied())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(month: u32, day: u32) -> Date {
        Date::from_ymd(2024, month, day).unwrap()
    }

    #[test]
    fn test_new_sorts_and_rejects_duplicates() {
        let series = DatedSeries::new(vec![(d(1, 3), 2.0), (d(1, 2), 1.0), (d(1, 4), f64::NAN)]).unwrap();
        assert_eq!(series.dates(), vec![d(1, 2), d(1, 3)]);

        assert!(DatedSeries::new(vec![(d(1, 2), 1.0), (d(1, 2), 2.0)]).is_err());
    }

    #[test]
    fn test_returns_and_cumulative_index() {
        let prices = DatedSeries::new(vec![
            (d(1, 2), 100.0),
            (d(1, 3), 120.0),
            (d(1, 4), 90.0),
            (d(1, 5), 110.0),
        ])
        .unwrap();

        let returns = prices.returns();
        assert_eq!(returns.len(), 3);
        assert_relative_eq!(returns.values()[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(returns.values()[1], -0.25, epsilon = 1e-12);

        let index = returns.cumulative_index();
        assert_relative_eq!(index.values()[0], 1.2, epsilon = 1e-12);
        assert_relative_eq!(index.values()[1], 0.9, epsilon = 1e-12);
        assert_relative_eq!(index.values()[2], 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_since_and_total_return() {
        let index = DatedSeries::new(vec![(d(1, 2), 1.0), (d(2, 1), 1.1), (d(3, 1), 1.21)]).unwrap();
        assert_relative_eq!(index.since(d(1, 15)).total_return().unwrap(), 0.1, epsilon = 1e-12);
        assert_eq!(index.since(d(2, 15)).total_return(), None);
        assert_eq!(DatedSeries::default().total_return(), None);
    }

    #[test]
    fn test_inner_join() {
        let a = DatedSeries::new(vec![(d(1, 2), 1.0), (d(1, 3), 2.0), (d(1, 4), 3.0)]).unwrap();
        let b = DatedSeries::new(vec![(d(1, 3), 20.0), (d(1, 4), 30.0), (d(1, 5), 40.0)]).unwrap();

        let aligned = a.inner_join(&b);
        assert_eq!(aligned.dates, vec![d(1, 3), d(1, 4)]);
        assert_eq!(aligned.left, vec![2.0, 3.0]);
        assert_eq!(aligned.right, vec![20.0, 30.0]);

        let tail = aligned.since(d(1, 4));
        assert_eq!(tail.len(), 1);
        assert_eq!(tail.right_series().values(), vec![30.0]);
    }
}
