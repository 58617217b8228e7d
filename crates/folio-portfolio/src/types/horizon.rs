//! Reporting horizons for benchmark comparison.

use std::fmt;

use folio_core::{CoreResult, Date};
use serde::{Deserialize, Serialize};

/// A fixed look-back horizon ending at the as-of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Horizon {
    /// One calendar month.
    #[serde(rename = "1M")]
    OneMonth,
    /// Three calendar months.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// Six calendar months.
    #[serde(rename = "6M")]
    SixMonths,
    /// Since January 1st of the as-of year.
    #[serde(rename = "YTD")]
    YearToDate,
    /// One calendar year.
    #[serde(rename = "1Y")]
    OneYear,
}

impl Horizon {
    /// Every horizon in reporting order.
    pub const ALL: [Horizon; 5] = [
        Horizon::OneMonth,
        Horizon::ThreeMonths,
        Horizon::SixMonths,
        Horizon::YearToDate,
        Horizon::OneYear,
    ];

    /// Short label ("1M", "YTD", ...).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Horizon::OneMonth => "1M",
            Horizon::ThreeMonths => "3M",
            Horizon::SixMonths => "6M",
            Horizon::YearToDate => "YTD",
            Horizon::OneYear => "1Y",
        }
    }

    /// First date inside the window.
    ///
    /// # Errors
    ///
    /// Fails only if the shifted date is out of range.
    pub fn start(&self, as_of: Date) -> CoreResult<Date> {
        match self {
            Horizon::OneMonth => as_of.add_months(-1),
            Horizon::ThreeMonths => as_of.add_months(-3),
            Horizon::SixMonths => as_of.add_months(-6),
            Horizon::YearToDate => Ok(as_of.start_of_year()),
            Horizon::OneYear => as_of.add_years(-1),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Portfolio and benchmark return over one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonReturn {
    /// The horizon.
    pub horizon: Horizon,
    /// Portfolio return, `None` with fewer than two observations.
    pub portfolio: Option<f64>,
    /// Benchmark return, `None` with fewer than two observations.
    pub benchmark: Option<f64>,
}

/// Aligned index levels inside one horizon, for charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Shared dates.
    pub dates: Vec<Date>,
    /// Portfolio growth-of-one index.
    pub portfolio: Vec<f64>,
    /// Benchmark growth-of-one index.
    pub benchmark: Vec<f64>,
}
