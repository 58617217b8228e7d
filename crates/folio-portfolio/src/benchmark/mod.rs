//! Benchmark comparison analytics.
//!
//! Compares a portfolio against a benchmark index over the fixed reporting
//! horizons (1M, 3M, 6M, YTD, 1Y):
//! - Growth-of-one index per side, aligned on shared dates
//! - Windowed total return per horizon, `None` when the window is too short
//! - Chart-ready aligned index levels per horizon
//!
//! # Example
//!
//! ```rust
//! use folio_core::{DatedSeries, Date};
//! use folio_portfolio::benchmark::compare_to_benchmark;
//! use folio_portfolio::types::Horizon;
//!
//! let as_of = Date::from_ymd(2024, 6, 14).unwrap();
//! let days = |r: f64| {
//!     DatedSeries::new((1..=5).map(|i| (as_of.add_days(-i), r)).collect()).unwrap()
//! };
//!
//! let cmp = compare_to_benchmark(&days(0.01), &days(0.0), as_of).unwrap();
//! let month = cmp.horizon(Horizon::OneMonth).unwrap();
//! assert!(month.portfolio.unwrap() > 0.0);
//! assert_eq!(month.benchmark, Some(0.0));
//! ```

mod comparison;

pub use comparison::*;
