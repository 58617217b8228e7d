//! # Folio Core
//!
//! Core types shared by every Folio crate.
//!
//! - **Dates**: a [`Date`] newtype with the calendar offsets used by
//!   lookback windows and reporting horizons (month/year shifts, start of year)
//! - **Prices**: [`PriceMatrix`], dated rows of adjusted closes with missing
//!   entries for tickers that did not trade
//! - **Returns**: [`ReturnsMatrix`], period-over-period changes with
//!   incomplete rows removed
//! - **Series**: [`DatedSeries`] and [`AlignedSeries`] for single-instrument
//!   return and index series
//!
//! ## Example
//!
//! ```rust
//! use folio_core::prelude::*;
//!
//! let d0 = Date::from_ymd(2024, 1, 2).unwrap();
//! let d1 = Date::from_ymd(2024, 1, 3).unwrap();
//! let d2 = Date::from_ymd(2024, 1, 4).unwrap();
//!
//! let prices = PriceMatrix::from_rows(
//!     vec!["AAA".into(), "BBB".into()],
//!     vec![
//!         (d0, vec![Some(100.0), Some(50.0)]),
//!         (d1, vec![Some(101.0), Some(51.0)]),
//!         (d2, vec![Some(102.0), None]),
//!     ],
//! )
//! .unwrap();
//!
//! let returns = prices.pct_change();
//! assert_eq!(returns.num_periods(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{AlignedSeries, DatedSeries, Date, PriceMatrix, ReturnsMatrix};

/// Convenient imports for downstream crates.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{AlignedSeries, DatedSeries, Date, PriceMatrix, ReturnsMatrix};
}
