//! Dated containers for price and return data.
//!
//! - [`Date`]: Calendar date with lookback offsets
//! - [`PriceMatrix`]: Dates × tickers adjusted-close prices, gaps allowed
//! - [`ReturnsMatrix`]: Dates × tickers simple returns, no gaps
//! - [`DatedSeries`]: One instrument's dated values
//! - [`AlignedSeries`]: Two series inner-joined on date

mod date;
mod prices;
mod returns;
mod series;

pub use date::Date;
pub use prices::PriceMatrix;
pub use returns::ReturnsMatrix;
pub use series::{AlignedSeries, DatedSeries};
