//! Exposure bucketing by classification label.
//!
//! Each holding's weight is its share of total current value. The same
//! weight is added to its sector bucket and, independently, to its asset
//! class bucket, so each distribution sums to 1 on its own.
//!
//! # Example
//!
//! ```rust
//! use folio_portfolio::bucketing::bucket_by_sector;
//! use folio_portfolio::types::HoldingPerformance;
//!
//! let perf = |ticker: &str, value: f64, sector: &str| HoldingPerformance {
//!     ticker: ticker.into(),
//!     entry_price: 1.0,
//!     current_price: 1.0,
//!     quantity: value,
//!     invested_amount: value,
//!     current_value: value,
//!     gain_loss: 0.0,
//!     gain_loss_pct: 0.0,
//!     sector: sector.into(),
//!     asset_class: "Equity".into(),
//! };
//!
//! let holdings = vec![perf("A", 300.0, "IT"), perf("B", 100.0, "Banks")];
//! let by_sector = bucket_by_sector(&holdings);
//! assert_eq!(by_sector["IT"], 0.75);
//! ```

use std::collections::BTreeMap;

use crate::types::HoldingPerformance;

/// Sums current-value weights per label returned by `key`.
///
/// Empty when the total current value is not positive.
pub fn bucket_by<F>(holdings: &[HoldingPerformance], key: F) -> BTreeMap<String, f64>
where
    F: Fn(&HoldingPerformance) -> &str,
{
    let total: f64 = holdings.iter().map(|h| h.current_value).sum();
    let mut buckets = BTreeMap::new();
    if total <= 0.0 {
        return buckets;
    }
    for holding in holdings {
        *buckets.entry(key(holding).to_string()).or_insert(0.0) += holding.current_value / total;
    }
    buckets
}

/// Current-value weight per sector.
#[must_use]
pub fn bucket_by_sector(holdings: &[HoldingPerformance]) -> BTreeMap<String, f64> {
    bucket_by(holdings, |h| h.sector.as_str())
}

/// Current-value weight per asset class.
#[must_use]
pub fn bucket_by_asset_class(holdings: &[HoldingPerformance]) -> BTreeMap<String, f64> {
    bucket_by(holdings, |h| h.asset_class.as_str())
}
