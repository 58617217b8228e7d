//! Holding inputs and per-holding performance records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One uploaded position.
///
/// `entry_date` is kept as supplied; it is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Instrument ticker.
    pub ticker: String,
    /// Entry date as written in the upload.
    pub entry_date: String,
    /// Price paid per unit.
    pub entry_price: f64,
    /// Units held.
    pub quantity: f64,
}

impl Holding {
    /// Creates a holding. Surrounding whitespace is stripped from the ticker.
    #[must_use]
    pub fn new(
        ticker: impl Into<String>,
        entry_date: impl Into<String>,
        entry_price: f64,
        quantity: f64,
    ) -> Self {
        Self {
            ticker: ticker.into().trim().to_string(),
            entry_date: entry_date.into(),
            entry_price,
            quantity,
        }
    }
}

/// Performance of one included holding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingPerformance {
    /// Instrument ticker.
    pub ticker: String,
    /// Price paid per unit.
    pub entry_price: f64,
    /// Latest price per unit.
    pub current_price: f64,
    /// Units held.
    pub quantity: f64,
    /// `entry_price × quantity`.
    pub invested_amount: f64,
    /// `current_price × quantity`.
    pub current_value: f64,
    /// `current_value − invested_amount`.
    pub gain_loss: f64,
    /// Gain as a percentage of the invested amount.
    pub gain_loss_pct: f64,
    /// Sector from the classification snapshot.
    pub sector: String,
    /// Asset class from the classification snapshot.
    pub asset_class: String,
}

/// Why a holding was left out of the aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// No positive current price was available.
    MissingPrice,
    /// Entry price was zero, negative or unparsable.
    NonPositiveEntryPrice,
}

/// A holding excluded from the aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedHolding {
    /// Instrument ticker.
    pub ticker: String,
    /// Exclusion cause.
    pub reason: ExclusionReason,
}

/// Portfolio-level holdings analytics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingsAnalytics {
    /// Included holdings, best performer first.
    pub holdings: Vec<HoldingPerformance>,
    /// Sum of invested amounts.
    pub total_invested: f64,
    /// Sum of current values.
    pub total_current_value: f64,
    /// `total_current_value − total_invested`.
    pub total_gain_loss: f64,
    /// Total gain as a percentage of the amount invested.
    pub total_return_pct: f64,
    /// Up to five positive performers as (ticker, fractional gain), best first.
    pub top_gainers: Vec<(String, f64)>,
    /// Up to five negative performers as (ticker, fractional loss), worst first.
    pub top_losers: Vec<(String, f64)>,
    /// Current-value weight per sector.
    pub sector_exposure: BTreeMap<String, f64>,
    /// Current-value weight per asset class.
    pub asset_allocation: BTreeMap<String, f64>,
    /// Holdings left out of every aggregate.
    pub excluded: Vec<ExcludedHolding>,
}
