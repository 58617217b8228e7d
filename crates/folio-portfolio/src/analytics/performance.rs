//! Holdings performance calculator.

use std::collections::{BTreeSet, HashMap};

use crate::bucketing::{bucket_by_asset_class, bucket_by_sector};
use crate::types::{
    ClassificationSnapshot, ExcludedHolding, ExclusionReason, Holding, HoldingPerformance,
    HoldingsAnalytics,
};

/// Maximum entries in the gainers and losers lists.
pub const TOP_MOVERS: usize = 5;

/// Joins holdings with current prices and classifications.
///
/// A holding is included only if its current price and entry price are both
/// positive; the others go to [`HoldingsAnalytics::excluded`] and take no
/// part in totals or exposures.
#[must_use]
pub fn calculate_holdings_performance(
    holdings: &[Holding],
    current_prices: &HashMap<String, f64>,
    classification: &ClassificationSnapshot,
) -> HoldingsAnalytics {
    let mut included = Vec::with_capacity(holdings.len());
    let mut excluded = Vec::new();

    for holding in holdings {
        let current_price = current_prices.get(&holding.ticker).copied().unwrap_or(0.0);
        let reason = if current_price.is_nan() || current_price <= 0.0 {
            Some(ExclusionReason::MissingPrice)
        } else if holding.entry_price.is_nan() || holding.entry_price <= 0.0 {
            Some(ExclusionReason::NonPositiveEntryPrice)
        } else {
            None
        };
        if let Some(reason) = reason {
            excluded.push(ExcludedHolding {
                ticker: holding.ticker.clone(),
                reason,
            });
            continue;
        }

        let invested_amount = holding.entry_price * holding.quantity;
        let current_value = current_price * holding.quantity;
        let gain_loss = current_value - invested_amount;
        let gain_loss_pct = if invested_amount > 0.0 {
            gain_loss / invested_amount * 100.0
        } else {
            0.0
        };

        included.push(HoldingPerformance {
            ticker: holding.ticker.clone(),
            entry_price: holding.entry_price,
            current_price,
            quantity: holding.quantity,
            invested_amount,
            current_value,
            gain_loss,
            gain_loss_pct,
            sector: classification.sector(&holding.ticker).to_string(),
            asset_class: classification.asset_class(&holding.ticker).to_string(),
        });
    }

    let total_invested: f64 = included.iter().map(|h| h.invested_amount).sum();
    let total_current_value: f64 = included.iter().map(|h| h.current_value).sum();
    let total_gain_loss = total_current_value - total_invested;
    let total_return_pct = if total_invested > 0.0 {
        total_gain_loss / total_invested * 100.0
    } else {
        0.0
    };

    // Stable: equal performers keep upload order.
    included.sort_by(|a, b| b.gain_loss_pct.total_cmp(&a.gain_loss_pct));

    let top_gainers = included
        .iter()
        .take(TOP_MOVERS)
        .filter(|h| h.gain_loss_pct > 0.0)
        .map(|h| (h.ticker.clone(), h.gain_loss_pct / 100.0))
        .collect();
    let top_losers = included
        .iter()
        .rev()
        .take(TOP_MOVERS)
        .filter(|h| h.gain_loss_pct < 0.0)
        .map(|h| (h.ticker.clone(), h.gain_loss_pct / 100.0))
        .collect();

    HoldingsAnalytics {
        sector_exposure: bucket_by_sector(&included),
        asset_allocation: bucket_by_asset_class(&included),
        holdings: included,
        total_invested,
        total_current_value,
        total_gain_loss,
        total_return_pct,
        top_gainers,
        top_losers,
        excluded,
    }
}

/// Distinct holding tickers with no classification entry, sorted.
#[must_use]
pub fn unmapped_tickers(holdings: &[Holding], classification: &ClassificationSnapshot) -> Vec<String> {
    holdings
        .iter()
        .filter(|h| !classification.contains(&h.ticker))
        .map(|h| h.ticker.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
