//! Yahoo Finance v8 chart response parsing.

use chrono::DateTime;
use serde::Deserialize;

use folio_core::Date;
use folio_traits::error::{TraitError, TraitResult};

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<Meta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}

/// Extracts dated adjusted closes from a chart response.
///
/// Falls back to the plain close when the response carries no adjusted
/// series. Timestamps are shifted by the exchange GMT offset before taking
/// the calendar date. Null prices are dropped.
pub fn parse_chart(json: &str) -> TraitResult<Vec<(Date, f64)>> {
    let response: YahooResponse =
        serde_json::from_str(json).map_err(|e| TraitError::ParseError(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(TraitError::NotFound(format!("[{}] {}", error.code, error.description)));
    }

    let Some(data) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let offset = data.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let prices = match data.indicators.adjclose.and_then(|a| a.into_iter().next()) {
        Some(adj) => adj.adjclose,
        None => data
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default(),
    };

    let mut points = Vec::with_capacity(data.timestamp.len());
    for (ts, price) in data.timestamp.iter().zip(prices) {
        let (Some(price), Some(moment)) = (price, DateTime::from_timestamp(ts + offset, 0)) else {
            continue;
        };
        if price.is_finite() {
            points.push((Date::from(moment.date_naive()), price));
        }
    }
    Ok(points)
}

/// Unix timestamp of midnight UTC on `date`.
pub(crate) fn unix_midnight(date: Date) -> i64 {
    date.as_naive_date()
        .and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp())
}
