//! Holdings CSV parsing.
//!
//! Expected columns: `Ticker, EntryDate, EntryPrice[, Quantity]`, header
//! optional. Malformed rows never fail the upload; they are reported in
//! [`ParsedHoldings::skipped`].

use csv::{ReaderBuilder, StringRecord};
use folio_portfolio::Holding;
use serde::{Deserialize, Serialize};

const HEADER_WORDS: [&str; 6] = ["ticker", "symbol", "entry", "date", "price", "quantity"];

/// A CSV row that did not become a holding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the upload.
    pub line: u64,
    /// Why the row was dropped.
    pub reason: String,
}

/// Result of parsing a holdings upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedHoldings {
    /// Parsed holdings in file order.
    pub holdings: Vec<Holding>,
    /// Rows that were dropped.
    pub skipped: Vec<SkippedRow>,
}

fn is_header(record: &StringRecord) -> bool {
    record.len() >= 3
        && record
            .iter()
            .any(|field| HEADER_WORDS.contains(&field.trim().to_lowercase().as_str()))
}

/// Lenient float parse: blanks and junk fall back to `default`.
fn parse_or(field: Option<&str>, default: f64) -> f64 {
    field
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

/// Parses holdings from CSV text.
///
/// - Rows with fewer than three fields are skipped
/// - An unparsable entry price becomes `0.0` (the holding is later excluded)
/// - A missing or unparsable quantity becomes `1.0`
#[must_use]
pub fn parse_holdings_csv(text: &str) -> ParsedHoldings {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedHoldings::default();
    let mut first = true;

    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map_or(index as u64 + 1, csv::Position::line);
                parsed.skipped.push(SkippedRow {
                    line,
                    reason: format!("unreadable row: {e}"),
                });
                first = false;
                continue;
            }
        };
        let line = record.position().map_or(index as u64 + 1, csv::Position::line);

        if std::mem::take(&mut first) && is_header(&record) {
            continue;
        }
        if record.len() < 3 {
            parsed.skipped.push(SkippedRow {
                line,
                reason: format!("expected at least 3 fields, found {}", record.len()),
            });
            continue;
        }

        parsed.holdings.push(Holding::new(
            record.get(0).unwrap_or_default(),
            record.get(1).unwrap_or_default().trim(),
            parse_or(record.get(2), 0.0),
            parse_or(record.get(3), 1.0),
        ));
    }

    tracing::debug!(
        holdings = parsed.holdings.len(),
        skipped = parsed.skipped.len(),
        "parsed holdings upload"
    );
    parsed
}
