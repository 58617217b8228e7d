//! Request handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use folio_core::Date;
use folio_engine::{AnalyticsEngine, EngineError, HoldingsReport, OptimizeRequest};
use folio_ext_file::{parse_holdings_csv, SkippedRow};
use folio_traits::{TraitError, UniverseEntry};

/// Application state.
pub struct AppState {
    /// The analytics engine
    pub engine: Arc<AnalyticsEngine>,
}

/// Handler response: status plus JSON body.
pub type ApiResponse = (StatusCode, Json<Value>);

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiResponse {
    let message: String = message.into();
    (status, Json(serde_json::json!({ "error": message })))
}

fn ok_response<T: Serialize>(value: &T) -> ApiResponse {
    match serde_json::to_value(value) {
        Ok(json) => (StatusCode::OK, Json(json)),
        Err(e) => {
            error!(error = %e, "failed to serialize response");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to serialize response")
        }
    }
}

/// 400 for request faults, 500 for everything else.
fn engine_error_response(e: &EngineError) -> ApiResponse {
    let status = if e.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let message = match e {
        EngineError::Source(TraitError::NotFound(reason)) => reason.clone(),
        other => other.to_string(),
    };
    if status.is_server_error() {
        error!(error = %e, "request failed");
    } else {
        warn!(error = %e, "request rejected");
    }
    error_response(status, message)
}

// =============================================================================
// HOLDINGS
// =============================================================================

/// Holdings upload response: the engine report plus parser diagnostics.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    #[serde(flatten)]
    report: HoldingsReport,
    skipped_rows: Vec<SkippedRow>,
}

async fn read_file_part(multipart: &mut Multipart) -> Option<Result<Bytes, String>> {
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                return Some(field.bytes().await.map_err(|e| e.to_string()));
            }
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => return Some(Err(e.to_string())),
        }
    }
}

/// Upload current holdings CSV (multipart field `file`) and get analytics.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResponse {
    const MISSING_PART: &str = "No holdings file part (key \"file\")";

    let Ok(mut multipart) = multipart else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_PART);
    };
    let bytes = match read_file_part(&mut multipart).await {
        Some(Ok(bytes)) => bytes,
        Some(Err(e)) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Error reading holdings file: {e}"),
            )
        }
        None => return error_response(StatusCode::BAD_REQUEST, MISSING_PART),
    };
    let Ok(text) = std::str::from_utf8(&bytes) else {
        return error_response(StatusCode::BAD_REQUEST, "Holdings file is not valid UTF-8");
    };

    let parsed = parse_holdings_csv(text);
    if parsed.holdings.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No valid holdings found in CSV");
    }

    match state.engine.analyze_holdings(&parsed.holdings, Date::today()).await {
        Ok(report) => ok_response(&UploadResponse {
            report,
            skipped_rows: parsed.skipped,
        }),
        Err(e) if e.is_unavailable_prices() => {
            warn!(error = %e, "no current prices");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to fetch current prices",
            )
        }
        Err(e) => {
            error!(error = %e, "error processing holdings");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing holdings: {e}"),
            )
        }
    }
}

/// Re-read the classification map.
pub async fn reload_mapping(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.engine.reload_classifications().await {
        Ok(snapshot) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "loaded": snapshot.len(),
                "version": snapshot.version(),
            })),
        ),
        Err(e) => engine_error_response(&e),
    }
}

// =============================================================================
// UNIVERSE
// =============================================================================

/// One universe row as listed by `/tickers`.
#[derive(Serialize)]
pub struct TickerRecord {
    #[serde(rename = "Ticker")]
    ticker: String,
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Sector")]
    sector: String,
    #[serde(rename = "AssetClass")]
    asset_class: String,
}

impl From<UniverseEntry> for TickerRecord {
    fn from(entry: UniverseEntry) -> Self {
        Self {
            ticker: entry.ticker,
            symbol: entry.symbol,
            sector: entry.sector,
            asset_class: entry.asset_class,
        }
    }
}

/// Sorted distinct universe sectors.
pub async fn list_sectors(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.engine.list_sectors().await {
        Ok(sectors) => ok_response(&sectors),
        Err(e) => engine_error_response(&e),
    }
}

/// Sorted distinct universe asset classes.
pub async fn list_asset_classes(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.engine.list_asset_classes().await {
        Ok(classes) => ok_response(&classes),
        Err(e) => engine_error_response(&e),
    }
}

/// Every universe entry.
pub async fn list_tickers(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.engine.list_tickers().await {
        Ok(entries) => {
            let records: Vec<TickerRecord> = entries.into_iter().map(TickerRecord::from).collect();
            ok_response(&records)
        }
        Err(e) => engine_error_response(&e),
    }
}

// =============================================================================
// OPTIMIZATION
// =============================================================================

/// Screen, optimize and benchmark a portfolio.
///
/// The body is optional; an empty body uses every default.
pub async fn optimize(State(state): State<Arc<AppState>>, body: Bytes) -> ApiResponse {
    let request: OptimizeRequest = if body.iter().all(u8::is_ascii_whitespace) {
        OptimizeRequest::default()
    } else {
        match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid optimization request: {e}"),
                )
            }
        }
    };

    match state.engine.optimize(&request, Date::today()).await {
        Ok(report) => ok_response(&report),
        Err(e) => engine_error_response(&e),
    }
}
