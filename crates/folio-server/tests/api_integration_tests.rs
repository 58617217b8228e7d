//! Integration tests for the Folio Server API endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use folio_core::{Date, PriceMatrix};
use folio_engine::{AnalyticsEngine, AnalyticsEngineBuilder};
use folio_ext_file::{
    EmptyPriceSource, InMemoryClassificationSource, InMemoryPriceSource, InMemoryUniverseSource,
    MissingUniverseSource,
};
use folio_server::routes::create_router;
use folio_traits::market_data::PriceSource;
use folio_traits::reference_data::{ClassificationRecord, UniverseEntry, UniverseSource};

// =============================================================================
// FIXTURES
// =============================================================================

/// Daily closes for `days` calendar days ending yesterday.
fn path(days: i64, base: f64, drift: f64, wiggle: f64, phase: f64) -> Vec<(Date, f64)> {
    let today = Date::today();
    (0..days)
        .map(|i| {
            let t = i as f64;
            (today.add_days(i - days), base * (drift * t + wiggle * (0.7 * t + phase).sin()).exp())
        })
        .collect()
}

fn market() -> Arc<dyn PriceSource> {
    Arc::new(InMemoryPriceSource::new(PriceMatrix::from_series(vec![
        ("DOWN.NS", path(400, 80.0, -0.001, 0.010, 0.3)),
        ("FLAT.NS", path(400, 120.0, 0.0, 0.012, 1.1)),
        ("UP.NS", path(400, 50.0, 0.002, 0.015, 2.0)),
        ("MID.NS", path(400, 200.0, 0.001, 0.008, 0.5)),
        ("^NSEI", path(2000, 20_000.0, 0.0004, 0.005, 0.9)),
    ])))
}

fn universe() -> Arc<dyn UniverseSource> {
    Arc::new(InMemoryUniverseSource::new(vec![
        UniverseEntry::from_symbol("DOWN", ".NS", "Energy", None),
        UniverseEntry::from_symbol("FLAT", ".NS", "Banks", None),
        UniverseEntry::from_symbol("UP", ".NS", "IT", None),
        UniverseEntry::from_symbol("MID", ".NS", "IT", Some("Equity")),
    ]))
}

fn create_engine(prices: Arc<dyn PriceSource>, universe: Arc<dyn UniverseSource>) -> Arc<AnalyticsEngine> {
    let mapping = InMemoryClassificationSource::new(vec![ClassificationRecord {
        ticker: "UP.NS".into(),
        sector: "IT".into(),
        asset_class: "Equity".into(),
    }]);
    let engine = AnalyticsEngineBuilder::new()
        .with_prices(prices)
        .with_universe(universe)
        .with_classifications(Arc::new(mapping))
        .build()
        .expect("Failed to build engine");
    Arc::new(engine)
}

fn create_test_app() -> axum::Router {
    create_router(create_engine(market(), universe()))
}

/// Helper to send a request and get the JSON response.
async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap_or(json!({}));
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_raw(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &serde_json::to_string(&body).unwrap()).await
}

/// Multipart upload with a single part named `field`.
async fn upload(app: axum::Router, field: &str, csv: &str) -> (StatusCode, Value) {
    let boundary = "folio-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"holdings.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv}\r\n\
         --{boundary}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header("Content-Type", format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

const HOLDINGS: &str = "Ticker,EntryDate,EntryPrice,Quantity\n\
                        UP.NS,2024-01-01,40,10\n\
                        MID.NS,2024-01-01,250,2\n\
                        BAD\n\
                        GHOST.NS,2024-01-01,10,1";

// =============================================================================
// HEALTH CHECK TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get(create_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

// =============================================================================
// UPLOAD TESTS
// =============================================================================

#[tokio::test]
async fn test_upload_holdings() {
    let (status, json) = upload(create_test_app(), "file", HOLDINGS).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalHoldings"], 3);
    assert_eq!(json["pricesFetched"], 3);
    assert_eq!(json["portfolioDetails"].as_array().unwrap().len(), 2);
    assert_eq!(json["excludedHoldings"][0]["ticker"], "GHOST.NS");
    assert_eq!(json["excludedHoldings"][0]["reason"], "missing_price");
    assert_eq!(json["skippedRows"].as_array().unwrap().len(), 1);
    assert_eq!(json["skippedRows"][0]["line"], 4);

    let invested = json["totalInvested"].as_f64().unwrap();
    assert!((invested - 900.0).abs() < 1e-9);
    let sectors: f64 = json["sectorExposure"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .sum();
    assert!((sectors - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_upload_uses_reloaded_mapping() {
    let app = create_test_app();

    let (_, before) = upload(app.clone(), "file", HOLDINGS).await;
    assert_eq!(before["unmappedTickers"], json!(["GHOST.NS", "MID.NS", "UP.NS"]));

    let (status, reload) = post_raw(app.clone(), "/reload-mapping", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reload, json!({"status": "ok", "loaded": 1, "version": 1}));

    let (_, after) = upload(app.clone(), "file", HOLDINGS).await;
    assert_eq!(after["unmappedTickers"], json!(["GHOST.NS", "MID.NS"]));
    assert!(after["sectorExposure"]["IT"].as_f64().unwrap() > 0.0);

    let (_, again) = post_raw(app, "/reload-mapping", "").await;
    assert_eq!(again["version"], 2);
}

#[tokio::test]
async fn test_upload_without_file_part() {
    let (status, json) = upload(create_test_app(), "holdings", HOLDINGS).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No holdings file part (key \"file\")");
}

#[tokio::test]
async fn test_upload_not_multipart() {
    let (status, json) = post_json(create_test_app(), "/upload", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("file"));
}

#[tokio::test]
async fn test_upload_no_valid_holdings() {
    let (status, json) = upload(create_test_app(), "file", "Ticker,EntryDate,EntryPrice\nX\n").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No valid holdings found in CSV");
}

#[tokio::test]
async fn test_upload_without_prices() {
    let app = create_router(create_engine(Arc::new(EmptyPriceSource), universe()));
    let (status, json) = upload(app, "file", HOLDINGS).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Unable to fetch current prices");
}

#[tokio::test]
async fn test_upload_blank_tickers() {
    let csv = "Ticker,EntryDate,EntryPrice,Quantity\n ,2024-01-01,40,10\n,2024-01-01,250,2";
    let (status, json) = upload(create_test_app(), "file", csv).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Unable to fetch current prices");
}

// =============================================================================
// UNIVERSE TESTS
// =============================================================================

#[tokio::test]
async fn test_universe_listings() {
    let app = create_test_app();

    let (status, sectors) = get(app.clone(), "/sectors").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sectors, json!(["Banks", "Energy", "IT"]));

    let (_, classes) = get(app.clone(), "/asset_classes").await;
    assert_eq!(classes, json!(["Equity"]));

    let (_, tickers) = get(app, "/tickers").await;
    assert_eq!(tickers.as_array().unwrap().len(), 4);
    assert_eq!(
        tickers[2],
        json!({"Ticker": "UP.NS", "Symbol": "UP", "Sector": "IT", "AssetClass": "Equity"})
    );
}

#[tokio::test]
async fn test_missing_universe_lists_empty() {
    let app = create_router(create_engine(market(), Arc::new(MissingUniverseSource)));

    for uri in ["/sectors", "/asset_classes", "/tickers"] {
        let (status, json) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json, json!([]), "{uri}");
    }
}

// =============================================================================
// OPTIMIZE TESTS
// =============================================================================

#[tokio::test]
async fn test_optimize() {
    let body = json!({
        "sectors": [],
        "asset_classes": ["Equity"],
        "num_stocks": 3,
        "objective": "vol"
    });
    let (status, json) = post_json(create_test_app(), "/optimize", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_stocks"], json!(["UP.NS", "MID.NS", "FLAT.NS"]));

    let weights = json["weights"].as_object().unwrap();
    assert_eq!(weights.len(), 3);
    let total: f64 = weights.values().map(|w| w.as_f64().unwrap()).sum();
    assert!((total - 1.0).abs() < 1e-8);

    assert_eq!(json["weight_table"][0]["symbol"], "UP");
    assert_eq!(json["weight_table"][0]["sector"], "IT");
    assert!(json["metrics"]["annualized_volatility"].as_f64().unwrap() > 0.0);
    for horizon in ["1M", "3M", "6M", "YTD", "1Y"] {
        assert!(json["benchmark_returns"][horizon].is_object(), "{horizon}");
        assert!(json["chart_data"][horizon]["dates"].is_array(), "{horizon}");
    }
    assert!(json["benchmark_returns"]["1Y"]["Nifty"].is_f64());
    assert!(json["solver"]["iterations"].is_u64());
}

#[tokio::test]
async fn test_optimize_empty_body_uses_defaults() {
    let (status, json) = post_raw(create_test_app(), "/optimize", "").await;

    assert_eq!(status, StatusCode::OK);
    // Default of ten names, capped by a four-name universe.
    assert_eq!(json["selected_stocks"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_optimize_unsupported_objective() {
    let (status, json) =
        post_json(create_test_app(), "/optimize", json!({"objective": "sortino"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("sortino"));
}

#[tokio::test]
async fn test_optimize_single_stock() {
    let (status, json) = post_json(create_test_app(), "/optimize", json!({"num_stocks": 1})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("ranking"));
}

#[tokio::test]
async fn test_optimize_missing_universe() {
    let app = create_router(create_engine(market(), Arc::new(MissingUniverseSource)));
    let (status, json) = post_json(app, "/optimize", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "no universe configured");
}

#[tokio::test]
async fn test_optimize_without_prices() {
    let app = create_router(create_engine(Arc::new(EmptyPriceSource), universe()));
    let (status, json) = post_json(app, "/optimize", json!({})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("unavailable"));
}

#[tokio::test]
async fn test_optimize_malformed_body() {
    let (status, json) = post_raw(create_test_app(), "/optimize", "{\"num_stocks\": \"many\"").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid optimization request"));
}
