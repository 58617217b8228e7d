//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use folio_engine::AnalyticsEngine;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `engine` - The analytics engine
pub fn create_router(engine: Arc<AnalyticsEngine>) -> Router {
    let state = Arc::new(AppState { engine });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Holdings analytics
        .route("/upload", post(handlers::upload))
        .route("/reload-mapping", post(handlers::reload_mapping))
        // Universe metadata
        .route("/sectors", get(handlers::list_sectors))
        .route("/asset_classes", get(handlers::list_asset_classes))
        .route("/tickers", get(handlers::list_tickers))
        // Optimization
        .route("/optimize", post(handlers::optimize))
        // State
        .with_state(state)
}
