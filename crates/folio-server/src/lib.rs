//! # Folio Server
//!
//! HTTP server for the Folio analytics engine.
//!
//! ## Endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | GET | `/health` | Liveness and version |
//! | POST | `/upload` | Holdings CSV (multipart `file`) → performance analytics |
//! | POST | `/reload-mapping` | Re-read the classification map |
//! | GET | `/sectors` | Universe sectors |
//! | GET | `/asset_classes` | Universe asset classes |
//! | GET | `/tickers` | Universe entries |
//! | POST | `/optimize` | Screen, optimize and benchmark a portfolio |
//!
//! Errors are JSON `{"error": "..."}` with status 400 for request faults
//! and 500 otherwise.
//!
//! ## Usage
//!
//! ```ignore
//! use folio_server::Server;
//!
//! let server = Server::new(config, engine);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use folio_engine::AnalyticsEngine;

pub use config::{PriceSourceKind, ServerConfig};

/// The Folio server.
pub struct Server {
    config: ServerConfig,
    engine: Arc<AnalyticsEngine>,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, engine: Arc<AnalyticsEngine>) -> Self {
        Self { config, engine }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.engine.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Folio server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
