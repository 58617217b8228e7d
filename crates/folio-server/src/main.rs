//! Folio server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_engine::AnalyticsEngineBuilder;
use folio_ext_file::{create_file_reference_data, CsvPriceSource};
use folio_ext_yahoo::YahooPriceSource;
use folio_server::{PriceSourceKind, Server, ServerConfig};
use folio_traits::market_data::PriceSource;

fn create_price_source(config: &ServerConfig) -> Result<Arc<dyn PriceSource>> {
    match config.price_source {
        PriceSourceKind::Yahoo => Ok(Arc::new(YahooPriceSource::new()?)),
        PriceSourceKind::Csv => {
            let path = config
                .prices_csv
                .as_deref()
                .context("price_source = \"csv\" requires prices_csv")?;
            let source = CsvPriceSource::new(path)
                .with_context(|| format!("failed to load prices from {path}"))?;
            Ok(Arc::new(source))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,folio=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Folio Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/folio.toml".to_string());

    let server_config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    }
    .with_env_overrides();

    // Data sources
    let prices = create_price_source(&server_config)?;
    let (classifications, universe) = create_file_reference_data(
        &server_config.mapping_csv,
        &server_config.universe_csv,
        &server_config.engine.ticker_suffix,
    );

    // Build engine
    let engine = AnalyticsEngineBuilder::new()
        .with_config(server_config.engine.clone())
        .with_prices(prices)
        .with_universe(universe)
        .with_classifications(classifications)
        .build()?;

    match engine.reload_classifications().await {
        Ok(snapshot) => info!(loaded = snapshot.len(), "classification map ready"),
        Err(e) => warn!(error = %e, "classification map not loaded, all tickers map to 'Other'"),
    }

    // Start server
    let server = Server::new(server_config, Arc::new(engine));
    server.start().await?;

    Ok(())
}
