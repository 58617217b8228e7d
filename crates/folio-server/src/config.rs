//! Server configuration.

use serde::{Deserialize, Serialize};

use folio_engine::EngineConfig;

/// Environment variable that overrides `mapping_csv`.
pub const MAPPING_CSV_ENV: &str = "MAPPING_CSV";

/// Where historical prices come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSourceKind {
    /// Yahoo Finance chart API.
    #[default]
    Yahoo,
    /// Wide CSV file at `prices_csv`.
    Csv,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Ticker classification file
    #[serde(default = "default_mapping_csv")]
    pub mapping_csv: String,

    /// Optimizer universe file
    #[serde(default = "default_universe_csv")]
    pub universe_csv: String,

    /// Price source
    #[serde(default)]
    pub price_source: PriceSourceKind,

    /// Price file for the csv source
    pub prices_csv: Option<String>,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_mapping_csv() -> String {
    "mapping.csv".to_string()
}

fn default_universe_csv() -> String {
    "nifty_100_full.csv".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mapping_csv: default_mapping_csv(),
            universe_csv: default_universe_csv(),
            price_source: PriceSourceKind::default(),
            prices_csv: None,
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, std::io::Error> {
        toml::from_str(content).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_mapping_override(std::env::var(MAPPING_CSV_ENV).ok())
    }

    /// Replace `mapping_csv` when an override is given.
    pub fn with_mapping_override(mut self, mapping_csv: Option<String>) -> Self {
        if let Some(path) = mapping_csv.filter(|p| !p.trim().is_empty()) {
            self.mapping_csv = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_engine::SolverBackend;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.mapping_csv, "mapping.csv");
        assert_eq!(config.price_source, PriceSourceKind::Yahoo);
    }

    #[test]
    fn test_from_toml() {
        let config = ServerConfig::from_toml(
            r#"
            port = 8080
            price_source = "csv"
            prices_csv = "data/prices.csv"

            [engine]
            risk_free_rate = 0.065
            benchmark_ticker = "^BSESN"

            [engine.solver]
            backend = "nelder_mead"
            "#,
        )
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.price_source, PriceSourceKind::Csv);
        assert_eq!(config.prices_csv.as_deref(), Some("data/prices.csv"));
        assert_eq!(config.engine.benchmark_ticker, "^BSESN");
        assert_eq!(config.engine.ranking_lookback_months, 6);
        assert_eq!(config.engine.solver.backend, SolverBackend::NelderMead);
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        let config = ServerConfig::from_toml(include_str!("../../../config/folio.toml")).unwrap();
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.universe_csv, "nifty_100_full.csv");
    }

    #[test]
    fn test_bad_toml() {
        let err = ServerConfig::from_toml("port = \"eighty\"").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_mapping_override() {
        let config = ServerConfig::default().with_mapping_override(Some("/srv/map.csv".into()));
        assert_eq!(config.mapping_csv, "/srv/map.csv");

        let config = ServerConfig::default().with_mapping_override(Some("  ".into()));
        assert_eq!(config.mapping_csv, "mapping.csv");
    }
}
