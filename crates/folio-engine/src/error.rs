//! Engine error types.

use folio_core::CoreError;
use folio_portfolio::AnalyticsError;
use folio_traits::TraitError;
use thiserror::Error;

/// Result type for engine requests.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Analytics stage failure
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    /// Price, universe or classification source failure
    #[error("data source error: {0}")]
    Source(#[from] TraitError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Anything else
    #[error("internal error: {0}")]
    Unexpected(String),
}

impl From<CoreError> for EngineError {
    fn from(e: CoreError) -> Self {
        EngineError::Analytics(AnalyticsError::Core(e))
    }
}

impl EngineError {
    /// True when the request itself was at fault.
    ///
    /// A missing universe file counts as a client error: the request asked
    /// for an optimization the deployment cannot serve.
    pub fn is_client_error(&self) -> bool {
        match self {
            EngineError::Analytics(e) => matches!(
                e,
                AnalyticsError::EmptyInput { .. }
                    | AnalyticsError::InsufficientData { .. }
                    | AnalyticsError::UnsupportedObjective(_)
            ),
            EngineError::Source(e) => e.is_client_error(),
            EngineError::Config(_) | EngineError::Unexpected(_) => false,
        }
    }

    /// True when the price provider had nothing for the request.
    pub fn is_unavailable_prices(&self) -> bool {
        matches!(
            self,
            EngineError::Analytics(AnalyticsError::UnavailablePriceData { .. })
        )
    }
}
