//! Error types for trait operations.

use thiserror::Error;

/// Result type for source operations.
pub type TraitResult<T> = Result<T, TraitError>;

/// Common error type for trait operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Rate limited
    #[error("rate limited")]
    RateLimited,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl TraitError {
    /// True when the failure is in the caller's request, not the source.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, TraitError::NotFound(_) | TraitError::InvalidInput(_))
    }
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            TraitError::NotFound(e.to_string())
        } else {
            TraitError::IoError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let err: TraitError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv").into();
        assert!(matches!(err, TraitError::NotFound(_)));
        assert!(err.is_client_error());

        let err: TraitError = std::io::Error::other("disk").into();
        assert!(matches!(err, TraitError::IoError(_)));
        assert!(!err.is_client_error());
    }
}
