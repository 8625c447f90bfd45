//! Errors raised while turning a tile request into an engine query.

use thiserror::Error;

/// Result type alias using QueryError.
pub type QueryResult<T> = Result<T, QueryError>;

/// Request-scoped failures detected before the engine is called.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter {
        param: &'static str,
        message: String,
    },

    #[error("Malformed searchQuery: {0}")]
    InvalidSearchQuery(#[from] serde_json::Error),
}

impl QueryError {
    /// Get the HTTP status code for this error.
    ///
    /// A filter that fails to parse carries no status of its own, so it falls
    /// into the generic 500 bucket like any other unreported failure.
    pub fn http_status_code(&self) -> u16 {
        match self {
            QueryError::MissingParameter(_) | QueryError::InvalidParameter { .. } => 400,
            QueryError::InvalidSearchQuery(_) => 500,
        }
    }
}
