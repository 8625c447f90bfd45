//! Request-scoped relay errors and their HTTP rendering.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use mvt_query::{EngineError, QueryError};
use thiserror::Error;

/// Anything that ends a single tile request early.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to build tile response: {0}")]
    Response(String),
}

impl RelayError {
    /// Status reported by the failure, or 500.
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            RelayError::Query(e) => Some(e.http_status_code()),
            RelayError::Engine(e) => e.status_code(),
            RelayError::Response(_) => None,
        };
        code.and_then(|c| StatusCode::from_u16(c).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Engine error payload as text, empty for every other failure.
    pub fn body(&self) -> String {
        match self {
            RelayError::Engine(e) => e.body_text(),
            _ => String::new(),
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Query(QueryError::InvalidSearchQuery(_)) => "invalid_search_query",
            RelayError::Query(_) => "invalid_parameter",
            RelayError::Engine(EngineError::Engine { .. }) => "engine",
            RelayError::Engine(EngineError::Transport(_)) => "transport",
            RelayError::Response(_) => "response",
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = self.body();
        let mut response = (self.status_code(), body.clone()).into_response();
        if !body.is_empty() {
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/json"),
            );
        } else {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
        response
    }
}
