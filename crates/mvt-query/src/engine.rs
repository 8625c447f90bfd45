//! Contract between the relay and the search engine producing tiles.

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;
use thiserror::Error;

use crate::body::MvtRequest;

/// A tile search backend.
#[async_trait]
pub trait TileSearch: Send + Sync {
    /// Run one `_mvt` search and return the tile exactly as the engine
    /// produced it.
    async fn search_mvt(&self, request: &MvtRequest) -> Result<EngineTile, EngineError>;
}

/// Successful engine response, passed through to the client untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTile {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<String>,
    pub body: Bytes,
}

/// Failure talking to the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine answered with an error status.
    #[error("search engine responded with status {status}")]
    Engine { status: u16, body: Option<Value> },

    /// The engine could not be reached or the response could not be read.
    #[error("search engine transport error: {0}")]
    Transport(String),
}

impl EngineError {
    /// Status code reported by the engine, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            EngineError::Engine { status, .. } => Some(*status),
            EngineError::Transport(_) => None,
        }
    }

    /// Engine error payload serialized to text, or empty.
    pub fn body_text(&self) -> String {
        match self {
            EngineError::Engine {
                body: Some(body), ..
            } => body.to_string(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_engine_error_carries_status_and_body() {
        let err = EngineError::Engine {
            status: 404,
            body: Some(json!({"error": {"type": "index_not_found_exception"}, "status": 404})),
        };
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(
            err.body_text(),
            r#"{"error":{"type":"index_not_found_exception"},"status":404}"#
        );
    }

    #[test]
    fn test_transport_error_has_no_status_or_body() {
        let err = EngineError::Transport("connection refused".to_string());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.body_text(), "");
        assert!(err.to_string().contains("connection refused"));
    }
}
