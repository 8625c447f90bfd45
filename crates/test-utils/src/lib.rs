//! Shared test utilities for the tile relay workspace.
//!
//! This crate provides common testing infrastructure including:
//! - A scriptable in-memory tile search engine
//! - Canned Elasticsearch payloads
//! - Temporary static asset directories
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../../crates/test-utils" }
//! ```

pub mod assets;
pub mod fixtures;

pub use assets::*;
pub use fixtures::*;

use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use mvt_query::{EngineError, EngineTile, MvtRequest, TileSearch};
use serde_json::Value;

/// What a [`MockEngine`] answers with.
#[derive(Debug, Clone)]
pub enum MockReply {
    Tile(EngineTile),
    Error { status: u16, body: Option<Value> },
    Transport(String),
}

/// In-memory [`TileSearch`] that records every request it receives.
pub struct MockEngine {
    reply: MockReply,
    requests: Mutex<Vec<MvtRequest>>,
}

impl MockEngine {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Engine answering 200 with the given headers and body.
    pub fn with_tile(content_type: Option<&str>, content_length: Option<&str>, body: Bytes) -> Self {
        Self::new(MockReply::Tile(EngineTile {
            status: 200,
            content_type: content_type.map(str::to_string),
            content_length: content_length.map(str::to_string),
            body,
        }))
    }

    /// Engine answering 200 with [`fixtures::SAMPLE_TILE`] and matching headers.
    pub fn ok() -> Self {
        let body = fixtures::sample_tile();
        let length = body.len().to_string();
        Self::with_tile(Some("application/vnd.mapbox-vector-tile"), Some(&length), body)
    }

    pub fn failing(status: u16, body: Option<Value>) -> Self {
        Self::new(MockReply::Error { status, body })
    }

    pub fn unreachable() -> Self {
        Self::new(MockReply::Transport("connection refused".to_string()))
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<MvtRequest> {
        self.requests.lock().expect("mock engine lock").clone()
    }

    pub fn last_request(&self) -> Option<MvtRequest> {
        self.requests().pop()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("mock engine lock").len()
    }
}

#[async_trait]
impl TileSearch for MockEngine {
    async fn search_mvt(&self, request: &MvtRequest) -> Result<EngineTile, EngineError> {
        self.requests
            .lock()
            .expect("mock engine lock")
            .push(request.clone());

        match &self.reply {
            MockReply::Tile(tile) => Ok(tile.clone()),
            MockReply::Error { status, body } => Err(EngineError::Engine {
                status: *status,
                body: body.clone(),
            }),
            MockReply::Transport(msg) => Err(EngineError::Transport(msg.clone())),
        }
    }
}
