//! Elasticsearch vector tile relay.
//!
//! This module exposes the internal modules for testing purposes.

pub mod assets;
pub mod config;
pub mod error;
pub mod es_client;
pub mod handlers;
pub mod metrics;
pub mod server;
pub mod state;

pub use server::{create_router, run_server};
pub use state::AppState;
