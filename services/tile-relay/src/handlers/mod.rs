//! HTTP request handlers.
//!
//! - `tile`: the `/tile` relay to Elasticsearch `_mvt`
//! - `assets`: the HTML page, script, stylesheet and the fallback (tile prefix or 404)
//! - `layers`: per-mode layer plans for the map client
//! - `health`: liveness and Prometheus metrics

pub mod assets;
pub mod health;
pub mod layers;
pub mod tile;

pub use assets::{
    fallback_handler, index_handler, not_found_handler, script_handler, style_handler, NOT_FOUND_BODY,
};
pub use health::{health_handler, metrics_handler};
pub use layers::layers_handler;
pub use tile::tile_handler;
