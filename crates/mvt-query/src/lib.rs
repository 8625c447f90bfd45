//! Query-side types shared by the tile relay.
//!
//! Everything needed to turn a map client's tile request into an
//! Elasticsearch `_mvt` search lives here, independent of the HTTP server:
//! render-mode presets, request parameters, the query body, the engine
//! contract and the layer configuration served to the browser.

pub mod body;
pub mod engine;
pub mod error;
pub mod layers;
pub mod render;
pub mod tile;

pub use body::{MvtQueryBody, MvtRequest, MVT_EXTENT, MVT_FIELDS};
pub use engine::{EngineError, EngineTile, TileSearch};
pub use error::{QueryError, QueryResult};
pub use layers::{layer_plan, LayerPlan, ALL_LAYER_IDS, SOURCE_NAME};
pub use render::{GridAgg, GridType, RenderMode, RenderPreset};
pub use tile::{TileCoord, TileQuery, TileRequestParams};
