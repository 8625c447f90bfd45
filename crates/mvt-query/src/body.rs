//! The `_mvt` search body and the request handed to the engine.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::QueryResult;
use crate::render::{GridAgg, GridType, RenderMode};
use crate::tile::{TileCoord, TileRequestParams};

/// Tile extent in tile units.
pub const MVT_EXTENT: u32 = 4096;

/// Document fields copied onto each hit feature.
pub const MVT_FIELDS: [&str; 2] = ["name", "fuel"];

/// Body of an Elasticsearch `_mvt` search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MvtQueryBody {
    pub exact_bounds: bool,
    pub extent: u32,
    pub buffer: u32,
    pub fields: Vec<String>,
    pub grid_agg: GridAgg,
    pub grid_precision: u8,
    pub grid_type: GridType,
    pub size: u32,
    pub track_total_hits: bool,
    pub with_labels: bool,
    pub query: Value,
}

impl MvtQueryBody {
    /// Build the body for a render mode and an optional serialized filter.
    ///
    /// A missing filter becomes `match_all`; a filter that is not valid JSON
    /// is an error.
    pub fn new(mode: RenderMode, search_query: Option<&str>) -> QueryResult<Self> {
        let preset = mode.preset();
        let query = match search_query {
            Some(raw) => serde_json::from_str(raw)?,
            None => match_all(),
        };

        Ok(Self {
            exact_bounds: false,
            extent: MVT_EXTENT,
            buffer: preset.buffer,
            fields: MVT_FIELDS.iter().map(|f| f.to_string()).collect(),
            grid_agg: mode.grid_agg(),
            grid_precision: preset.grid_precision,
            grid_type: preset.grid_type,
            size: preset.size,
            track_total_hits: false,
            with_labels: false,
            query,
        })
    }
}

/// The universal "match everything" filter.
pub fn match_all() -> Value {
    json!({ "match_all": {} })
}

/// Everything the engine needs to produce one vector tile.
#[derive(Debug, Clone, PartialEq)]
pub struct MvtRequest {
    pub index: String,
    pub field: String,
    pub coord: TileCoord,
    pub body: MvtQueryBody,
}

impl MvtRequest {
    pub fn from_params(params: &TileRequestParams) -> QueryResult<Self> {
        Ok(Self {
            index: params.index.clone(),
            field: params.geometry.clone(),
            coord: params.coord,
            body: MvtQueryBody::new(params.render_mode, params.search_query.as_deref())?,
        })
    }
}
