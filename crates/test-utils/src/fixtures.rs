//! Common test fixtures for relay tests.
//!
//! Canned engine payloads and request parameters that represent the usual
//! shapes seen from Elasticsearch `_mvt`.

use bytes::Bytes;
use serde_json::{json, Value};

/// A small but well-formed vector tile: one empty layer named `hits`.
pub const SAMPLE_TILE: &[u8] = &[
    0x1a, 0x0b, 0x0a, 0x04, b'h', b'i', b't', b's', 0x28, 0x80, 0x20, 0x78, 0x02,
];

pub fn sample_tile() -> Bytes {
    Bytes::from_static(SAMPLE_TILE)
}

/// Body Elasticsearch returns for a missing index.
pub fn index_not_found_body(index: &str) -> Value {
    json!({
        "error": {
            "root_cause": [{
                "type": "index_not_found_exception",
                "reason": format!("no such index [{}]", index),
                "index": index
            }],
            "type": "index_not_found_exception",
            "reason": format!("no such index [{}]", index),
            "index": index
        },
        "status": 404
    })
}

/// Body Elasticsearch returns when the geometry field is not geo-typed.
pub fn illegal_field_body(field: &str) -> Value {
    json!({
        "error": {
            "type": "illegal_argument_exception",
            "reason": format!("Field [{}] is not of type [geo_point] or [geo_shape]", field)
        },
        "status": 400
    })
}

/// Query string for a tile request, without `searchQuery`.
pub fn tile_query_string(index: &str, geometry: &str, render_method: &str, z: u32, x: u32, y: u32) -> String {
    format!(
        "index={}&geometry={}&renderMethod={}&z={}&x={}&y={}",
        index, geometry, render_method, z, x, y
    )
}
