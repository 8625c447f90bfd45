//! MapLibre layer configuration for each render mode.
//!
//! The browser fetches a [`LayerPlan`] from the relay and applies it
//! verbatim: drop every layer in `remove` that is present, drop the source,
//! then add the source and `layers`. Because `remove` always lists every
//! layer id any mode can create, only the new mode's layers survive a
//! mode change.

use serde::Serialize;
use serde_json::{json, Value};

use crate::render::RenderMode;

/// Name of the single vector source registered by the map client.
pub const SOURCE_NAME: &str = "es_mvt";

pub const FILL_LAYER: &str = "layer_fill";
pub const LINE_LAYER: &str = "layer_line";
pub const POINT_LAYER: &str = "layer_point";
pub const HEAT_LAYER: &str = "layer_heat";
pub const CLUSTER_LAYER: &str = "layer_cluster";
pub const CLUSTER_COUNT_LAYER: &str = "cluster-count";
pub const UNCLUSTERED_LAYER: &str = "unclustered-point";

/// Every layer id any render mode may attach.
pub const ALL_LAYER_IDS: [&str; 7] = [
    LINE_LAYER,
    FILL_LAYER,
    POINT_LAYER,
    HEAT_LAYER,
    CLUSTER_LAYER,
    CLUSTER_COUNT_LAYER,
    UNCLUSTERED_LAYER,
];

const FILL_COLOR: &str = "rgb(255,0,0)";
const FILL_OPACITY: f64 = 0.5;
const STROKE_COLOR: &str = "rgb(255,0,0)";
const STROKE_OPACITY: f64 = 1.0;
const STROKE_WIDTH: f64 = 1.0;

/// Instructions for (re)attaching the tile source and its layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerPlan {
    pub render_method: RenderMode,
    pub source: &'static str,
    pub source_layer: &'static str,
    pub remove: Vec<&'static str>,
    pub layers: Vec<Value>,
}

impl LayerPlan {
    /// Ids of the layers this plan attaches, in order.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter_map(|layer| layer.get("id").and_then(Value::as_str))
            .collect()
    }
}

/// Build the layer plan for a render mode.
pub fn layer_plan(mode: RenderMode) -> LayerPlan {
    let source_layer = mode.source_layer();
    let layers = match mode {
        RenderMode::Grid => vec![grid_layer(source_layer)],
        RenderMode::Hex => vec![hex_layer(source_layer)],
        RenderMode::Hits => vec![hits_layer(source_layer)],
        RenderMode::Heat => vec![heat_layer(source_layer)],
        RenderMode::Cluster => cluster_layers(source_layer),
    };

    LayerPlan {
        render_method: mode,
        source: SOURCE_NAME,
        source_layer,
        remove: ALL_LAYER_IDS.to_vec(),
        layers,
    }
}

fn geometry_filter(types: &[&str]) -> Value {
    let mut filter = vec![json!("any")];
    filter.extend(
        types
            .iter()
            .map(|t| json!(["==", ["geometry-type"], t])),
    );
    Value::Array(filter)
}

fn grid_layer(source_layer: &str) -> Value {
    json!({
        "id": LINE_LAYER,
        "type": "line",
        "source": SOURCE_NAME,
        "source-layer": source_layer,
        "paint": {
            "line-opacity": STROKE_OPACITY,
            "line-color": STROKE_COLOR,
            "line-width": STROKE_WIDTH,
        },
        "filter": geometry_filter(&["Polygon", "MultiPolygon", "LineString", "MultiLineString"]),
    })
}

fn hex_layer(source_layer: &str) -> Value {
    json!({
        "id": FILL_LAYER,
        "type": "fill",
        "source": SOURCE_NAME,
        "source-layer": source_layer,
        "paint": {
            "fill-opacity": FILL_OPACITY,
            "fill-color": FILL_COLOR,
        },
        "filter": geometry_filter(&["Polygon", "MultiPolygon"]),
    })
}

fn hits_layer(source_layer: &str) -> Value {
    json!({
        "id": POINT_LAYER,
        "type": "circle",
        "source": SOURCE_NAME,
        "source-layer": source_layer,
        "paint": {
            "circle-radius": 4,
            "circle-color": FILL_COLOR,
            "circle-opacity": FILL_OPACITY,
            "circle-stroke-color": STROKE_COLOR,
            "circle-stroke-opacity": STROKE_OPACITY,
            "circle-stroke-width": STROKE_WIDTH,
        },
        "filter": geometry_filter(&["Point", "MultiPoint"]),
    })
}

fn heat_layer(source_layer: &str) -> Value {
    json!({
        "id": HEAT_LAYER,
        "type": "heatmap",
        "source": SOURCE_NAME,
        "source-layer": source_layer,
        "maxzoom": 21,
        "paint": {
            "heatmap-weight": [
                "interpolate", ["linear"], ["get", "_count"],
                10, 0.05,
                100, 0.1,
                500, 0.2,
                1000, 0.3,
                2500, 0.5,
                4000, 0.8,
                5000, 1
            ],
            "heatmap-intensity": [
                "interpolate", ["linear"], ["zoom"],
                0, 0,
                10, 1.5,
                20, 3,
                30, 4.5
            ],
            "heatmap-color": [
                "interpolate", ["linear"], ["heatmap-density"],
                0, "rgba(0, 0, 255, 0)",
                0.1, "rgb(65, 105, 225)",
                0.28, "rgb(0, 255, 255)",
                0.46, "rgb(0, 255, 0)",
                0.64, "rgb(255, 255, 0)",
                0.82, "rgb(255, 0, 0)"
            ],
            "heatmap-radius": 8,
            "heatmap-opacity": 0.75,
        },
    })
}

fn cluster_layers(source_layer: &str) -> Vec<Value> {
    let clustered = json!({
        "id": CLUSTER_LAYER,
        "type": "circle",
        "source": SOURCE_NAME,
        "source-layer": source_layer,
        "filter": ["has", "_count"],
        "paint": {
            "circle-color": [
                "step", ["get", "_count"],
                "#99ffcc",
                500, "#00ffff",
                1000, "#cc99ff",
                2000, "#ffcc66",
                5000, "#FF99CC"
            ],
            "circle-radius": [
                "step", ["get", "_count"],
                0,
                1, 15,
                100, 20,
                500, 25,
                1000, 30,
                3000, 35,
                5000, 40
            ],
            "circle-stroke-width": 0.5,
            "circle-stroke-color": "#ffffff",
            "circle-opacity": 0.75,
        },
    });

    let count_labels = json!({
        "id": CLUSTER_COUNT_LAYER,
        "type": "symbol",
        "source": SOURCE_NAME,
        "source-layer": source_layer,
        "filter": ["has", "_count"],
        "layout": {
            "text-field": "{_count}",
            "text-font": ["DIN Offc Pro Medium", "Arial Unicode MS Bold"],
            "text-size": 12,
        },
    });

    let unclustered = json!({
        "id": UNCLUSTERED_LAYER,
        "type": "circle",
        "source": SOURCE_NAME,
        "source-layer": source_layer,
        "filter": ["!", ["has", "_count"]],
        "paint": {
            "circle-color": "#11b4da",
            "circle-radius": 4,
            "circle-stroke-width": 1,
            "circle-stroke-color": "#fff",
        },
    });

    vec![clustered, count_labels, unclustered]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_filter_shape() {
        let filter = geometry_filter(&["Point", "MultiPoint"]);
        assert_eq!(
            filter,
            json!(["any", ["==", ["geometry-type"], "Point"], ["==", ["geometry-type"], "MultiPoint"]])
        );
    }

    #[test]
    fn test_heat_layer_has_no_filter() {
        assert!(heat_layer("aggs").get("filter").is_none());
    }
}
