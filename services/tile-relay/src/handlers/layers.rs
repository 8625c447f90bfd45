//! Layer plans for the map client.

use axum::{extract::Query, Json};
use mvt_query::{layer_plan, LayerPlan, RenderMode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LayersQuery {
    #[serde(rename = "renderMethod")]
    pub render_method: Option<String>,
}

/// GET /layers?renderMethod= - source and layers to attach for a mode
pub async fn layers_handler(Query(params): Query<LayersQuery>) -> Json<LayerPlan> {
    Json(layer_plan(RenderMode::from_param(
        params.render_method.as_deref(),
    )))
}
