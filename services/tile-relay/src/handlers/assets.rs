//! Static page handlers and the 404 fallback.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Extension, Query},
    http::{header, Method, StatusCode, Uri},
    response::Response,
};
use bytes::Bytes;
use mvt_query::TileQuery;
use tracing::debug;

use crate::assets::{INDEX_HTML, SCRIPT_JS, STYLE_CSS};
use super::tile::tile_handler;
use crate::metrics;
use crate::state::AppState;

pub const NOT_FOUND_BODY: &str = "Page does not exist";

fn asset_response(content_type: &'static str, body: Bytes) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

/// GET / - map page
pub async fn index_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    metrics::record_asset_request(INDEX_HTML);
    asset_response("text/html; charset=utf-8", state.assets.index_html.clone())
}

/// GET /script.js
pub async fn script_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    metrics::record_asset_request(SCRIPT_JS);
    asset_response("text/javascript; charset=utf-8", state.assets.script_js.clone())
}

/// GET /style.css
pub async fn style_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    metrics::record_asset_request(STYLE_CSS);
    asset_response("text/css; charset=utf-8", state.assets.style_css.clone())
}

/// Any unmapped path. GETs whose path starts with `/tile` (`/tiles`,
/// `/tile/6/50/28.pbf`) are still tile requests.
pub async fn fallback_handler(
    state: Extension<Arc<AppState>>,
    method: Method,
    uri: Uri,
    query: Result<Query<TileQuery>, QueryRejection>,
) -> Response {
    if method == Method::GET && uri.path().starts_with("/tile") {
        return tile_handler(state, query).await;
    }
    not_found_handler(uri).await
}

pub async fn not_found_handler(uri: Uri) -> Response {
    debug!(path = %uri.path(), "No route");
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(NOT_FOUND_BODY))
        .unwrap()
}
