//! `/tile` handler: query-string → `_mvt` search → binary tile.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Extension, Query},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use mvt_query::{EngineTile, MvtRequest, QueryError, RenderMode, TileQuery, TileRequestParams};
use tracing::{debug, error, info, warn};

use crate::error::RelayError;
use crate::metrics::{self, Timer};
use crate::state::AppState;

pub const DEFAULT_CONTENT_TYPE: &str = "application/x-protobuf";
pub const CACHE_CONTROL: &str = "public, max-age=0";

/// GET /tile?index=&geometry=&renderMethod=&z=&x=&y=&searchQuery=
pub async fn tile_handler(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<TileQuery>, QueryRejection>,
) -> Response {
    let result = match query {
        Ok(Query(query)) => {
            metrics::record_tile_request(RenderMode::from_param(query.render_method.as_deref()));
            relay_tile(&state, query).await
        }
        // Undecodable query strings (duplicate keys, bad escapes) take the
        // same error path as any other rejected parameter.
        Err(rejection) => {
            metrics::record_tile_request(RenderMode::default());
            Err(RelayError::from(QueryError::InvalidParameter {
                param: "query",
                message: rejection.body_text(),
            }))
        }
    };

    match result {
        Ok(response) => response,
        Err(err) => {
            metrics::record_tile_error(err.kind());
            let status = err.status_code();
            if status.is_server_error() {
                error!(error = %err, kind = err.kind(), status = status.as_u16(), "Tile request failed");
            } else {
                warn!(error = %err, kind = err.kind(), status = status.as_u16(), "Tile request rejected");
            }
            err.into_response()
        }
    }
}

async fn relay_tile(state: &AppState, query: TileQuery) -> Result<Response, RelayError> {
    let params = TileRequestParams::try_from(query)?;
    info!(
        index = %params.index,
        geometry = %params.geometry,
        render_method = %params.render_mode,
        tile = %params.coord,
        "Tile request"
    );

    let request = MvtRequest::from_params(&params)?;
    debug!(body = ?request.body, "Built _mvt body");

    let timer = Timer::start();
    let result = state.search.search_mvt(&request).await;
    metrics::record_engine_duration(&timer);

    let tile = result?;
    debug!(
        status = tile.status,
        bytes = tile.body.len(),
        elapsed_ms = timer.elapsed_ms(),
        "Engine returned tile"
    );
    tile_response(tile)
}

/// Relay an engine tile: status and body untouched, headers normalised.
pub fn tile_response(tile: EngineTile) -> Result<Response, RelayError> {
    let status = StatusCode::from_u16(tile.status)
        .map_err(|e| RelayError::Response(format!("engine status {}: {}", tile.status, e)))?;
    let content_type = header_value(tile.content_type.as_deref(), DEFAULT_CONTENT_TYPE)?;
    let content_length = header_value(tile.content_length.as_deref(), "0")?;

    Response::builder()
        .status(status)
        .header(header::CONTENT_DISPOSITION, "inline")
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, content_length)
        .header(header::CACHE_CONTROL, CACHE_CONTROL)
        .header(header::LAST_MODIFIED, http_date_now())
        .body(Body::from(tile.body))
        .map_err(|e| RelayError::Response(e.to_string()))
}

fn header_value(value: Option<&str>, default: &'static str) -> Result<HeaderValue, RelayError> {
    match value {
        Some(v) => HeaderValue::from_str(v)
            .map_err(|e| RelayError::Response(format!("invalid header value {:?}: {}", v, e))),
        None => Ok(HeaderValue::from_static(default)),
    }
}

/// Current time as an HTTP-date, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn http_date_now() -> String {
    chrono::Utc::now()
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn tile(content_type: Option<&str>, content_length: Option<&str>) -> EngineTile {
        EngineTile {
            status: 200,
            content_type: content_type.map(str::to_string),
            content_length: content_length.map(str::to_string),
            body: Bytes::from_static(&[0x1a, 0x03, 0x0a, 0x01, 0x61]),
        }
    }

    #[test]
    fn test_engine_headers_pass_through() {
        let response = tile_response(tile(Some("application/x-protobuf"), Some("123"))).unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/x-protobuf");
        assert_eq!(headers[header::CONTENT_LENGTH], "123");
        assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=0");
        assert_eq!(headers[header::CONTENT_DISPOSITION], "inline");
    }

    #[test]
    fn test_missing_headers_use_defaults() {
        let response = tile_response(tile(None, None)).unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], DEFAULT_CONTENT_TYPE);
        assert_eq!(headers[header::CONTENT_LENGTH], "0");
    }

    #[test]
    fn test_engine_status_is_copied() {
        let mut t = tile(None, Some("0"));
        t.status = 204;
        t.body = Bytes::new();
        let response = tile_response(t).unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_last_modified_is_http_date() {
        let response = tile_response(tile(None, None)).unwrap();
        let value = response.headers()[header::LAST_MODIFIED].to_str().unwrap().to_string();
        assert!(value.ends_with(" GMT"));
        assert!(chrono::NaiveDateTime::parse_from_str(&value, "%a, %d %b %Y %H:%M:%S GMT").is_ok());
    }

    #[test]
    fn test_invalid_engine_header_is_error() {
        let result = tile_response(tile(Some("bad\nvalue"), None));
        assert!(matches!(result, Err(RelayError::Response(_))));
    }
}
