//! Elasticsearch `_mvt` client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use mvt_query::{EngineError, EngineTile, MvtRequest, TileSearch};
use reqwest::{header, Client, Url};
use serde_json::Value;
use tracing::{debug, instrument};

/// Long-lived connection pool to one Elasticsearch cluster.
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    client: Client,
    base_url: Url,
}

impl ElasticsearchClient {
    pub fn new(base_url: Url) -> Result<Self> {
        // No request timeout: a slow search only holds up its own tile.
        let client = Client::builder()
            .pool_max_idle_per_host(32)
            .tcp_nodelay(true)
            .build()
            .context("Failed to create Elasticsearch HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{index}/_mvt/{field}/{z}/{x}/{y}`, each segment percent-encoded.
    pub fn mvt_url(&self, request: &MvtRequest) -> Result<Url, EngineError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                EngineError::Transport(format!("{} cannot be used as a base URL", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .push(&request.index)
                .push("_mvt")
                .push(&request.field)
                .push(&request.coord.z.to_string())
                .push(&request.coord.x.to_string())
                .push(&request.coord.y.to_string());
        }
        Ok(url)
    }
}

#[async_trait]
impl TileSearch for ElasticsearchClient {
    #[instrument(skip(self, request), fields(index = %request.index, tile = %request.coord))]
    async fn search_mvt(&self, request: &MvtRequest) -> Result<EngineTile, EngineError> {
        let url = self.mvt_url(request)?;
        debug!(url = %url, "Sending _mvt search");

        let response = self
            .client
            .post(url)
            .json(&request.body)
            .send()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        let status = response.status();
        let content_type = header_string(response.headers(), header::CONTENT_TYPE);
        let content_length = header_string(response.headers(), header::CONTENT_LENGTH);
        let body = response
            .bytes()
            .await
            .map_err(|e| EngineError::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(EngineTile {
                status: status.as_u16(),
                content_type,
                content_length,
                body,
            })
        } else {
            Err(EngineError::Engine {
                status: status.as_u16(),
                body: error_body(&body),
            })
        }
    }
}

fn header_string(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Engine error payloads are JSON; anything else is kept as a JSON string.
fn error_body(body: &Bytes) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    Some(
        serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvt_query::{MvtQueryBody, RenderMode, TileCoord};

    fn request(index: &str, field: &str) -> MvtRequest {
        MvtRequest {
            index: index.to_string(),
            field: field.to_string(),
            coord: TileCoord::new(3, 6, 2),
            body: MvtQueryBody::new(RenderMode::Grid, None).unwrap(),
        }
    }

    #[test]
    fn test_mvt_url_from_root() {
        let client = ElasticsearchClient::new(Url::parse("http://localhost:9200/").unwrap()).unwrap();
        let url = client.mvt_url(&request("stations", "location")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:9200/stations/_mvt/location/3/6/2");
    }

    #[test]
    fn test_mvt_url_keeps_base_path() {
        let client =
            ElasticsearchClient::new(Url::parse("https://proxy.example.com/es/").unwrap()).unwrap();
        let url = client.mvt_url(&request("stations", "location")).unwrap();
        assert_eq!(url.path(), "/es/stations/_mvt/location/3/6/2");
    }

    #[test]
    fn test_mvt_url_encodes_segments() {
        let client = ElasticsearchClient::new(Url::parse("http://localhost:9200").unwrap()).unwrap();
        let url = client.mvt_url(&request("logs/2024", "geo point")).unwrap();
        assert_eq!(url.path(), "/logs%2F2024/_mvt/geo%20point/3/6/2");
    }

    #[test]
    fn test_error_body_json_and_text() {
        assert_eq!(error_body(&Bytes::new()), None);
        assert_eq!(
            error_body(&Bytes::from_static(br#"{"status":404}"#)),
            Some(serde_json::json!({"status": 404}))
        );
        assert_eq!(
            error_body(&Bytes::from_static(b"Bad Gateway")),
            Some(Value::String("Bad Gateway".to_string()))
        );
    }
}
