//! Application state and shared resources.

use std::sync::Arc;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use mvt_query::TileSearch;

use crate::assets::StaticAssets;
use crate::config::RelayConfig;
use crate::es_client::ElasticsearchClient;

/// Shared application state.
pub struct AppState {
    /// Tile search backend, shared by every request.
    pub search: Arc<dyn TileSearch>,
    pub assets: StaticAssets,
    /// Present when a Prometheus recorder has been installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(search: Arc<dyn TileSearch>, assets: StaticAssets) -> Self {
        Self {
            search,
            assets,
            prometheus: None,
        }
    }

    /// Build the production state: an Elasticsearch client for the configured
    /// cluster and the configured assets.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let client = ElasticsearchClient::new(config.es_url.clone())?;
        let assets = StaticAssets::from_config(config.assets_dir.as_deref())?;
        Ok(Self::new(Arc::new(client), assets))
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
