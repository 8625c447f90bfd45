//! Command line and environment configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;

/// Elasticsearch vector tile relay
#[derive(Parser, Debug, Clone)]
#[command(name = "tile-relay")]
#[command(about = "Relays map tile requests to Elasticsearch _mvt searches")]
pub struct Args {
    /// Base URL of the Elasticsearch cluster
    #[arg(long, env = "ES_URL", default_value = "http://localhost:9200/")]
    pub es_url: String,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 80)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "RELAY_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Serve index.html, script.js and style.css from this directory
    /// instead of the built-in copies
    #[arg(long, env = "ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_level: String,

    /// Number of worker threads
    #[arg(long, env = "TOKIO_WORKER_THREADS")]
    pub worker_threads: Option<usize>,
}

/// Validated relay configuration.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub es_url: Url,
    pub listen: SocketAddr,
    pub assets_dir: Option<PathBuf>,
}

impl RelayConfig {
    pub fn from_args(args: &Args) -> Result<Self> {
        let es_url = Url::parse(&args.es_url)
            .with_context(|| format!("Invalid ES_URL: {}", args.es_url))?;
        if es_url.cannot_be_a_base() {
            anyhow::bail!("ES_URL must be a hierarchical http(s) URL: {}", args.es_url);
        }

        Ok(Self {
            es_url,
            listen: SocketAddr::new(args.host, args.port),
            assets_dir: args.assets_dir.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["tile-relay"]).unwrap();
        // env may override these on a developer machine
        if std::env::var("ES_URL").is_err() {
            assert_eq!(args.es_url, "http://localhost:9200/");
        }
        if std::env::var("PORT").is_err() {
            assert_eq!(args.port, 80);
        }
    }

    #[test]
    fn test_flags_override() {
        let args = Args::try_parse_from([
            "tile-relay",
            "--es-url",
            "https://search.internal:9243/",
            "--port",
            "8088",
            "--host",
            "127.0.0.1",
            "--assets-dir",
            "/srv/relay",
        ])
        .unwrap();

        let config = RelayConfig::from_args(&args).unwrap();
        assert_eq!(config.es_url.as_str(), "https://search.internal:9243/");
        assert_eq!(config.listen, "127.0.0.1:8088".parse().unwrap());
        assert_eq!(config.assets_dir, Some(PathBuf::from("/srv/relay")));
    }

    #[test]
    fn test_invalid_es_url() {
        let args = Args::try_parse_from(["tile-relay", "--es-url", "not a url"]).unwrap();
        assert!(RelayConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_non_hierarchical_es_url() {
        let args = Args::try_parse_from(["tile-relay", "--es-url", "mailto:ops@example.com"]).unwrap();
        assert!(RelayConfig::from_args(&args).is_err());
    }

    #[test]
    fn test_invalid_port() {
        assert!(Args::try_parse_from(["tile-relay", "--port", "70000"]).is_err());
    }
}
