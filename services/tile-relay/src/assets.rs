//! Static front-end files served next to the tile endpoint.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use tracing::info;

pub const INDEX_HTML: &str = "index.html";
pub const SCRIPT_JS: &str = "script.js";
pub const STYLE_CSS: &str = "style.css";

/// The three browser assets, held in memory for the life of the process.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    pub index_html: Bytes,
    pub script_js: Bytes,
    pub style_css: Bytes,
}

impl StaticAssets {
    /// Copies compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            index_html: Bytes::from_static(include_bytes!("../assets/index.html")),
            script_js: Bytes::from_static(include_bytes!("../assets/script.js")),
            style_css: Bytes::from_static(include_bytes!("../assets/style.css")),
        }
    }

    /// Load all three files from `dir`. Any missing file is an error.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str| -> Result<Bytes> {
            let path = dir.join(name);
            let data = std::fs::read(&path)
                .with_context(|| format!("Failed to read asset {:?}", path))?;
            Ok(Bytes::from(data))
        };

        let assets = Self {
            index_html: read(INDEX_HTML)?,
            script_js: read(SCRIPT_JS)?,
            style_css: read(STYLE_CSS)?,
        };
        info!(dir = %dir.display(), "Loaded static assets from disk");
        Ok(assets)
    }

    /// Embedded assets unless a directory override is configured.
    pub fn from_config(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load_dir(dir),
            None => Ok(Self::embedded()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets_present() {
        let assets = StaticAssets::embedded();
        assert!(std::str::from_utf8(&assets.index_html)
            .unwrap()
            .contains("<div id=\"map\">"));
        assert!(std::str::from_utf8(&assets.script_js)
            .unwrap()
            .contains("function showLayer"));
        assert!(!assets.style_css.is_empty());
    }

    #[test]
    fn test_load_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(INDEX_HTML), "<html></html>").unwrap();
        let err = StaticAssets::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("script.js"));
    }

    #[test]
    fn test_from_config_without_dir_is_embedded() {
        let assets = StaticAssets::from_config(None).unwrap();
        assert_eq!(assets.index_html, StaticAssets::embedded().index_html);
    }
}
