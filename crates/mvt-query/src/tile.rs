//! Tile coordinates and the parameters of a `/tile` request.

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::render::RenderMode;

/// A tile coordinate (z/x/y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Raw query string of a tile request, as sent by the map client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TileQuery {
    pub index: Option<String>,
    pub geometry: Option<String>,
    #[serde(rename = "renderMethod")]
    pub render_method: Option<String>,
    pub z: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    #[serde(rename = "searchQuery")]
    pub search_query: Option<String>,
}

/// Validated tile request.
#[derive(Debug, Clone, PartialEq)]
pub struct TileRequestParams {
    pub index: String,
    pub geometry: String,
    pub render_mode: RenderMode,
    pub coord: TileCoord,
    /// Serialized query DSL; `None` when absent or empty.
    pub search_query: Option<String>,
}

impl TryFrom<TileQuery> for TileRequestParams {
    type Error = QueryError;

    fn try_from(query: TileQuery) -> QueryResult<Self> {
        let index = required(query.index, "index")?;
        let geometry = required(query.geometry, "geometry")?;
        let coord = TileCoord::new(
            coordinate(query.z.as_deref(), "z")?,
            coordinate(query.x.as_deref(), "x")?,
            coordinate(query.y.as_deref(), "y")?,
        );

        Ok(Self {
            index,
            geometry,
            render_mode: RenderMode::from_param(query.render_method.as_deref()),
            coord,
            search_query: query.search_query.filter(|q| !q.trim().is_empty()),
        })
    }
}

fn required(value: Option<String>, param: &'static str) -> QueryResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(QueryError::MissingParameter(param)),
    }
}

fn coordinate(value: Option<&str>, param: &'static str) -> QueryResult<u32> {
    let raw = value
        .filter(|v| !v.is_empty())
        .ok_or(QueryError::MissingParameter(param))?;
    raw.trim()
        .parse::<u32>()
        .map_err(|e| QueryError::InvalidParameter {
            param,
            message: format!("'{}' is not a tile coordinate: {}", raw, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> TileQuery {
        TileQuery {
            index: Some("stations".to_string()),
            geometry: Some("location".to_string()),
            render_method: Some("grid".to_string()),
            z: Some("5".to_string()),
            x: Some("25".to_string()),
            y: Some("14".to_string()),
            search_query: None,
        }
    }

    #[test]
    fn test_valid_query() {
        let params = TileRequestParams::try_from(query()).unwrap();
        assert_eq!(params.index, "stations");
        assert_eq!(params.geometry, "location");
        assert_eq!(params.render_mode, RenderMode::Grid);
        assert_eq!(params.coord, TileCoord::new(5, 25, 14));
        assert_eq!(params.coord.to_string(), "5/25/14");
        assert!(params.search_query.is_none());
    }

    #[test]
    fn test_missing_index() {
        let mut q = query();
        q.index = None;
        assert!(matches!(
            TileRequestParams::try_from(q),
            Err(QueryError::MissingParameter("index"))
        ));
    }

    #[test]
    fn test_empty_geometry_is_missing() {
        let mut q = query();
        q.geometry = Some(String::new());
        assert!(matches!(
            TileRequestParams::try_from(q),
            Err(QueryError::MissingParameter("geometry"))
        ));
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let mut q = query();
        q.x = Some("abc".to_string());
        assert!(matches!(
            TileRequestParams::try_from(q),
            Err(QueryError::InvalidParameter { param: "x", .. })
        ));
    }

    #[test]
    fn test_negative_coordinate_rejected() {
        let mut q = query();
        q.y = Some("-1".to_string());
        assert!(TileRequestParams::try_from(q).is_err());
    }

    #[test]
    fn test_blank_search_query_dropped() {
        let mut q = query();
        q.search_query = Some("  ".to_string());
        let params = TileRequestParams::try_from(q).unwrap();
        assert!(params.search_query.is_none());
    }

    #[test]
    fn test_missing_render_method_is_hits() {
        let mut q = query();
        q.render_method = None;
        let params = TileRequestParams::try_from(q).unwrap();
        assert_eq!(params.render_mode, RenderMode::Hits);
    }
}
