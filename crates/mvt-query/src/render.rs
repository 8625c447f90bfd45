//! Render modes and the aggregation presets they select.

use serde::{Deserialize, Serialize};

/// How the map client wants a tile visualised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Grid,
    Heat,
    Hex,
    Cluster,
    #[default]
    Hits,
}

impl RenderMode {
    pub const ALL: [RenderMode; 5] = [
        RenderMode::Grid,
        RenderMode::Heat,
        RenderMode::Hex,
        RenderMode::Cluster,
        RenderMode::Hits,
    ];

    /// Strict, case-sensitive parse of a `renderMethod` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" => Some(RenderMode::Grid),
            "heat" => Some(RenderMode::Heat),
            "hex" => Some(RenderMode::Hex),
            "cluster" => Some(RenderMode::Cluster),
            "hits" => Some(RenderMode::Hits),
            _ => None,
        }
    }

    /// Resolve the `renderMethod` query parameter. Absent or unknown values
    /// resolve to [`RenderMode::Hits`].
    pub fn from_param(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Grid => "grid",
            RenderMode::Heat => "heat",
            RenderMode::Hex => "hex",
            RenderMode::Cluster => "cluster",
            RenderMode::Hits => "hits",
        }
    }

    /// Aggregation preset for this mode.
    pub fn preset(&self) -> RenderPreset {
        match self {
            RenderMode::Grid => RenderPreset::GRID,
            RenderMode::Heat => RenderPreset::HEAT,
            RenderMode::Hex => RenderPreset::HEX,
            RenderMode::Cluster => RenderPreset::CLUSTER,
            RenderMode::Hits => RenderPreset::HITS,
        }
    }

    /// Cell shape used by the engine's grid aggregation.
    ///
    /// Independent of [`RenderMode::preset`]: hex mode keeps `grid_type`
    /// at `grid` and only switches the aggregation to hexagonal cells.
    pub fn grid_agg(&self) -> GridAgg {
        match self {
            RenderMode::Hex => GridAgg::Geohex,
            _ => GridAgg::Geotile,
        }
    }

    /// Layer in the returned tile that holds the features to draw.
    pub fn source_layer(&self) -> &'static str {
        match self {
            RenderMode::Hits => "hits",
            _ => "aggs",
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation cell shape (`grid_agg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridAgg {
    Geotile,
    Geohex,
}

/// Geometry emitted for each aggregation bucket (`grid_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridType {
    Grid,
    Point,
    Centroid,
}

/// Fixed aggregation parameters for one render mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderPreset {
    /// 0-8; 0 drops the `aggs` layer from the tile entirely.
    pub grid_precision: u8,
    pub buffer: u32,
    /// Maximum number of hit features; 0 drops the `hits` layer.
    pub size: u32,
    pub grid_type: GridType,
}

impl RenderPreset {
    pub const GRID: RenderPreset = RenderPreset {
        grid_precision: 8,
        buffer: 5,
        size: 0,
        grid_type: GridType::Grid,
    };

    pub const HEAT: RenderPreset = RenderPreset {
        grid_precision: 8,
        buffer: 10,
        size: 0,
        grid_type: GridType::Grid,
    };

    pub const HEX: RenderPreset = RenderPreset {
        grid_precision: 5,
        buffer: 5,
        size: 0,
        grid_type: GridType::Grid,
    };

    pub const CLUSTER: RenderPreset = RenderPreset {
        grid_precision: 1,
        buffer: 0,
        size: 0,
        grid_type: GridType::Centroid,
    };

    pub const HITS: RenderPreset = RenderPreset {
        grid_precision: 0,
        buffer: 0,
        size: 10_000,
        grid_type: GridType::Grid,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(RenderMode::parse("hex"), Some(RenderMode::Hex));
        assert_eq!(RenderMode::parse("HEX"), None);
        assert_eq!(RenderMode::parse(""), None);
    }

    #[test]
    fn test_from_param_defaults_to_hits() {
        assert_eq!(RenderMode::from_param(None), RenderMode::Hits);
        assert_eq!(RenderMode::from_param(Some("voronoi")), RenderMode::Hits);
        assert_eq!(RenderMode::from_param(Some("cluster")), RenderMode::Cluster);
    }

    #[test]
    fn test_as_str_round_trips_through_parse() {
        for mode in RenderMode::ALL {
            assert_eq!(RenderMode::parse(mode.as_str()), Some(mode));
        }
    }

    #[test]
    fn test_grid_agg_only_hex_is_geohex() {
        for mode in RenderMode::ALL {
            let expected = if mode == RenderMode::Hex {
                GridAgg::Geohex
            } else {
                GridAgg::Geotile
            };
            assert_eq!(mode.grid_agg(), expected, "mode {}", mode);
        }
    }

    #[test]
    fn test_grid_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(GridType::Centroid).unwrap(), "centroid");
        assert_eq!(serde_json::to_value(GridAgg::Geohex).unwrap(), "geohex");
    }
}
