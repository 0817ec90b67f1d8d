#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region hierarchy, navigation frame, and boundary dataset definition types.
//!
//! The map drills down through three tiers: a region (a city), its
//! districts (Bezirke), and their neighborhoods (Ortsteile). City
//! definitions are TOML files describing where each tier's boundary data
//! lives and how to read it.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default pattern extracting the parent district from a neighborhood's
/// HTML description table.
pub const DEFAULT_PARENT_PATTERN: &str = r"BEZNAME</td>\s*<td>([^<]+)</td>";

/// Granularity tier of the region hierarchy, coarsest first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HierarchyLevel {
    /// Top-level area, e.g. a city or federal state
    Region,
    /// Borough-level subdivision (Bezirk)
    District,
    /// Named locality within a district (Ortsteil)
    Neighborhood,
}

impl HierarchyLevel {
    /// Returns all levels, coarsest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Region, Self::District, Self::Neighborhood]
    }

    /// The next finer level, if any.
    #[must_use]
    pub const fn finer(self) -> Option<Self> {
        match self {
            Self::Region => Some(Self::District),
            Self::District => Some(Self::Neighborhood),
            Self::Neighborhood => None,
        }
    }

    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Region)
    }
}

/// A prior selection recorded on the navigation history stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationFrame {
    /// Level the selection was made at.
    pub level: HierarchyLevel,
    /// Name of the selected feature.
    pub name: String,
}

impl NavigationFrame {
    #[must_use]
    pub fn new(level: HierarchyLevel, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
        }
    }
}

/// A geographic position.
///
/// Serialized as a `[lat, lon]` pair, the order map libraries expect for
/// centers and marker positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(position: LatLng) -> Self {
        [position.lat, position.lon]
    }
}

/// Axis-aligned bounding box in longitude/latitude degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// The smallest box covering both `self` and `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }

    /// Center of the box.
    #[must_use]
    pub fn center(self) -> LatLng {
        LatLng::new(
            f64::midpoint(self.south, self.north),
            f64::midpoint(self.west, self.east),
        )
    }
}

/// A supported city, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDefinition {
    /// Unique identifier (e.g. `"berlin"`).
    pub id: String,
    /// Display name, also the region name used for navigation.
    pub name: String,
    /// Pinned camera center for the city's district view.
    pub center: LatLng,
    /// Pinned zoom for the city's district view.
    pub zoom: u8,
    /// Inhabitants, used to size the city marker.
    pub population: u64,
    /// Whether the city is its own federal state (Berlin, Hamburg, Bremen).
    #[serde(default)]
    pub city_state: bool,
    /// District boundaries, if the city is modeled below the region level.
    pub districts: Option<BoundarySource>,
    /// Neighborhood boundaries, attributed to districts via their description.
    pub neighborhoods: Option<NeighborhoodSource>,
}

/// Where to read a boundary collection and which property holds the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundarySource {
    /// `GeoJSON` `FeatureCollection` path, relative to the data directory.
    pub path: String,
    /// Property field containing the display name.
    pub name_field: String,
}

/// Where to read neighborhood boundaries and how to find their parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodSource {
    /// `GeoJSON` `FeatureCollection` path, relative to the data directory.
    pub path: String,
    /// Property field containing the display name.
    pub name_field: String,
    /// Property field containing the free-text (HTML) description.
    pub description_field: String,
    /// Regex whose first capture group is the parent district's name.
    #[serde(default = "default_parent_pattern")]
    pub parent_pattern: String,
}

fn default_parent_pattern() -> String {
    DEFAULT_PARENT_PATTERN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_coarsest_first() {
        assert!(HierarchyLevel::Region < HierarchyLevel::District);
        assert!(HierarchyLevel::District < HierarchyLevel::Neighborhood);
    }

    #[test]
    fn finer_walks_down_to_neighborhoods() {
        assert_eq!(HierarchyLevel::Region.finer(), Some(HierarchyLevel::District));
        assert_eq!(HierarchyLevel::District.finer(), Some(HierarchyLevel::Neighborhood));
        assert_eq!(HierarchyLevel::Neighborhood.finer(), None);
        assert!(HierarchyLevel::Region.is_root());
        assert!(!HierarchyLevel::District.is_root());
    }

    #[test]
    fn level_names() {
        assert_eq!(HierarchyLevel::District.to_string(), "district");
        assert_eq!(
            "neighborhood".parse::<HierarchyLevel>().ok(),
            Some(HierarchyLevel::Neighborhood)
        );
    }

    #[test]
    fn bounding_box_union_and_center() {
        let a = BoundingBox {
            west: 13.0,
            south: 52.0,
            east: 13.25,
            north: 52.25,
        };
        let b = BoundingBox {
            west: 13.75,
            south: 52.75,
            east: 14.0,
            north: 53.0,
        };
        let both = a.union(b);
        assert_eq!(
            both,
            BoundingBox {
                west: 13.0,
                south: 52.0,
                east: 14.0,
                north: 53.0,
            }
        );
        assert_eq!(both.center(), LatLng::new(52.5, 13.5));
    }
}
