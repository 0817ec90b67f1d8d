//! Boundary features of the region hierarchy.

use geo::{BoundingRect, Centroid, MultiPolygon};
use rent_map_region_models::{BoundingBox, HierarchyLevel, LatLng};

/// Name, parent, and polygon geometry of one boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Display name.
    pub name: String,
    /// Name of the enclosing feature one level up, verbatim from the
    /// source data. `None` if it could not be determined.
    pub parent_name: Option<String>,
    /// Polygon rings in `[longitude, latitude]` order.
    pub geometry: MultiPolygon<f64>,
}

/// A boundary tagged with the hierarchy level it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionFeature {
    Region(Boundary),
    District(Boundary),
    Neighborhood(Boundary),
}

impl RegionFeature {
    /// Wraps a boundary in the variant for `level`.
    #[must_use]
    pub fn new(level: HierarchyLevel, boundary: Boundary) -> Self {
        match level {
            HierarchyLevel::Region => Self::Region(boundary),
            HierarchyLevel::District => Self::District(boundary),
            HierarchyLevel::Neighborhood => Self::Neighborhood(boundary),
        }
    }

    #[must_use]
    pub const fn level(&self) -> HierarchyLevel {
        match self {
            Self::Region(_) => HierarchyLevel::Region,
            Self::District(_) => HierarchyLevel::District,
            Self::Neighborhood(_) => HierarchyLevel::Neighborhood,
        }
    }

    #[must_use]
    pub const fn boundary(&self) -> &Boundary {
        match self {
            Self::Region(boundary) | Self::District(boundary) | Self::Neighborhood(boundary) => {
                boundary
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.boundary().name
    }

    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.boundary().parent_name.as_deref()
    }

    #[must_use]
    pub const fn geometry(&self) -> &MultiPolygon<f64> {
        &self.boundary().geometry
    }

    /// Bounding box of all exterior rings. See [`bounding_box`].
    #[must_use]
    pub fn bounds(&self) -> Option<BoundingBox> {
        bounding_box(self.geometry())
    }

    /// Centroid of the geometry, where the feature's label is placed.
    ///
    /// `None` for degenerate geometry.
    #[must_use]
    pub fn label_position(&self) -> Option<LatLng> {
        self.geometry()
            .centroid()
            .filter(|point| point.x().is_finite() && point.y().is_finite())
            .map(|point| LatLng::new(point.y(), point.x()))
    }
}

/// Union of the bounding boxes of every polygon's exterior ring.
///
/// Interior rings (holes) never extend past their exterior ring and are
/// ignored. Returns `None` if no ring has any coordinates.
#[must_use]
pub fn bounding_box(geometry: &MultiPolygon<f64>) -> Option<BoundingBox> {
    geometry
        .iter()
        .filter_map(|polygon| polygon.exterior().bounding_rect())
        .map(|rect| BoundingBox {
            west: rect.min().x,
            south: rect.min().y,
            east: rect.max().x,
            north: rect.max().y,
        })
        .reduce(BoundingBox::union)
}
