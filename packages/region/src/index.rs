//! R-tree hit testing over the currently shown features.
//!
//! Resolves a pointer position to the feature under it so that clicks
//! carrying only coordinates can drive navigation.

use geo::Contains;
use rstar::{AABB, RTree, RTreeObject};

use crate::RegionFeature;

/// A feature's position in the indexed slice plus its envelope.
struct IndexEntry {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Spatial index over a borrowed set of features.
pub struct FeatureIndex<'a> {
    features: Vec<&'a RegionFeature>,
    tree: RTree<IndexEntry>,
}

impl<'a> FeatureIndex<'a> {
    /// Builds the index. Features without bounds are left out.
    #[must_use]
    pub fn new(features: Vec<&'a RegionFeature>) -> Self {
        let entries = features
            .iter()
            .enumerate()
            .filter_map(|(position, feature)| {
                let Some(bounds) = feature.bounds() else {
                    log::debug!("Not indexing {:?}: no bounds", feature.name());
                    return None;
                };
                Some(IndexEntry {
                    position,
                    envelope: AABB::from_corners(
                        [bounds.west, bounds.south],
                        [bounds.east, bounds.north],
                    ),
                })
            })
            .collect();

        Self {
            features,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed features.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// The feature containing the point.
    ///
    /// Boundaries of one level tile without overlap, so the first match
    /// wins.
    #[must_use]
    pub fn feature_at(&self, lon: f64, lat: f64) -> Option<&'a RegionFeature> {
        let point = geo::Point::new(lon, lat);
        let query_env = AABB::from_point([lon, lat]);

        self.tree
            .locate_in_envelope_intersecting(&query_env)
            .map(|entry| self.features[entry.position])
            .find(|feature| feature.geometry().contains(&point))
    }
}
