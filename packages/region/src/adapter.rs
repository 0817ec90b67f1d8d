//! Adapts raw `GeoJSON` features into [`RegionFeature`] values.
//!
//! Each boundary file names its properties differently (`name`, `Name`,
//! ...). The adapters read the configured fields once at load time so the
//! rest of the map never probes properties at runtime.
//!
//! Neighborhood files carry their parent district only inside an HTML
//! description table. Extraction depends on that upstream formatting: a
//! neighborhood whose description does not match is kept but left
//! unattributed, and never shows up under any district.

use geo::MultiPolygon;
use geojson::{Feature, GeoJson};
use regex::Regex;
use rent_map_region_models::{HierarchyLevel, NeighborhoodSource};

use crate::{Boundary, RegionError, RegionFeature};

/// Parses a `GeoJSON` document that must be a `FeatureCollection`.
///
/// # Errors
///
/// Returns [`RegionError::GeoJson`] if the document is not valid `GeoJSON`,
/// or [`RegionError::Conversion`] if it is not a `FeatureCollection`.
pub fn parse_collection(geojson_str: &str) -> Result<Vec<Feature>, RegionError> {
    match geojson_str.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(_) => Err(RegionError::Conversion {
            message: "Expected a FeatureCollection, found a single Feature".to_string(),
        }),
        GeoJson::Geometry(_) => Err(RegionError::Conversion {
            message: "Expected a FeatureCollection, found a bare Geometry".to_string(),
        }),
    }
}

/// Extracts a feature's parent name from its free-text description.
#[derive(Debug, Clone)]
pub struct ParentExtractor {
    pattern: Regex,
}

impl ParentExtractor {
    /// Compiles `pattern`. Its first capture group is the parent name.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Pattern`] if the pattern is not a valid regex,
    /// or [`RegionError::Conversion`] if it has no capture group.
    pub fn new(pattern: &str) -> Result<Self, RegionError> {
        let pattern = Regex::new(pattern)?;
        if pattern.captures_len() < 2 {
            return Err(RegionError::Conversion {
                message: format!("Parent pattern {pattern} has no capture group"),
            });
        }
        Ok(Self { pattern })
    }

    /// Returns the trimmed first capture, or `None` if the description
    /// does not match or the capture is blank.
    #[must_use]
    pub fn extract(&self, description: &str) -> Option<String> {
        self.pattern
            .captures(description)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    }
}

/// Adapts features whose parent is implied by where they are loaded from
/// (regions, or districts of a known city).
///
/// Skips features with a missing name or unusable geometry.
#[must_use]
pub fn adapt_boundaries(
    features: Vec<Feature>,
    level: HierarchyLevel,
    name_field: &str,
    parent_name: Option<&str>,
) -> Vec<RegionFeature> {
    features
        .into_iter()
        .filter_map(|feature| {
            let name = feature_name(&feature, name_field)?;
            let geometry = feature_geometry(feature, &name)?;
            Some(RegionFeature::new(
                level,
                Boundary {
                    name,
                    parent_name: parent_name.map(ToString::to_string),
                    geometry,
                },
            ))
        })
        .collect()
}

/// Adapts neighborhood features, extracting each parent district from the
/// description field.
///
/// # Errors
///
/// Returns [`RegionError`] if the source's parent pattern is invalid.
pub fn adapt_neighborhoods(
    features: Vec<Feature>,
    source: &NeighborhoodSource,
) -> Result<Vec<RegionFeature>, RegionError> {
    let extractor = ParentExtractor::new(&source.parent_pattern)?;

    let neighborhoods: Vec<RegionFeature> = features
        .into_iter()
        .filter_map(|feature| {
            let name = feature_name(&feature, &source.name_field)?;
            let parent_name = property_str(&feature, &source.description_field)
                .and_then(|description| extractor.extract(&description));
            let geometry = feature_geometry(feature, &name)?;
            if parent_name.is_none() {
                log::warn!("Neighborhood {name:?} has no parseable parent district");
            }
            Some(RegionFeature::Neighborhood(Boundary {
                name,
                parent_name,
                geometry,
            }))
        })
        .collect();

    let unattributed = neighborhoods
        .iter()
        .filter(|feature| feature.parent_name().is_none())
        .count();
    if unattributed > 0 {
        log::warn!(
            "{unattributed} of {} neighborhoods from {} cannot be attributed to a district",
            neighborhoods.len(),
            source.path
        );
    }

    Ok(neighborhoods)
}

/// Reads the feature's name, warning when it is missing or blank.
fn feature_name(feature: &Feature, field: &str) -> Option<String> {
    let name = property_str(feature, field);
    if name.is_none() {
        log::warn!("Skipping feature without a {field:?} property");
    }
    name
}

/// Reads a non-blank string property.
fn property_str(feature: &Feature, field: &str) -> Option<String> {
    feature
        .property(field)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Converts a feature's geometry into a [`MultiPolygon`].
///
/// Handles both `Polygon` and `MultiPolygon` geometry types. Other types,
/// null geometry, and geometry without any exterior coordinates are
/// rejected and logged.
fn feature_geometry(feature: Feature, name: &str) -> Option<MultiPolygon<f64>> {
    let Some(geometry) = feature.geometry else {
        log::warn!("Skipping {name:?}: feature has no geometry");
        return None;
    };

    let geometry: geo::Geometry<f64> = match geometry.try_into() {
        Ok(geometry) => geometry,
        Err(e) => {
            log::warn!("Skipping {name:?}: invalid geometry: {e}");
            return None;
        }
    };

    let multi_polygon = match geometry {
        geo::Geometry::MultiPolygon(mp) => mp,
        geo::Geometry::Polygon(p) => MultiPolygon(vec![p]),
        other => {
            log::warn!("Skipping {name:?}: unsupported geometry {other:?}");
            return None;
        }
    };

    if multi_polygon
        .iter()
        .all(|polygon| polygon.exterior().0.is_empty())
    {
        log::warn!("Skipping {name:?}: geometry has no coordinates");
        return None;
    }

    Some(multi_polygon)
}
