//! What the rendering surface draws for one navigation state.

use rent_map_region::RegionFeature;
use rent_map_region::registry::find_city;
use rent_map_region_models::{CityDefinition, HierarchyLevel, LatLng};
use rent_map_rent::{RentLookup, color_for_rent, normalize};
use rent_map_rent_models::{ColorToken, RentRange};
use serde::{Deserialize, Serialize};

use crate::NavigationState;

/// Largest city marker radius.
pub const MAX_MARKER_RADIUS: f64 = 6.0;

/// Smallest city marker radius, so that small cities stay clickable.
pub const MIN_MARKER_RADIUS: f64 = 1.0;

/// Population that maps to a marker radius of `ln(1)`.
const MARKER_POPULATION_UNIT: f64 = 20_000.0;

/// A feature with its fill and tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyledFeature {
    pub name: String,
    pub level: HierarchyLevel,
    pub fill: ColorToken,
    /// Average rent in euros, `0` if unknown.
    pub rent: f64,
    pub tooltip: String,
}

/// A rent label placed at a feature's centroid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaLabel {
    pub position: LatLng,
    pub name: String,
    pub rent_text: String,
    /// Whether the label sits on a dark fill and needs light text.
    pub dark_background: bool,
}

/// Entry point marker of a registered city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityMarker {
    pub name: String,
    pub position: LatLng,
    pub radius: f64,
}

/// Average rent of the current selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfo {
    pub name: String,
    pub average_rent: f64,
}

/// Availability of the back and reset controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapControls {
    pub can_go_back: bool,
    pub can_reset: bool,
}

/// Everything needed to draw the map for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub level: HierarchyLevel,
    pub selected_region: Option<String>,
    /// The focused neighborhood, drawn highlighted.
    pub selected: Option<String>,
    pub features: Vec<StyledFeature>,
    pub labels: Vec<AreaLabel>,
    pub markers: Vec<CityMarker>,
    pub info: Option<RegionInfo>,
    /// Span of the color legend, `None` without neighborhood rents.
    pub legend: Option<RentRange>,
    pub controls: MapControls,
}

/// Rent shown for a feature, `0` if unknown.
///
/// Regions use the city average, districts their own average, and
/// neighborhoods the figure listed under their parent district.
#[must_use]
pub fn feature_rent(rents: &RentLookup, feature: &RegionFeature) -> f64 {
    match feature.level() {
        HierarchyLevel::Region => rents.average_for_city(feature.name()),
        HierarchyLevel::District => rents.average_for_district(&normalize(feature.name())),
        HierarchyLevel::Neighborhood => feature.parent_name().map_or(0.0, |district| {
            rents.average_for_neighborhood(&normalize(district), feature.name())
        }),
    }
}

fn format_rent(rent: f64) -> String {
    format!("{rent:.0}€")
}

fn tooltip(name: &str, rent: f64) -> String {
    if rent > 0.0 {
        format!("{name} · {}", format_rent(rent))
    } else {
        name.to_string()
    }
}

/// Marker radius for a city: `ln(population / 20000)`, kept between
/// [`MIN_MARKER_RADIUS`] and [`MAX_MARKER_RADIUS`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn marker_radius(population: u64) -> f64 {
    (population as f64 / MARKER_POPULATION_UNIT)
        .ln()
        .clamp(MIN_MARKER_RADIUS, MAX_MARKER_RADIUS)
}

/// Markers of all registered cities.
///
/// Hidden while a neighborhood is focused, and inside a city-state, whose
/// marker would sit on top of its own districts.
#[must_use]
pub fn city_markers(state: &NavigationState, cities: &[CityDefinition]) -> Vec<CityMarker> {
    if state.selected_subregion_name().is_some() {
        return Vec::new();
    }
    let in_city_state = state
        .active_region()
        .and_then(|region| find_city(cities, region))
        .is_some_and(|city| city.city_state);
    if in_city_state {
        return Vec::new();
    }

    cities
        .iter()
        .map(|city| CityMarker {
            name: city.name.clone(),
            position: city.center,
            radius: marker_radius(city.population),
        })
        .collect()
}

/// The info panel for the current selection, if it has a known rent.
#[must_use]
pub fn region_info(state: &NavigationState, rents: &RentLookup) -> Option<RegionInfo> {
    let selected = state.selected_region_name()?;
    let (name, average_rent) = match (state.current_level(), state.selected_subregion_name()) {
        (HierarchyLevel::Neighborhood, Some(neighborhood)) => (
            neighborhood,
            rents.average_for_neighborhood(&normalize(selected), neighborhood),
        ),
        (HierarchyLevel::Neighborhood, None) => {
            (selected, rents.average_for_district(&normalize(selected)))
        }
        (HierarchyLevel::District, _) => (selected, rents.average_for_city(selected)),
        (HierarchyLevel::Region, _) => return None,
    };

    (average_rent > 0.0).then(|| RegionInfo {
        name: name.to_string(),
        average_rent,
    })
}

/// Builds the scene for `state` from its active features.
#[must_use]
pub fn build_scene(
    state: &NavigationState,
    features: &[&RegionFeature],
    rents: &RentLookup,
    cities: &[CityDefinition],
    default_city: &str,
) -> Scene {
    let mut styled = Vec::with_capacity(features.len());
    let mut labels = Vec::new();

    for feature in features {
        let rent = feature_rent(rents, feature);
        let fill = color_for_rent(rent);

        if rent > 0.0 {
            if let Some(position) = feature.label_position() {
                labels.push(AreaLabel {
                    position,
                    name: feature.name().to_string(),
                    rent_text: format_rent(rent),
                    dark_background: fill.is_dark(),
                });
            } else {
                log::warn!("No label position for {:?}: degenerate geometry", feature.name());
            }
        }

        styled.push(StyledFeature {
            name: feature.name().to_string(),
            level: feature.level(),
            fill,
            rent,
            tooltip: tooltip(feature.name(), rent),
        });
    }

    Scene {
        level: state.current_level(),
        selected_region: state.selected_region_name().map(ToString::to_string),
        selected: state.selected_subregion_name().map(ToString::to_string),
        features: styled,
        labels,
        markers: city_markers(state, cities),
        info: region_info(state, rents),
        legend: rents.rent_range(),
        controls: MapControls {
            can_go_back: !state.current_level().is_root(),
            can_reset: !state.is_default_city(default_city),
        },
    }
}
