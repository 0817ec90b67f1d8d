//! The cities the map knows about, embedded from `cities/*.toml`.
//!
//! Only Berlin and Hamburg have district boundaries, and only Berlin has
//! neighborhoods. The other cities are markers and pinned camera views.
//! A new city needs its TOML file plus a line in `CITY_TOMLS`.

use rent_map_region_models::CityDefinition;

/// Keeps the registry and the `cities/` directory in step.
#[cfg(test)]
const EXPECTED_CITY_COUNT: usize = 10;

/// Embedded TOML city definitions, most populous first.
const CITY_TOMLS: &[(&str, &str)] = &[
    ("berlin", include_str!("../cities/berlin.toml")),
    ("hamburg", include_str!("../cities/hamburg.toml")),
    ("munich", include_str!("../cities/munich.toml")),
    ("cologne", include_str!("../cities/cologne.toml")),
    ("frankfurt", include_str!("../cities/frankfurt.toml")),
    ("stuttgart", include_str!("../cities/stuttgart.toml")),
    ("duesseldorf", include_str!("../cities/duesseldorf.toml")),
    ("leipzig", include_str!("../cities/leipzig.toml")),
    ("dortmund", include_str!("../cities/dortmund.toml")),
    ("essen", include_str!("../cities/essen.toml")),
];

/// Returns all registered cities.
///
/// # Panics
///
/// Panics on a malformed city file. The files are embedded at build time,
/// so the registry tests catch this before release.
#[must_use]
pub fn all_cities() -> Vec<CityDefinition> {
    CITY_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse city definition '{name}': {e}"))
        })
        .collect()
}

/// Finds a city by display name or id, ignoring case.
#[must_use]
pub fn find_city<'a>(cities: &'a [CityDefinition], name: &str) -> Option<&'a CityDefinition> {
    cities
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(name) || city.id.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rent_map_region_models::{DEFAULT_PARENT_PATTERN, LatLng};
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_cities() {
        let cities = all_cities();
        assert_eq!(
            cities.len(),
            EXPECTED_CITY_COUNT,
            "Expected {EXPECTED_CITY_COUNT} cities, found {}. \
             Update EXPECTED_CITY_COUNT after adding/removing cities.",
            cities.len()
        );
    }

    #[test]
    fn city_ids_are_unique() {
        let cities = all_cities();
        let mut seen = BTreeSet::new();
        for city in &cities {
            assert!(seen.insert(&city.id), "Duplicate city ID: {}", city.id);
        }
    }

    #[test]
    fn all_cities_have_required_fields() {
        for city in &all_cities() {
            assert!(!city.id.is_empty(), "City has empty id");
            assert!(!city.name.is_empty(), "City {} has empty name", city.id);
            assert!(city.population > 0, "City {} has no population", city.id);
            assert!(
                (47.0..56.0).contains(&city.center.lat) && (5.0..16.0).contains(&city.center.lon),
                "City {} is centered outside Germany: {:?}",
                city.id,
                city.center
            );
        }
    }

    #[test]
    fn berlin_has_full_hierarchy() {
        let cities = all_cities();
        let berlin = find_city(&cities, "Berlin").unwrap();
        assert_eq!(berlin.center, LatLng::new(52.52, 13.405));
        assert_eq!(berlin.zoom, 11);
        assert!(berlin.city_state);
        assert_eq!(berlin.districts.as_ref().unwrap().name_field, "name");

        let neighborhoods = berlin.neighborhoods.as_ref().unwrap();
        assert_eq!(neighborhoods.name_field, "Name");
        assert_eq!(neighborhoods.description_field, "Description");
        assert_eq!(neighborhoods.parent_pattern, DEFAULT_PARENT_PATTERN);
    }

    #[test]
    fn finds_cities_by_name_or_id() {
        let cities = all_cities();
        assert_eq!(find_city(&cities, "hamburg").map(|c| c.id.as_str()), Some("hamburg"));
        assert_eq!(find_city(&cities, "Düsseldorf").map(|c| c.id.as_str()), Some("duesseldorf"));
        assert_eq!(find_city(&cities, "duesseldorf").map(|c| c.name.as_str()), Some("Düsseldorf"));
        assert!(find_city(&cities, "Paris").is_none());
    }

    #[test]
    fn only_city_states_are_flagged() {
        let flagged: Vec<String> = all_cities()
            .into_iter()
            .filter(|c| c.city_state)
            .map(|c| c.name)
            .collect();
        assert_eq!(flagged, vec!["Berlin", "Hamburg"]);
    }
}
