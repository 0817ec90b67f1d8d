//! Read-only queries over the rent table.

use rent_map_rent_models::{RentRange, RentRecord};

use crate::normalize::normalize;

/// Read-only accessor over a [`RentRecord`].
///
/// Every query returns `0` for keys that are not in the table. Missing
/// coverage is expected, not an error.
#[derive(Debug, Clone, Default)]
pub struct RentLookup {
    record: RentRecord,
}

impl RentLookup {
    /// Wraps an already loaded rent table.
    #[must_use]
    pub const fn new(record: RentRecord) -> Self {
        Self { record }
    }

    /// Returns the underlying table.
    #[must_use]
    pub const fn record(&self) -> &RentRecord {
        &self.record
    }

    /// Average rent for a whole city, looked up case-insensitively.
    #[must_use]
    pub fn average_for_city(&self, city_name: &str) -> f64 {
        self.record
            .city_average
            .get(&normalize(city_name))
            .copied()
            .unwrap_or(0.0)
    }

    /// Average rent for a district. The key must already be normalized.
    #[must_use]
    pub fn average_for_district(&self, district_key: &str) -> f64 {
        self.record
            .district_average
            .get(district_key)
            .copied()
            .unwrap_or(0.0)
    }

    /// Average rent for a neighborhood.
    ///
    /// `district_key` must already be normalized; `neighborhood` is matched
    /// verbatim against the names found in the boundary data.
    #[must_use]
    pub fn average_for_neighborhood(&self, district_key: &str, neighborhood: &str) -> f64 {
        self.record
            .neighborhood_rent
            .get(district_key)
            .and_then(|neighborhoods| neighborhoods.get(neighborhood))
            .copied()
            .unwrap_or(0.0)
    }

    /// Cheapest and most expensive neighborhood rent across all districts.
    ///
    /// Non-finite values are ignored. Returns `None` when there are no
    /// neighborhood figures.
    #[must_use]
    pub fn rent_range(&self) -> Option<RentRange> {
        self.record
            .neighborhood_rent
            .values()
            .flat_map(|neighborhoods| neighborhoods.values().copied())
            .filter(|rent| rent.is_finite())
            .fold(None, |range, rent| {
                Some(match range {
                    None => RentRange {
                        min: rent,
                        max: rent,
                    },
                    Some(RentRange { min, max }) => RentRange {
                        min: min.min(rent),
                        max: max.max(rent),
                    },
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup() -> RentLookup {
        let mut pankow = BTreeMap::new();
        pankow.insert("Buch".to_string(), 720.0);
        pankow.insert("Prenzlauer Berg".to_string(), 1040.0);

        let mut mitte = BTreeMap::new();
        mitte.insert("Moabit".to_string(), 880.0);

        RentLookup::new(RentRecord {
            city_average: BTreeMap::from([("berlin".to_string(), 850.0)]),
            district_average: BTreeMap::from([
                ("pankow".to_string(), 860.0),
                ("tempelhof-schoeneberg".to_string(), 830.0),
            ]),
            neighborhood_rent: BTreeMap::from([
                ("pankow".to_string(), pankow),
                ("mitte".to_string(), mitte),
            ]),
        })
    }

    #[test]
    fn city_lookup_is_case_insensitive() {
        let rents = lookup();
        assert!((rents.average_for_city("Berlin") - 850.0).abs() < f64::EPSILON);
        assert!((rents.average_for_city("BERLIN") - 850.0).abs() < f64::EPSILON);
    }

    #[test]
    fn absent_keys_return_zero() {
        let rents = lookup();
        assert!(rents.average_for_city("Hamburg") == 0.0);
        assert!(rents.average_for_district("spandau") == 0.0);
        assert!(rents.average_for_neighborhood("pankow", "Atlantis") == 0.0);
        assert!(rents.average_for_neighborhood("spandau", "Buch") == 0.0);
    }

    #[test]
    fn district_lookup_expects_normalized_key() {
        let rents = lookup();
        assert!((rents.average_for_district("tempelhof-schoeneberg") - 830.0).abs() < f64::EPSILON);
        assert!(rents.average_for_district("Tempelhof-Schöneberg") == 0.0);
    }

    #[test]
    fn neighborhood_names_are_verbatim() {
        let rents = lookup();
        assert!(
            (rents.average_for_neighborhood("pankow", "Prenzlauer Berg") - 1040.0).abs()
                < f64::EPSILON
        );
        assert!(rents.average_for_neighborhood("pankow", "prenzlauer-berg") == 0.0);
    }

    #[test]
    fn computes_rent_range() {
        let range = lookup().rent_range().unwrap();
        assert!((range.min - 720.0).abs() < f64::EPSILON);
        assert!((range.max - 1040.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_table_has_no_range() {
        assert!(RentLookup::default().rent_range().is_none());
    }
}
