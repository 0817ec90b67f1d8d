//! Loads the rent table from its JSON export.
//!
//! The export looks like:
//!
//! ```json
//! {
//!   "berlin_average": 850.0,
//!   "hamburg_average": 820.0,
//!   "bezirk_averages": { "pankow": 860.0 },
//!   "districts": { "pankow": { "Buch": 720.0 } }
//! }
//! ```
//!
//! Every top-level `<city>_average` key becomes a city average.

use std::collections::BTreeMap;
use std::path::Path;

use rent_map_rent_models::RentRecord;
use serde::Deserialize;

use crate::normalize::normalize;
use crate::{RentError, RentLookup};

const CITY_AVERAGE_SUFFIX: &str = "_average";

#[derive(Debug, Deserialize)]
struct RentExport {
    #[serde(default)]
    bezirk_averages: BTreeMap<String, f64>,
    #[serde(default)]
    districts: BTreeMap<String, BTreeMap<String, f64>>,
    #[serde(flatten)]
    rest: BTreeMap<String, serde_json::Value>,
}

impl From<RentExport> for RentRecord {
    fn from(export: RentExport) -> Self {
        let mut city_average = BTreeMap::new();
        for (key, value) in export.rest {
            let Some(city) = key.strip_suffix(CITY_AVERAGE_SUFFIX) else {
                log::debug!("Ignoring unknown rent table key {key:?}");
                continue;
            };
            match value.as_f64() {
                Some(rent) => {
                    city_average.insert(normalize(city), rent);
                }
                None => log::warn!("City average {key:?} is not a number: {value}"),
            }
        }

        let district_average = export
            .bezirk_averages
            .into_iter()
            .map(|(key, rent)| (normalize(&key), rent))
            .collect();

        let neighborhood_rent = export
            .districts
            .into_iter()
            .map(|(key, neighborhoods)| (normalize(&key), neighborhoods))
            .collect();

        Self {
            city_average,
            district_average,
            neighborhood_rent,
        }
    }
}

/// Parses a rent table from its JSON export.
///
/// # Errors
///
/// Returns [`RentError::Json`] if the document is not valid JSON or does
/// not have the expected shape.
pub fn from_json_str(json: &str) -> Result<RentLookup, RentError> {
    let export: RentExport = serde_json::from_str(json)?;
    let record = RentRecord::from(export);

    log::info!(
        "Loaded rent table: {} cities, {} districts, {} neighborhoods",
        record.city_average.len(),
        record.district_average.len(),
        record
            .neighborhood_rent
            .values()
            .map(BTreeMap::len)
            .sum::<usize>()
    );

    Ok(RentLookup::new(record))
}

/// Reads and parses a rent table file.
///
/// # Errors
///
/// Returns [`RentError`] if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> Result<RentLookup, RentError> {
    log::info!("Reading rent table from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    from_json_str(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = r#"{
        "berlin_average": 850.5,
        "hamburg_average": 820,
        "bezirk_averages": {
            "pankow": 860,
            "Tempelhof-Schöneberg": 830
        },
        "districts": {
            "pankow": { "Buch": 720, "Prenzlauer Berg": 1040 }
        },
        "source": "survey 2024"
    }"#;

    #[test]
    fn parses_city_averages_from_suffixed_keys() {
        let rents = from_json_str(EXPORT).unwrap();
        assert!((rents.average_for_city("Berlin") - 850.5).abs() < f64::EPSILON);
        assert!((rents.average_for_city("Hamburg") - 820.0).abs() < f64::EPSILON);
        assert_eq!(rents.record().city_average.len(), 2);
    }

    #[test]
    fn normalizes_district_keys() {
        let rents = from_json_str(EXPORT).unwrap();
        assert!((rents.average_for_district("tempelhof-schoeneberg") - 830.0).abs() < f64::EPSILON);
        assert!((rents.average_for_neighborhood("pankow", "Prenzlauer Berg") - 1040.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let rents = from_json_str("{}").unwrap();
        assert!(rents.record().is_empty());
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            from_json_str(r#"{"districts": []}"#),
            Err(RentError::Json(_))
        ));
        assert!(matches!(from_json_str("not json"), Err(RentError::Json(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_file(Path::new("/nonexistent/rent.json")),
            Err(RentError::Io(_))
        ));
    }
}
