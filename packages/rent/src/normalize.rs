//! District name normalization.
//!
//! Rent figures are keyed by a canonical form of the district name so that
//! "Tempelhof-Schöneberg", "tempelhof schöneberg" and
//! "Tempelhof-Schoeneberg" all resolve to the same entry.

/// Normalizes a region name into its rent table key.
///
/// The pipeline:
/// 1. Trim and lowercase
/// 2. Collapse whitespace runs into a single `-`
/// 3. Fold `ä`, `ö`, `ü`, `ß` into `ae`, `oe`, `ue`, `ss`
///
/// All other characters pass through unchanged.
#[must_use]
pub fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    let hyphenated = lower.split_whitespace().collect::<Vec<_>>().join("-");

    let mut key = String::with_capacity(hyphenated.len());
    for c in hyphenated.chars() {
        match c {
            'ä' => key.push_str("ae"),
            'ö' => key.push_str("oe"),
            'ü' => key.push_str("ue"),
            'ß' => key.push_str("ss"),
            other => key.push(other),
        }
    }
    key
}
