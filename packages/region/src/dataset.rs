//! The immutable boundary collections of every hierarchy level.

use std::collections::BTreeMap;
use std::path::Path;

use rent_map_region_models::{BoundarySource, CityDefinition, HierarchyLevel};

use crate::adapter::{adapt_boundaries, adapt_neighborhoods, parse_collection};
use crate::{RegionError, RegionFeature};

/// Boundary features for all levels, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct RegionDataset {
    regions: Vec<RegionFeature>,
    /// city name -> its district features
    districts: BTreeMap<String, Vec<RegionFeature>>,
    neighborhoods: Vec<RegionFeature>,
}

impl RegionDataset {
    #[must_use]
    pub const fn new(
        regions: Vec<RegionFeature>,
        districts: BTreeMap<String, Vec<RegionFeature>>,
        neighborhoods: Vec<RegionFeature>,
    ) -> Self {
        Self {
            regions,
            districts,
            neighborhoods,
        }
    }

    /// Loads the boundary files of every city (and optionally the
    /// top-level region collection) from `data_dir`.
    ///
    /// A configured file that does not exist is logged and treated as an
    /// absent collection, so a partial data directory still yields a
    /// usable map.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError`] if an existing file cannot be read or parsed,
    /// or a neighborhood source has an invalid parent pattern.
    pub fn load(
        data_dir: &Path,
        cities: &[CityDefinition],
        regions: Option<&BoundarySource>,
    ) -> Result<Self, RegionError> {
        let mut dataset = Self::default();

        if let Some(source) = regions {
            if let Some(features) = read_collection(data_dir, &source.path)? {
                dataset.regions =
                    adapt_boundaries(features, HierarchyLevel::Region, &source.name_field, None);
                log::info!("Loaded {} region features", dataset.regions.len());
            }
        }

        for city in cities {
            if let Some(source) = &city.districts {
                if let Some(features) = read_collection(data_dir, &source.path)? {
                    let districts = adapt_boundaries(
                        features,
                        HierarchyLevel::District,
                        &source.name_field,
                        Some(&city.name),
                    );
                    log::info!(
                        "Loaded {} district features for {}",
                        districts.len(),
                        city.name
                    );
                    dataset.districts.insert(city.name.clone(), districts);
                }
            }

            if let Some(source) = &city.neighborhoods {
                if let Some(features) = read_collection(data_dir, &source.path)? {
                    let neighborhoods = adapt_neighborhoods(features, source)?;
                    log::info!(
                        "Loaded {} neighborhood features for {}",
                        neighborhoods.len(),
                        city.name
                    );
                    dataset.neighborhoods.extend(neighborhoods);
                }
            }
        }

        Ok(dataset)
    }

    /// Top-level region features (may be empty).
    #[must_use]
    pub fn regions(&self) -> &[RegionFeature] {
        &self.regions
    }

    /// District features of a city, or an empty slice if the city has no
    /// modeled districts.
    #[must_use]
    pub fn districts_of(&self, city_name: &str) -> &[RegionFeature] {
        self.districts
            .get(city_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Neighborhoods whose extracted parent equals `district_name` exactly.
    ///
    /// The match is case-sensitive and un-normalized. Unattributed
    /// neighborhoods never match.
    #[must_use]
    pub fn neighborhoods_of(&self, district_name: &str) -> Vec<&RegionFeature> {
        self.neighborhoods
            .iter()
            .filter(|feature| feature.parent_name() == Some(district_name))
            .collect()
    }

    /// All neighborhood features, attributed or not.
    #[must_use]
    pub fn neighborhoods(&self) -> &[RegionFeature] {
        &self.neighborhoods
    }

    /// The features shown for a view `level` with `selected` as the
    /// selected region name.
    ///
    /// At the region level the selection is ignored. Below it, no selection
    /// means nothing to show.
    #[must_use]
    pub fn features_for(&self, level: HierarchyLevel, selected: Option<&str>) -> Vec<&RegionFeature> {
        match (level, selected) {
            (HierarchyLevel::Region, _) => self.regions.iter().collect(),
            (HierarchyLevel::District, Some(city)) => self.districts_of(city).iter().collect(),
            (HierarchyLevel::Neighborhood, Some(district)) => self.neighborhoods_of(district),
            (_, None) => Vec::new(),
        }
    }
}

/// Reads and parses a boundary file, or `None` if it does not exist.
fn read_collection(
    data_dir: &Path,
    relative_path: &str,
) -> Result<Option<Vec<geojson::Feature>>, RegionError> {
    let path = data_dir.join(relative_path);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("Boundary file {} not found, skipping", path.display());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    log::debug!("Parsing boundary file {}", path.display());
    parse_collection(&contents).map(Some)
}
