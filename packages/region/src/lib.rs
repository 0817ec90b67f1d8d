#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region boundary loading, parent attribution, and hierarchy filtering.
//!
//! Boundary collections are read from `GeoJSON` files once at startup and
//! adapted into [`feature::RegionFeature`] values with a uniform name and
//! parent name, whatever the property naming of the source file. The
//! resulting [`dataset::RegionDataset`] is immutable and answers the
//! "which features belong to this selection" queries of the map.

pub mod adapter;
pub mod dataset;
pub mod feature;
pub mod index;
pub mod registry;

pub use dataset::RegionDataset;
pub use feature::{Boundary, RegionFeature};

use thiserror::Error;

/// Errors that can occur while loading boundary data.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Reading a boundary file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A parent-name pattern is not a valid regex.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
