#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rent price lookup, district name normalization, and rent color scale.
//!
//! The rent table is read from a JSON file once at startup. All queries
//! afterwards are infallible: a missing city, district, or neighborhood
//! yields `0`, the "no data" sentinel.

pub mod color;
pub mod load;
pub mod lookup;
pub mod normalize;

pub use color::color_for_rent;
pub use lookup::RentLookup;
pub use normalize::normalize;

use thiserror::Error;

/// Errors that can occur while loading rent data.
#[derive(Debug, Error)]
pub enum RentError {
    /// Reading the rent file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
