#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Rent price table and choropleth color palette types.
//!
//! The rent table is loaded once at startup and never mutated. A rent of
//! `0` means "no survey data" and always renders as [`ColorToken::NoData`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Immutable rent figures for every supported city.
///
/// District keys are normalized (`"tempelhof-schoeneberg"`), neighborhood
/// names are kept verbatim as they appear in the boundary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRecord {
    /// Normalized city key -> average rent for the whole city.
    pub city_average: BTreeMap<String, f64>,
    /// Normalized district key -> average rent for the district.
    pub district_average: BTreeMap<String, f64>,
    /// Normalized district key -> neighborhood name -> average rent.
    pub neighborhood_rent: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RentRecord {
    /// Returns `true` if the record holds no figures at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.city_average.is_empty()
            && self.district_average.is_empty()
            && self.neighborhood_rent.is_empty()
    }
}

/// Lowest and highest neighborhood rent in the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRange {
    /// Cheapest neighborhood rent.
    pub min: f64,
    /// Most expensive neighborhood rent.
    pub max: f64,
}

/// Fill color bands of the rent choropleth, ordered from "no data" through
/// the cheapest band to the most expensive one.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ColorToken {
    /// No rent figure available (gray)
    NoData,
    /// Below 750€
    Green,
    /// 750€ and above
    LightGreen,
    /// 780€ and above
    Yellow,
    /// 800€ and above
    YellowOrange,
    /// 850€ and above
    Orange,
    /// 900€ and above
    RedOrange,
    /// 950€ and above
    Red,
    /// 1000€ and above
    DarkRed,
}

impl ColorToken {
    /// Returns all tokens, lowest intensity first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::NoData,
            Self::Green,
            Self::LightGreen,
            Self::Yellow,
            Self::YellowOrange,
            Self::Orange,
            Self::RedOrange,
            Self::Red,
            Self::DarkRed,
        ]
    }

    /// Hex fill color for this band.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::NoData => "#e0e0e0",
            Self::Green => "#31a354",
            Self::LightGreen => "#addd8e",
            Self::Yellow => "#fed976",
            Self::YellowOrange => "#feb24c",
            Self::Orange => "#fd8d3c",
            Self::RedOrange => "#fc4e2a",
            Self::Red => "#e31a1c",
            Self::DarkRed => "#bd0026",
        }
    }

    /// Rank on the palette. `0` is reserved for [`Self::NoData`].
    #[must_use]
    pub const fn intensity(self) -> u8 {
        self as u8
    }

    /// Whether text drawn on top of this fill should be light.
    ///
    /// Uses the perceived brightness `(299r + 587g + 114b) / 1000`.
    #[must_use]
    pub fn is_dark(self) -> bool {
        let hex = self.hex().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u32::from_str_radix(s, 16).ok())
                .unwrap_or(0)
        };
        let brightness = (channel(0..2) * 299 + channel(2..4) * 587 + channel(4..6) * 114) / 1000;
        brightness < 128
    }
}
