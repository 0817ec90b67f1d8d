//! Step function from rent price to choropleth color band.

use rent_map_rent_models::ColorToken;

/// Lower bounds (inclusive, in euros) of every band above
/// [`ColorToken::Green`], most expensive first.
const BREAKPOINTS: &[(f64, ColorToken)] = &[
    (1000.0, ColorToken::DarkRed),
    (950.0, ColorToken::Red),
    (900.0, ColorToken::RedOrange),
    (850.0, ColorToken::Orange),
    (800.0, ColorToken::YellowOrange),
    (780.0, ColorToken::Yellow),
    (750.0, ColorToken::LightGreen),
];

/// Maps a rent to its color band.
///
/// `0` is the "no data" sentinel and maps to [`ColorToken::NoData`], as do
/// negative and non-finite values. Every positive rent maps to a real band.
#[must_use]
pub fn color_for_rent(rent: f64) -> ColorToken {
    if !rent.is_finite() || rent <= 0.0 {
        return ColorToken::NoData;
    }

    BREAKPOINTS
        .iter()
        .find(|(threshold, _)| rent >= *threshold)
        .map_or(ColorToken::Green, |(_, token)| *token)
}
