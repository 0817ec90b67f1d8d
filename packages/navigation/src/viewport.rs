//! Camera framing for each navigation step.
//!
//! A freshly clicked feature is framed by fitting its bounding box. The
//! canonical entry points (the root view and a city's district view) use
//! pinned center/zoom pairs instead, which stay stable no matter how the
//! filtered data happens to be shaped.
//!
//! Commands describe the final camera position only. Issuing a new one
//! while the surface is still animating the previous one supersedes it.

use rent_map_region::RegionFeature;
use rent_map_region::registry::find_city;
use rent_map_region_models::{BoundingBox, CityDefinition, HierarchyLevel, LatLng};
use serde::{Deserialize, Serialize};

use crate::NavigationState;

/// A camera instruction for the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CameraCommand {
    /// Fit the box into the viewport.
    #[serde(rename_all = "camelCase")]
    FitBounds {
        bounds: BoundingBox,
        /// Padding in pixels. Negative values let the shape overflow the
        /// viewport edges slightly.
        padding: f64,
        max_zoom: u8,
        animate: bool,
    },
    /// Center the camera on a fixed position.
    SetView {
        center: LatLng,
        zoom: u8,
        animate: bool,
    },
}

/// Fit parameters used when framing a feature of one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelFraming {
    pub padding: f64,
    pub max_zoom: u8,
}

/// Camera settings, usually read from the `[viewport]` config table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Framing when a region feature is selected.
    pub region: LevelFraming,
    /// Framing when a district feature is selected.
    pub district: LevelFraming,
    /// Framing when a neighborhood feature is focused.
    pub neighborhood: LevelFraming,
    /// Whether camera moves after user actions are animated.
    pub animate: bool,
    /// Pinned center of the root view.
    pub root_center: LatLng,
    /// Pinned zoom of the root view.
    pub root_zoom: u8,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            region: LevelFraming {
                padding: 20.0,
                max_zoom: 10,
            },
            district: LevelFraming {
                padding: -30.0,
                max_zoom: 13,
            },
            neighborhood: LevelFraming {
                padding: -40.0,
                max_zoom: 15,
            },
            animate: true,
            root_center: LatLng::new(51.1657, 10.4515),
            root_zoom: 6,
        }
    }
}

/// Derives [`CameraCommand`]s from navigation state and feature geometry.
#[derive(Debug, Clone, Default)]
pub struct ViewportController {
    config: ViewportConfig,
}

impl ViewportController {
    #[must_use]
    pub const fn new(config: ViewportConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Fit parameters for framing a feature of `level`.
    #[must_use]
    pub const fn framing(&self, level: HierarchyLevel) -> LevelFraming {
        match level {
            HierarchyLevel::Region => self.config.region,
            HierarchyLevel::District => self.config.district,
            HierarchyLevel::Neighborhood => self.config.neighborhood,
        }
    }

    /// Fits a single selected feature.
    ///
    /// Returns `None` (and logs) if the feature's geometry is degenerate.
    #[must_use]
    pub fn fit_feature(&self, feature: &RegionFeature) -> Option<CameraCommand> {
        let Some(bounds) = feature.bounds() else {
            log::warn!(
                "Cannot frame {} {:?}: geometry has no coordinates",
                feature.level(),
                feature.name()
            );
            return None;
        };
        Some(self.fit_bounds(bounds, feature.level()))
    }

    /// Fits the union of several features of `level`.
    ///
    /// Features with degenerate geometry are left out. Returns `None` if
    /// none of them has bounds.
    #[must_use]
    pub fn fit_all(&self, features: &[&RegionFeature], level: HierarchyLevel) -> Option<CameraCommand> {
        features
            .iter()
            .filter_map(|feature| feature.bounds())
            .reduce(BoundingBox::union)
            .map(|bounds| self.fit_bounds(bounds, level))
    }

    /// The pinned root view.
    #[must_use]
    pub const fn root_view(&self) -> CameraCommand {
        CameraCommand::SetView {
            center: self.config.root_center,
            zoom: self.config.root_zoom,
            animate: self.config.animate,
        }
    }

    /// The pinned district view of a city.
    #[must_use]
    pub const fn city_view(&self, city: &CityDefinition) -> CameraCommand {
        CameraCommand::SetView {
            center: city.center,
            zoom: city.zoom,
            animate: self.config.animate,
        }
    }

    /// Frames the current state as a whole, for entry points and back
    /// navigation rather than a fresh click.
    ///
    /// The root and known cities use their pinned views; anything else
    /// fits the shown features.
    #[must_use]
    pub fn frame_state(
        &self,
        state: &NavigationState,
        cities: &[CityDefinition],
        features: &[&RegionFeature],
    ) -> Option<CameraCommand> {
        let level = state.current_level();
        match (level, state.selected_region_name()) {
            (HierarchyLevel::Region, _) => Some(self.root_view()),
            (HierarchyLevel::District, Some(name)) => find_city(cities, name)
                .map(|city| self.city_view(city))
                .or_else(|| self.fit_all(features, HierarchyLevel::District)),
            (_, _) => self.fit_all(features, level),
        }
    }

    const fn fit_bounds(&self, bounds: BoundingBox, level: HierarchyLevel) -> CameraCommand {
        let framing = self.framing(level);
        CameraCommand::FitBounds {
            bounds,
            padding: framing.padding,
            max_zoom: framing.max_zoom,
            animate: self.config.animate,
        }
    }
}

/// Disables animation on a command, for the very first frame.
#[must_use]
pub const fn without_animation(command: CameraCommand) -> CameraCommand {
    match command {
        CameraCommand::FitBounds {
            bounds,
            padding,
            max_zoom,
            ..
        } => CameraCommand::FitBounds {
            bounds,
            padding,
            max_zoom,
            animate: false,
        },
        CameraCommand::SetView { center, zoom, .. } => CameraCommand::SetView {
            center,
            zoom,
            animate: false,
        },
    }
}
