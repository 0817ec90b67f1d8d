//! The boundary between the navigation core and whatever draws the map.

use rent_map_region_models::LatLng;
use serde::{Deserialize, Serialize};

use crate::{CameraCommand, Scene};

/// A map drawing capability driven by the [`crate::MapController`].
pub trait RenderingSurface {
    /// Replaces everything drawn with `scene`.
    fn render(&mut self, scene: &Scene);

    /// Moves the camera, superseding any animation still in flight.
    fn apply_camera(&mut self, command: &CameraCommand);

    /// Emphasizes the hovered feature, or clears the emphasis.
    fn highlight(&mut self, _name: Option<&str>) {}
}

/// Pointer input delivered by the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerEvent {
    /// A feature or city marker was clicked.
    Click { name: String },
    /// The map was clicked at a position, with no feature resolved yet.
    ClickAt { position: LatLng },
    Hover { name: String },
    HoverEnd,
}
