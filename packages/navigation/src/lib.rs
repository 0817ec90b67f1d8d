#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Drill-down navigation state, camera framing, and scene building for the
//! rent map.
//!
//! A [`controller::MapController`] owns the [`state::NavigationState`], the
//! loaded boundary and rent data, and a handle to the
//! [`surface::RenderingSurface`] that draws the map. Pointer events and
//! control actions go through the controller, which re-filters the active
//! features, rebuilds the [`scene::Scene`], and issues at most one
//! [`viewport::CameraCommand`] per action.
//!
//! Nothing here fails: a selection without data simply renders an empty
//! scene.

pub mod controller;
pub mod scene;
pub mod state;
pub mod surface;
pub mod viewport;

pub use controller::MapController;
pub use scene::Scene;
pub use state::NavigationState;
pub use surface::{PointerEvent, RenderingSurface};
pub use viewport::{CameraCommand, ViewportConfig, ViewportController};
