//! Rendering surfaces for the terminal.

use std::io::Write;

use rent_map_navigation::{CameraCommand, RenderingSurface, Scene};
use serde::Serialize;

/// Prints each scene as a plain-text table.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_scene(&mut self, scene: &Scene) -> std::io::Result<()> {
        let title = scene
            .selected_region
            .as_deref()
            .unwrap_or("Germany");
        writeln!(self.out)?;
        writeln!(self.out, "== {title} ({} view) ==", scene.level)?;

        if scene.features.is_empty() {
            writeln!(self.out, "  (no boundary data)")?;
        }
        for feature in &scene.features {
            let marker = if scene.selected.as_deref() == Some(feature.name.as_str()) {
                '>'
            } else {
                ' '
            };
            let rent = if feature.rent > 0.0 {
                format!("{:.0}€", feature.rent)
            } else {
                "-".to_string()
            };
            writeln!(
                self.out,
                "{marker} {:<32} {rent:>7}  {}",
                feature.name, feature.fill
            )?;
        }

        if !scene.markers.is_empty() {
            let cities: Vec<&str> = scene.markers.iter().map(|m| m.name.as_str()).collect();
            writeln!(self.out, "  Cities: {}", cities.join(", "))?;
        }
        if let Some(info) = &scene.info {
            writeln!(
                self.out,
                "  Average rent in {}: {:.0}€",
                info.name, info.average_rent
            )?;
        }
        if let Some(legend) = &scene.legend {
            writeln!(
                self.out,
                "  Rents from {:.0}€ to {:.0}€",
                legend.min, legend.max
            )?;
        }
        Ok(())
    }
}

impl<W: Write> RenderingSurface for TerminalSurface<W> {
    fn render(&mut self, scene: &Scene) {
        if let Err(e) = self.write_scene(scene) {
            log::warn!("Failed to print scene: {e}");
        }
    }

    fn apply_camera(&mut self, command: &CameraCommand) {
        let line = match command {
            CameraCommand::FitBounds { bounds, max_zoom, .. } => {
                let center = bounds.center();
                format!(
                    "  Camera: fit around {:.4}, {:.4} (max zoom {max_zoom})",
                    center.lat, center.lon
                )
            }
            CameraCommand::SetView { center, zoom, .. } => {
                format!("  Camera: {:.4}, {:.4} at zoom {zoom}", center.lat, center.lon)
            }
        };
        if let Err(e) = writeln!(self.out, "{line}") {
            log::warn!("Failed to print camera: {e}");
        }
    }

    fn highlight(&mut self, name: Option<&str>) {
        if let Some(name) = name {
            log::debug!("Highlighting {name:?}");
        }
    }
}

/// Keeps the last scene and camera command for printing as JSON.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturingSurface {
    pub scene: Option<Scene>,
    pub camera: Option<CameraCommand>,
}

impl RenderingSurface for CapturingSurface {
    fn render(&mut self, scene: &Scene) {
        self.scene = Some(scene.clone());
    }

    fn apply_camera(&mut self, command: &CameraCommand) {
        self.camera = Some(*command);
    }
}
