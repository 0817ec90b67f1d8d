//! Interactive drill-down explorer.
//!
//! Presents the current scene's features and controls as a `dialoguer`
//! menu and feeds the choice back into the [`MapController`] until the
//! user quits.

use dialoguer::Select;
use rent_map_navigation::{MapController, RenderingSurface, Scene};

/// One menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Select(String),
    Back,
    ResetToDefaultCity,
    ResetToRoot,
    Quit,
}

/// Menu entries for a scene: its features, then the city markers, then the
/// controls that currently apply.
fn actions(scene: &Scene) -> Vec<(String, Action)> {
    let mut actions: Vec<(String, Action)> = scene
        .features
        .iter()
        .map(|feature| {
            let label = if scene.selected.as_deref() == Some(feature.name.as_str()) {
                format!("{} (selected)", feature.tooltip)
            } else {
                feature.tooltip.clone()
            };
            (label, Action::Select(feature.name.clone()))
        })
        .collect();

    actions.extend(
        scene
            .markers
            .iter()
            .map(|marker| (format!("Go to {}", marker.name), Action::Select(marker.name.clone()))),
    );

    if scene.controls.can_go_back {
        actions.push(("Back".to_string(), Action::Back));
    }
    if scene.controls.can_reset {
        actions.push(("Reset to default city".to_string(), Action::ResetToDefaultCity));
    }
    if !scene.level.is_root() {
        actions.push(("Overview".to_string(), Action::ResetToRoot));
    }
    actions.push(("Quit".to_string(), Action::Quit));
    actions
}

/// Runs the explorer until the user quits.
///
/// # Errors
///
/// Returns an error if reading the user's choice fails.
pub fn run<S: RenderingSurface>(
    controller: &mut MapController<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    controller.start();

    loop {
        let scene = controller.scene();
        let actions = actions(&scene);
        let labels: Vec<&str> = actions.iter().map(|(label, _)| label.as_str()).collect();

        let idx = Select::new()
            .with_prompt("Where to?")
            .items(&labels)
            .default(0)
            .interact()?;

        match &actions[idx].1 {
            Action::Select(name) => {
                if !controller.click_feature(name) {
                    println!("Nothing to select for {name}");
                }
            }
            Action::Back => {
                controller.back();
            }
            Action::ResetToDefaultCity => controller.reset_to_default_city(),
            Action::ResetToRoot => controller.reset_to_root(),
            Action::Quit => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use rent_map_navigation::scene::{CityMarker, MapControls, StyledFeature};
    use rent_map_region_models::{HierarchyLevel, LatLng};
    use rent_map_rent::color_for_rent;

    use super::*;

    fn scene(level: HierarchyLevel, controls: MapControls) -> Scene {
        Scene {
            level,
            selected_region: None,
            selected: None,
            features: vec![StyledFeature {
                name: "Pankow".to_string(),
                level: HierarchyLevel::District,
                fill: color_for_rent(760.0),
                rent: 760.0,
                tooltip: "Pankow · 760€".to_string(),
            }],
            labels: vec![],
            markers: vec![],
            info: None,
            legend: None,
            controls,
        }
    }

    #[test]
    fn entry_state_offers_features_back_and_overview() {
        let entry = scene(
            HierarchyLevel::District,
            MapControls {
                can_go_back: true,
                can_reset: false,
            },
        );
        let actions: Vec<Action> = actions(&entry).into_iter().map(|(_, a)| a).collect();
        assert_eq!(
            actions,
            vec![
                Action::Select("Pankow".to_string()),
                Action::Back,
                Action::ResetToRoot,
                Action::Quit,
            ]
        );
    }

    #[test]
    fn root_offers_city_markers() {
        let mut root = scene(
            HierarchyLevel::Region,
            MapControls {
                can_go_back: false,
                can_reset: true,
            },
        );
        root.features.clear();
        root.markers.push(CityMarker {
            name: "Hamburg".to_string(),
            position: LatLng::new(53.5511, 9.9937),
            radius: 4.3,
        });

        let actions = actions(&root);
        assert_eq!(actions[0], ("Go to Hamburg".to_string(), Action::Select("Hamburg".to_string())));
        assert_eq!(actions[1].1, Action::ResetToDefaultCity);
        assert_eq!(actions.last().map(|(_, a)| a), Some(&Action::Quit));
    }

    #[test]
    fn selected_feature_is_marked() {
        let mut focused = scene(
            HierarchyLevel::Neighborhood,
            MapControls {
                can_go_back: true,
                can_reset: true,
            },
        );
        focused.selected = Some("Pankow".to_string());
        assert_eq!(actions(&focused)[0].0, "Pankow · 760€ (selected)");
    }
}
