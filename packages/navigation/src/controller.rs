//! The single owner of navigation state and the rendering surface.
//!
//! Every user action goes through a [`MapController`] method. Each one
//! updates the [`NavigationState`], rebuilds the [`Scene`] for the new
//! active feature set, and issues at most one camera command.

use rent_map_region::index::FeatureIndex;
use rent_map_region::registry::find_city;
use rent_map_region::{RegionDataset, RegionFeature};
use rent_map_region_models::{CityDefinition, HierarchyLevel, LatLng};
use rent_map_rent::RentLookup;

use crate::scene::{build_scene, city_markers};
use crate::viewport::without_animation;
use crate::{CameraCommand, NavigationState, PointerEvent, RenderingSurface, Scene, ViewportController};

/// Drives a [`RenderingSurface`] from pointer events and control actions.
pub struct MapController<S: RenderingSurface> {
    state: NavigationState,
    dataset: RegionDataset,
    rents: RentLookup,
    cities: Vec<CityDefinition>,
    default_city: String,
    viewport: ViewportController,
    surface: S,
    hovered: Option<String>,
}

impl<S: RenderingSurface> MapController<S> {
    /// Creates a controller at the district view of `default_city`.
    ///
    /// A registered city may be given by name or id in any case; it is
    /// stored under its display name, which keys its districts. Nothing is
    /// drawn until [`Self::start`] is called.
    #[must_use]
    pub fn new(
        dataset: RegionDataset,
        rents: RentLookup,
        cities: Vec<CityDefinition>,
        default_city: &str,
        viewport: ViewportController,
        surface: S,
    ) -> Self {
        let default_city = find_city(&cities, default_city).map_or_else(
            || {
                log::warn!("Default city {default_city:?} is not registered");
                default_city.to_string()
            },
            |city| city.name.clone(),
        );
        Self {
            state: NavigationState::at_default_city(&default_city),
            dataset,
            rents,
            cities,
            default_city,
            viewport,
            surface,
            hovered: None,
        }
    }

    /// Draws the initial scene and jumps the camera there without
    /// animating.
    pub fn start(&mut self) {
        let camera = self.frame_state().map(without_animation);
        self.refresh(camera);
    }

    #[must_use]
    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Name of the feature under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// The features shown for the current state.
    #[must_use]
    pub fn active_features(&self) -> Vec<&RegionFeature> {
        self.dataset
            .features_for(self.state.current_level(), self.state.selected_region_name())
    }

    /// The scene for the current state.
    #[must_use]
    pub fn scene(&self) -> Scene {
        build_scene(
            &self.state,
            &self.active_features(),
            &self.rents,
            &self.cities,
            &self.default_city,
        )
    }

    /// Dispatches a pointer event. Returns whether the map changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Click { name } => self.click_feature(&name),
            PointerEvent::ClickAt { position } => self.click_at(position),
            PointerEvent::Hover { name } => {
                self.surface.highlight(Some(&name));
                self.hovered = Some(name);
                false
            }
            PointerEvent::HoverEnd => {
                self.hovered = None;
                self.surface.highlight(None);
                false
            }
        }
    }

    /// Selects the active feature named `name`, or the city marker of that
    /// name if no feature matches.
    ///
    /// Returns `false` (and leaves the map untouched) if nothing shown has
    /// that name.
    pub fn click_feature(&mut self, name: &str) -> bool {
        let hit = self
            .active_features()
            .into_iter()
            .find(|feature| feature.name() == name)
            .map(|feature| (feature.level(), self.viewport.fit_feature(feature)));

        match hit {
            Some((HierarchyLevel::Region, camera)) => self.enter_region(name, camera),
            Some((HierarchyLevel::District, camera)) => {
                self.state.select_district(name);
                self.refresh(camera);
                true
            }
            Some((HierarchyLevel::Neighborhood, camera)) => {
                if !self.state.select_neighborhood(name) {
                    return false;
                }
                self.refresh(camera);
                true
            }
            None => {
                let marker_shown = find_city(&self.cities, name).is_some_and(|city| {
                    city_markers(&self.state, &self.cities)
                        .iter()
                        .any(|marker| marker.name == city.name)
                });
                if marker_shown {
                    return self.select_region(name);
                }
                log::debug!("Click on {name:?} hit nothing at {} level", self.state.current_level());
                false
            }
        }
    }

    /// Selects the active feature containing `position`.
    pub fn click_at(&mut self, position: LatLng) -> bool {
        let hit = FeatureIndex::new(self.active_features())
            .feature_at(position.lon, position.lat)
            .map(|feature| feature.name().to_string());

        match hit {
            Some(name) => self.click_feature(&name),
            None => {
                log::debug!("Click at {position:?} hit no feature");
                false
            }
        }
    }

    /// Selects a region (usually a registered city) and shows its
    /// districts.
    ///
    /// Registered cities are matched by name or id and framed with their
    /// pinned view. Unregistered names still transition, to an empty view.
    pub fn select_region(&mut self, name: &str) -> bool {
        self.enter_region(name, None)
    }

    /// Selects a region, framing it with `fallback` when neither a pinned
    /// city view nor its districts give a camera position.
    fn enter_region(&mut self, name: &str, fallback: Option<CameraCommand>) -> bool {
        let name = find_city(&self.cities, name).map_or_else(|| name.to_string(), |city| city.name.clone());
        self.state.select_region(&name);
        let camera = self.frame_state().or(fallback);
        self.refresh(camera);
        true
    }

    /// Goes back one level. Returns `false` if already at the root.
    pub fn back(&mut self) -> bool {
        if !self.state.go_back() {
            log::debug!("Already at the root, nothing to go back to");
            return false;
        }
        let camera = self.frame_state();
        self.refresh(camera);
        true
    }

    pub fn reset_to_root(&mut self) {
        self.state.reset_to_root();
        let camera = self.frame_state();
        self.refresh(camera);
    }

    pub fn reset_to_default_city(&mut self) {
        self.state.reset_to_default_city(&self.default_city);
        let camera = self.frame_state();
        self.refresh(camera);
    }

    fn frame_state(&self) -> Option<CameraCommand> {
        self.viewport
            .frame_state(&self.state, &self.cities, &self.active_features())
    }

    /// Renders the current scene and applies `camera`, if any.
    fn refresh(&mut self, camera: Option<CameraCommand>) {
        let scene = self.scene();
        log::debug!(
            "Rendering {} {} features for {:?}",
            scene.features.len(),
            scene.level,
            scene.selected_region
        );
        self.surface.render(&scene);

        match camera {
            Some(command) => {
                log::debug!("Camera: {command:?}");
                self.surface.apply_camera(&command);
            }
            None => log::warn!(
                "No camera command for {} {:?}",
                self.state.current_level(),
                self.state.selected_region_name()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use geo::{LineString, MultiPolygon, Polygon};
    use rent_map_region::Boundary;
    use rent_map_region::registry::all_cities;
    use rent_map_region_models::NavigationFrame;
    use rent_map_rent_models::RentRecord;

    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        scenes: Vec<Scene>,
        cameras: Vec<CameraCommand>,
        highlights: Vec<Option<String>>,
    }

    impl RenderingSurface for RecordingSurface {
        fn render(&mut self, scene: &Scene) {
            self.scenes.push(scene.clone());
        }

        fn apply_camera(&mut self, command: &CameraCommand) {
            self.cameras.push(*command);
        }

        fn highlight(&mut self, name: Option<&str>) {
            self.highlights.push(name.map(ToString::to_string));
        }
    }

    fn boundary(name: &str, parent: &str, west: f64, south: f64, size: f64) -> Boundary {
        Boundary {
            name: name.to_string(),
            parent_name: Some(parent.to_string()),
            geometry: MultiPolygon(vec![Polygon::new(
                LineString::from(vec![
                    (west, south),
                    (west + size, south),
                    (west + size, south + size),
                    (west, south + size),
                    (west, south),
                ]),
                vec![],
            )]),
        }
    }

    fn berlin() -> (RegionDataset, RentLookup) {
        let districts = vec![
            RegionFeature::District(boundary("Pankow", "Berlin", 13.3, 52.5, 0.3)),
            RegionFeature::District(boundary("Mitte", "Berlin", 13.0, 52.5, 0.3)),
        ];
        let neighborhoods = vec![
            RegionFeature::Neighborhood(boundary("Buch", "Pankow", 13.4, 52.6, 0.1)),
            RegionFeature::Neighborhood(boundary("Moabit", "Mitte", 13.1, 52.6, 0.1)),
        ];
        let dataset = RegionDataset::new(
            vec![],
            BTreeMap::from([("Berlin".to_string(), districts)]),
            neighborhoods,
        );
        let rents = RentLookup::new(RentRecord {
            city_average: BTreeMap::from([("berlin".to_string(), 820.0)]),
            district_average: BTreeMap::from([("pankow".to_string(), 760.0)]),
            neighborhood_rent: BTreeMap::from([(
                "pankow".to_string(),
                BTreeMap::from([("Buch".to_string(), 690.0)]),
            )]),
        });

        (dataset, rents)
    }

    fn controller_for(
        dataset: RegionDataset,
        rents: RentLookup,
        default_city: &str,
    ) -> MapController<RecordingSurface> {
        MapController::new(
            dataset,
            rents,
            all_cities(),
            default_city,
            ViewportController::default(),
            RecordingSurface::default(),
        )
    }

    fn controller() -> MapController<RecordingSurface> {
        let (dataset, rents) = berlin();
        controller_for(dataset, rents, "Berlin")
    }

    fn names(scene: &Scene) -> Vec<&str> {
        scene.features.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn start_draws_default_city_without_animation() {
        let mut map = controller();
        map.start();

        let surface = map.surface();
        assert_eq!(surface.scenes.len(), 1);
        assert_eq!(names(&surface.scenes[0]), vec!["Pankow", "Mitte"]);
        assert_eq!(
            surface.cameras,
            vec![CameraCommand::SetView {
                center: LatLng::new(52.52, 13.405),
                zoom: 11,
                animate: false,
            }]
        );
        assert!(!surface.scenes[0].controls.can_reset);
    }

    #[test]
    fn drill_down_and_back() {
        let mut map = controller();
        map.start();

        assert!(map.click_feature("Pankow"));
        assert_eq!(map.state().current_level(), HierarchyLevel::Neighborhood);
        assert_eq!(names(map.surface().scenes.last().unwrap()), vec!["Buch"]);
        assert!(matches!(
            map.surface().cameras.last(),
            Some(CameraCommand::FitBounds { padding, max_zoom: 13, .. }) if (*padding + 30.0).abs() < f64::EPSILON
        ));

        assert!(map.click_feature("Buch"));
        assert_eq!(map.state().selected_subregion_name(), Some("Buch"));
        assert_eq!(map.state().history().len(), 2);
        assert!(matches!(
            map.surface().cameras.last(),
            Some(CameraCommand::FitBounds { max_zoom: 15, .. })
        ));

        assert!(map.back());
        assert_eq!(
            map.state().history(),
            [NavigationFrame::new(HierarchyLevel::Region, "Berlin")]
        );
        assert_eq!(map.state().selected_subregion_name(), None);
        assert_eq!(
            map.surface().cameras.last(),
            Some(&CameraCommand::SetView {
                center: LatLng::new(52.52, 13.405),
                zoom: 11,
                animate: true,
            })
        );

        assert!(map.back());
        assert_eq!(map.state(), &NavigationState::root());
        assert!(map.surface().scenes.last().unwrap().features.is_empty());
        assert!(!map.back());
    }

    #[test]
    fn every_action_renders_once_with_at_most_one_camera() {
        let mut map = controller();
        map.start();
        map.click_feature("Pankow");
        map.click_feature("Buch");
        map.back();
        map.reset_to_root();
        map.reset_to_default_city();

        assert_eq!(map.surface().scenes.len(), 6);
        assert!(map.surface().cameras.len() <= 6);
    }

    #[test]
    fn click_on_unknown_name_is_ignored() {
        let mut map = controller();
        map.start();
        assert!(!map.click_feature("Spandau"));
        assert_eq!(map.surface().scenes.len(), 1);
        assert!(map.state().is_default_city("Berlin"));
    }

    #[test]
    fn click_at_position_resolves_feature() {
        let mut map = controller();
        map.start();

        assert!(map.click_at(LatLng::new(52.6, 13.1)));
        assert_eq!(map.state().selected_region_name(), Some("Mitte"));

        assert!(!map.click_at(LatLng::new(48.1, 11.5)));
        assert_eq!(map.state().selected_region_name(), Some("Mitte"));
    }

    #[test]
    fn city_marker_click_selects_region() {
        let mut map = controller();
        map.reset_to_root();
        assert!(map.click_feature("munich"));
        assert_eq!(map.state().current_level(), HierarchyLevel::District);
        assert_eq!(map.state().selected_region_name(), Some("Munich"));
        assert!(map.surface().scenes.last().unwrap().features.is_empty());
        assert_eq!(
            map.surface().cameras.last(),
            Some(&CameraCommand::SetView {
                center: LatLng::new(48.1351, 11.582),
                zoom: 11,
                animate: true,
            })
        );
    }

    #[test]
    fn markers_are_not_clickable_inside_city_state() {
        let mut map = controller();
        map.start();
        assert!(!map.click_feature("Hamburg"));
        assert!(map.state().is_default_city("Berlin"));
    }

    #[test]
    fn district_without_neighborhoods_still_transitions() {
        let mut map = controller();
        map.start();
        assert!(map.click_feature("Mitte"));
        assert!(map.click_feature("Moabit"));
        assert_eq!(map.state().selected_subregion_name(), Some("Moabit"));
        let scene = map.surface().scenes.last().unwrap();
        assert_eq!(scene.features[0].tooltip, "Moabit");
        assert_eq!(scene.info, None);
    }

    #[test]
    fn hover_highlights_without_rendering() {
        let mut map = controller();
        map.start();
        assert!(!map.handle_pointer(PointerEvent::Hover {
            name: "Pankow".to_string(),
        }));
        assert_eq!(map.hovered(), Some("Pankow"));
        assert!(!map.handle_pointer(PointerEvent::HoverEnd));
        assert_eq!(map.hovered(), None);

        let surface = map.surface();
        assert_eq!(surface.highlights, vec![Some("Pankow".to_string()), None]);
        assert_eq!(surface.scenes.len(), 1);
    }

    #[test]
    fn reset_to_default_city_restores_entry_state() {
        let mut map = controller();
        map.start();
        map.click_feature("Pankow");
        map.click_feature("Buch");
        map.reset_to_default_city();
        assert!(map.state().is_default_city("Berlin"));

        let Some(CameraCommand::SetView { zoom, .. }) = map.surface().cameras.last() else {
            panic!("expected the pinned city view");
        };
        assert_eq!(*zoom, 11);
    }

    #[test]
    fn default_city_is_matched_by_id() {
        let (dataset, rents) = berlin();
        let mut map = controller_for(dataset, rents, "berlin");
        map.start();

        assert!(map.state().is_default_city("Berlin"));
        assert_eq!(names(&map.surface().scenes[0]), vec!["Pankow", "Mitte"]);

        map.click_feature("Pankow");
        map.reset_to_default_city();
        assert!(map.state().is_default_city("Berlin"));
        assert_eq!(names(map.surface().scenes.last().unwrap()), vec!["Pankow", "Mitte"]);
        assert!(!map.surface().scenes.last().unwrap().controls.can_reset);
    }

    #[test]
    fn clicking_region_without_districts_fits_its_bounds() {
        let regions = vec![RegionFeature::Region(boundary("Bayern", "Deutschland", 10.0, 47.5, 2.0))];
        let dataset = RegionDataset::new(regions, BTreeMap::new(), vec![]);
        let mut map = controller_for(dataset, RentLookup::default(), "Berlin");
        map.reset_to_root();
        let cameras_before = map.surface().cameras.len();

        assert!(map.click_feature("Bayern"));
        assert_eq!(map.state().current_level(), HierarchyLevel::District);
        assert_eq!(map.state().selected_region_name(), Some("Bayern"));
        assert_eq!(map.surface().cameras.len(), cameras_before + 1);
        assert!(matches!(
            map.surface().cameras.last(),
            Some(CameraCommand::FitBounds { max_zoom: 10, animate: true, .. })
        ));
    }

    #[test]
    fn city_marker_click_accepts_id() {
        let mut map = controller();
        map.reset_to_root();
        assert!(map.click_feature("duesseldorf"));
        assert_eq!(map.state().selected_region_name(), Some("Düsseldorf"));
    }
}
