//! The drill-down navigation state machine.
//!
//! Selecting a region descends to its districts, selecting a district
//! descends to its neighborhoods, and selecting a neighborhood only focuses
//! it without descending further. Every descent records a
//! [`NavigationFrame`] so that [`NavigationState::go_back`] can unwind one
//! level at a time.

use rent_map_region_models::{HierarchyLevel, NavigationFrame};
use serde::{Deserialize, Serialize};

/// Current view level, selection, and history of the map.
///
/// Invariants:
/// - `selected_subregion_name` is only set at [`HierarchyLevel::Neighborhood`]
/// - `history` never holds two consecutive identical frames
/// - `history` is empty at [`HierarchyLevel::Region`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    current_level: HierarchyLevel,
    selected_region_name: Option<String>,
    selected_subregion_name: Option<String>,
    history: Vec<NavigationFrame>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::root()
    }
}

impl NavigationState {
    /// The top of the hierarchy with nothing selected.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            current_level: HierarchyLevel::Region,
            selected_region_name: None,
            selected_subregion_name: None,
            history: Vec::new(),
        }
    }

    /// The district view of `city`, as if it had been selected from the
    /// root.
    #[must_use]
    pub fn at_default_city(city: &str) -> Self {
        let mut state = Self::root();
        state.reset_to_default_city(city);
        state
    }

    #[must_use]
    pub const fn current_level(&self) -> HierarchyLevel {
        self.current_level
    }

    /// Name of the selected region: the city at the district level, the
    /// district at the neighborhood level.
    #[must_use]
    pub fn selected_region_name(&self) -> Option<&str> {
        self.selected_region_name.as_deref()
    }

    /// The focused neighborhood, if any.
    #[must_use]
    pub fn selected_subregion_name(&self) -> Option<&str> {
        self.selected_subregion_name.as_deref()
    }

    #[must_use]
    pub fn history(&self) -> &[NavigationFrame] {
        &self.history
    }

    /// The region (city) the current view belongs to.
    #[must_use]
    pub fn active_region(&self) -> Option<&str> {
        self.history
            .iter()
            .find(|frame| frame.level == HierarchyLevel::Region)
            .map(|frame| frame.name.as_str())
    }

    /// Whether this is the entry state produced by
    /// [`Self::reset_to_default_city`] for `city`.
    #[must_use]
    pub fn is_default_city(&self, city: &str) -> bool {
        self.current_level == HierarchyLevel::District
            && self.selected_region_name.as_deref() == Some(city)
            && self.selected_subregion_name.is_none()
            && self.history == [NavigationFrame::new(HierarchyLevel::Region, city)]
    }

    /// Selects a region and shows its districts.
    ///
    /// The region does not need to have district data; an unsupported city
    /// yields an empty view, not an error.
    pub fn select_region(&mut self, name: &str) {
        self.descend(HierarchyLevel::Region, name);
    }

    /// Selects a district and shows its neighborhoods.
    pub fn select_district(&mut self, name: &str) {
        self.descend(HierarchyLevel::District, name);
    }

    /// Focuses a neighborhood without descending or recording history.
    ///
    /// Re-selecting the focused neighborhood leaves it focused. Below the
    /// neighborhood level there is nothing to focus and the call is ignored;
    /// returns whether the focus was applied.
    pub fn select_neighborhood(&mut self, name: &str) -> bool {
        if self.current_level != HierarchyLevel::Neighborhood {
            log::debug!(
                "Ignoring neighborhood {name:?} selected at {} level",
                self.current_level
            );
            return false;
        }

        log::debug!("Focusing neighborhood {name:?}");
        self.selected_subregion_name = Some(name.to_string());
        true
    }

    /// Unwinds one level.
    ///
    /// Pops the last frame and returns to the level it was recorded at,
    /// with the frame below it as the selection. Any neighborhood focus is
    /// dropped. Returns `false` if there was nothing to pop, in which case
    /// the state is reset to the root.
    pub fn go_back(&mut self) -> bool {
        self.selected_subregion_name = None;

        let Some(popped) = self.history.pop() else {
            self.current_level = HierarchyLevel::Region;
            self.selected_region_name = None;
            return false;
        };

        self.current_level = popped.level;
        self.selected_region_name = self.history.last().map(|frame| frame.name.clone());
        if self.selected_region_name.is_none() {
            self.current_level = HierarchyLevel::Region;
        }

        log::debug!(
            "Back from {} {:?} to {} {:?}",
            popped.level,
            popped.name,
            self.current_level,
            self.selected_region_name
        );
        true
    }

    /// Clears all history and selection.
    pub fn reset_to_root(&mut self) {
        log::debug!("Resetting to root");
        *self = Self::root();
    }

    /// Jumps straight to the district view of `city` with a single history
    /// frame.
    pub fn reset_to_default_city(&mut self, city: &str) {
        log::debug!("Resetting to default city {city:?}");
        self.current_level = HierarchyLevel::District;
        self.selected_region_name = Some(city.to_string());
        self.selected_subregion_name = None;
        self.history = vec![NavigationFrame::new(HierarchyLevel::Region, city)];
    }

    /// Records a selection made at `level` and moves one level down.
    ///
    /// Frames at `level` or finer are dropped first, so selecting from a
    /// deeper view replaces that part of the history instead of stacking
    /// unrelated frames.
    fn descend(&mut self, level: HierarchyLevel, name: &str) {
        let next = level.finer().unwrap_or(level);

        self.history.retain(|frame| frame.level < level);
        let frame = NavigationFrame::new(level, name);
        if self.history.last() != Some(&frame) {
            self.history.push(frame);
        }

        self.current_level = next;
        self.selected_region_name = Some(name.to_string());
        self.selected_subregion_name = None;

        log::debug!("Selected {level} {name:?}, now at {next} level");
    }
}
