//! Which marker interaction is active
//!
//! [`ModeController`] turns the three controls into surface commands: add
//! arms one-shot drawing, clear empties surface and store, and the delete
//! switch arms or disarms the pointer bridge.

use crate::{
    data::store::FeatureStore,
    input::{bridge::PointerEventBridge, events::Invocation},
    traits::MapSurface,
};
use serde::{Deserialize, Serialize};

/// Interaction mode as seen by the controls.
///
/// Adding is one-shot and ends when the surface reports a placed marker;
/// deleting is a switch that stays on until turned off. Both may be armed at
/// once since they react to different pointer targets; [`ModeController::mode`]
/// reports `DeletingMarkers` in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Idle,
    AddingMarker,
    DeletingMarkers,
}

/// Owns the current mode and turns control presses into surface commands
pub struct ModeController {
    adding: bool,
    deleting: bool,
    bridge: PointerEventBridge,
    last_add: Option<Invocation>,
    last_clear: Option<Invocation>,
}

impl ModeController {
    pub fn new() -> Self {
        Self {
            adding: false,
            deleting: false,
            bridge: PointerEventBridge::new(),
            last_add: None,
            last_clear: None,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.deleting {
            Mode::DeletingMarkers
        } else if self.adding {
            Mode::AddingMarker
        } else {
            Mode::Idle
        }
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn bridge(&self) -> &PointerEventBridge {
        &self.bridge
    }

    pub fn last_add_invocation(&self) -> Option<Invocation> {
        self.last_add
    }

    pub fn last_clear_invocation(&self) -> Option<Invocation> {
        self.last_clear
    }

    /// "Add marker" pressed. Every press re-arms the drawing tool, even a
    /// repeat of an invocation already seen.
    pub fn request_add_marker(&mut self, invocation: Invocation, surface: &mut dyn MapSurface) {
        log::info!("add marker requested (#{})", invocation.0);
        self.last_add = Some(invocation);
        self.adding = true;
        surface.arm_marker_drawing();
    }

    /// "Clear all markers" pressed. Works in any mode and leaves delete mode as it was.
    pub fn request_clear_all(
        &mut self,
        invocation: Invocation,
        store: &mut FeatureStore,
        surface: &mut dyn MapSurface,
    ) {
        log::info!(
            "clear all requested (#{}), {} marker(s)",
            invocation.0,
            store.len()
        );
        self.last_clear = Some(invocation);
        surface.trigger_clear_all();
        store.clear_all();
    }

    /// Delete-mode switch changed
    pub fn set_delete_mode(&mut self, enabled: bool, surface: &mut dyn MapSurface) {
        if enabled {
            let listener = self.bridge.arm();
            surface.set_click_listener(Some(listener));
        } else {
            self.bridge.disarm();
            surface.set_click_listener(None);
        }
        if self.deleting != enabled {
            log::info!("delete mode {}", if enabled { "on" } else { "off" });
        }
        self.deleting = enabled;
    }

    /// The surface finished a single-point drawing and dropped its tool
    pub fn marker_placed(&mut self) {
        self.adding = false;
    }
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::bridge::ClickListener;

    #[derive(Default)]
    struct CountingSurface {
        armed_drawings: usize,
        clears: usize,
        listener: Option<ClickListener>,
    }

    impl MapSurface for CountingSurface {
        fn arm_marker_drawing(&mut self) {
            self.armed_drawings += 1;
        }

        fn trigger_clear_all(&mut self) {
            self.clears += 1;
        }

        fn set_click_listener(&mut self, listener: Option<ClickListener>) {
            self.listener = listener;
        }
    }

    #[test]
    fn test_starts_idle() {
        let controller = ModeController::new();
        assert_eq!(controller.mode(), Mode::Idle);
        assert!(!controller.bridge().is_armed());
    }

    #[test]
    fn test_add_is_one_shot() {
        let mut controller = ModeController::new();
        let mut surface = CountingSurface::default();

        controller.request_add_marker(Invocation(1), &mut surface);
        assert_eq!(controller.mode(), Mode::AddingMarker);

        controller.marker_placed();
        assert_eq!(controller.mode(), Mode::Idle);
        assert_eq!(surface.armed_drawings, 1);
    }

    #[test]
    fn test_repeated_invocation_rearms() {
        let mut controller = ModeController::new();
        let mut surface = CountingSurface::default();

        controller.request_add_marker(Invocation(3), &mut surface);
        controller.request_add_marker(Invocation(3), &mut surface);

        assert_eq!(surface.armed_drawings, 2);
        assert_eq!(controller.last_add_invocation(), Some(Invocation(3)));
    }

    #[test]
    fn test_delete_mode_toggle_sets_listener() {
        let mut controller = ModeController::new();
        let mut surface = CountingSurface::default();

        controller.set_delete_mode(true, &mut surface);
        assert_eq!(controller.mode(), Mode::DeletingMarkers);
        assert!(surface.listener.as_ref().is_some_and(|l| l.is_armed()));

        controller.set_delete_mode(false, &mut surface);
        assert_eq!(controller.mode(), Mode::Idle);
        assert!(surface.listener.is_none());
        assert!(!controller.bridge().is_armed());
    }

    #[test]
    fn test_add_and_delete_may_both_be_armed() {
        let mut controller = ModeController::new();
        let mut surface = CountingSurface::default();

        controller.set_delete_mode(true, &mut surface);
        controller.request_add_marker(Invocation(1), &mut surface);

        assert!(controller.is_adding());
        assert!(controller.is_deleting());
        assert_eq!(controller.mode(), Mode::DeletingMarkers);

        controller.marker_placed();
        assert!(controller.is_deleting());
    }

    #[test]
    fn test_clear_keeps_delete_mode() {
        let mut controller = ModeController::new();
        let mut surface = CountingSurface::default();
        let mut store = FeatureStore::new();
        store.add(crate::core::geo::LatLng::new(1.0, 1.0));

        controller.set_delete_mode(true, &mut surface);
        controller.request_clear_all(Invocation(1), &mut store, &mut surface);

        assert!(store.is_empty());
        assert_eq!(surface.clears, 1);
        assert!(controller.is_deleting());
        assert!(controller.bridge().is_armed());
    }
}
