//! The reactive marker-editing core
//!
//! [`MarkerEditor`] processes one event at a time and finishes the whole
//! state update before returning. It owns the store and the mode controller
//! and talks to the map surface only through [`MapSurface`].

use crate::{
    core::{
        config::EditorConfig,
        geo::LatLng,
        mode::{Mode, ModeController},
    },
    data::store::FeatureStore,
    input::events::{self, Invocation, PendingClick, SurfaceEvent},
    traits::MapSurface,
    Result,
};
use serde_json::Value;

pub struct MarkerEditor<S: MapSurface> {
    config: EditorConfig,
    store: FeatureStore,
    controller: ModeController,
    surface: S,
}

impl<S: MapSurface> MarkerEditor<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, EditorConfig::default())
    }

    pub fn with_config(surface: S, config: EditorConfig) -> Self {
        Self::with_store(surface, config, FeatureStore::new())
    }

    /// Starts from an existing store instead of an empty one
    pub fn with_store(surface: S, config: EditorConfig, store: FeatureStore) -> Self {
        Self {
            config,
            store,
            controller: ModeController::new(),
            surface,
        }
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &ModeController {
        &self.controller
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Surface and store together, for a render pass
    pub fn surface_and_store(&mut self) -> (&mut S, &FeatureStore) {
        (&mut self.surface, &self.store)
    }

    pub fn into_parts(self) -> (S, FeatureStore) {
        (self.surface, self.store)
    }

    pub fn request_add_marker(&mut self, invocation: Invocation) {
        self.controller
            .request_add_marker(invocation, &mut self.surface);
    }

    pub fn request_clear_all(&mut self, invocation: Invocation) {
        self.controller
            .request_clear_all(invocation, &mut self.store, &mut self.surface);
    }

    pub fn set_delete_mode(&mut self, enabled: bool) {
        self.controller.set_delete_mode(enabled, &mut self.surface);
    }

    /// The surface placed a marker. Returns whether it was stored.
    pub fn on_marker_placed(&mut self, lat_lng: LatLng) -> bool {
        self.controller.marker_placed();
        match self.accept(lat_lng) {
            Some(lat_lng) => {
                self.store.add(lat_lng);
                true
            }
            None => false,
        }
    }

    pub fn on_marker_placed_raw(&mut self, payload: &Value) -> bool {
        self.controller.marker_placed();
        match self.parse(payload) {
            Some(lat_lng) => {
                self.store.add(lat_lng);
                true
            }
            None => false,
        }
    }

    /// A click on a drawn marker reached the core. It is applied whether or
    /// not delete mode is still on. Returns how many markers were removed.
    pub fn on_marker_clicked(&mut self, lat_lng: LatLng) -> usize {
        self.apply_click(PendingClick::new(lat_lng))
    }

    pub fn on_marker_clicked_raw(&mut self, payload: &Value) -> usize {
        match self.parse(payload) {
            Some(lat_lng) => self.apply_click(PendingClick::new(lat_lng)),
            None => 0,
        }
    }

    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::MarkerPlaced { lat_lng } => {
                self.on_marker_placed(lat_lng);
            }
            SurfaceEvent::MarkerClicked { lat_lng } => {
                self.on_marker_clicked(lat_lng);
            }
        }
    }

    /// Applies every click queued by the pointer bridge, in click order.
    /// Returns the number of clicks processed.
    pub fn process_pending_clicks(&mut self) -> usize {
        let clicks = self.controller.bridge().drain();
        let count = clicks.len();
        for click in clicks {
            self.apply_click(click);
        }
        count
    }

    pub fn to_geojson(&self) -> Result<String> {
        self.store.to_geojson()
    }

    fn apply_click(&mut self, click: PendingClick) -> usize {
        let Some(lat_lng) = self.accept(click.lat_lng) else {
            return 0;
        };
        if !self.controller.is_deleting() {
            log::debug!(
                "click at ({}, {}) arrived after delete mode was turned off",
                lat_lng.lat,
                lat_lng.lng
            );
        }
        log::trace!(
            "click at ({}, {}) waited {:?}",
            lat_lng.lat,
            lat_lng.lng,
            click.received_at.elapsed()
        );
        self.store
            .remove_by_coordinate(lat_lng, self.config.removal_policy)
    }

    fn accept(&self, lat_lng: LatLng) -> Option<LatLng> {
        events::validate(lat_lng, self.config.reject_out_of_range)
            .map_err(|e| log::warn!("discarding marker event: {}", e))
            .ok()
    }

    fn parse(&self, payload: &Value) -> Option<LatLng> {
        events::parse_lat_lng(payload, self.config.reject_out_of_range)
            .map_err(|e| log::warn!("discarding marker event: {}", e))
            .ok()
    }
}
