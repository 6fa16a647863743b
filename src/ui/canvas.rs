use crate::{
    core::{
        constants::{
            DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_ZOOM, MARKER_HIT_RADIUS, MARKER_RADIUS,
            MAX_ZOOM, MIN_ZOOM,
        },
        geo::{self, LatLng, Point},
    },
    data::store::FeatureStore,
    input::{bridge::ClickListener, events::SurfaceEvent},
    traits::{MapSurface, RenderedMarkers},
};
use egui::{Align2, Color32, CursorIcon, FontId, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

/// Colours and sizes for the marker canvas
#[derive(Debug, Clone)]
pub struct CanvasStyle {
    pub background_color: Color32,
    pub marker_color: Color32,
    pub marker_border: Stroke,
    pub marker_radius: f32,
    pub label_color: Color32,
    pub label_font: FontId,
    pub hint_color: Color32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background_color: Color32::from_rgb(230, 230, 230),
            marker_color: Color32::from_rgb(51, 136, 255),
            marker_border: Stroke::new(2.0, Color32::WHITE),
            marker_radius: MARKER_RADIUS,
            label_color: Color32::from_gray(30),
            label_font: FontId::proportional(13.0),
            hint_color: Color32::from_gray(90),
        }
    }
}

/// egui map surface for the marker editor
///
/// Draws the store's markers on a Web Mercator plane (no tiles) with a
/// numbered label beside each one. Supports single-point marker drawing,
/// delete-mode clicks, drag to pan and scroll to zoom.
pub struct MarkerCanvas {
    center: LatLng,
    zoom: f64,
    style: CanvasStyle,
    drawn: Vec<LatLng>,
    drawn_revision: Option<u64>,
    drawing_armed: bool,
    listener: Option<ClickListener>,
    placed: Vec<SurfaceEvent>,
}

impl MarkerCanvas {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            style: CanvasStyle::default(),
            drawn: Vec::new(),
            drawn_revision: None,
            drawing_armed: false,
            listener: None,
            placed: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: CanvasStyle) -> Self {
        self.style = style;
        self
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn is_drawing_armed(&self) -> bool {
        self.drawing_armed
    }

    pub fn has_click_listener(&self) -> bool {
        self.listener.is_some()
    }

    /// Markers currently drawn, in label order
    pub fn drawn(&self) -> &[LatLng] {
        &self.drawn
    }

    /// Placement events since the last call
    pub fn take_events(&mut self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut self.placed)
    }

    /// Redraws from the store when it changed since the last sync
    pub fn sync(&mut self, store: &FeatureStore) {
        if self.drawn_revision != Some(store.revision()) {
            self.drawn = store.markers();
            self.drawn_revision = Some(store.revision());
        }
    }

    /// Lays out, handles input for, and paints the canvas
    pub fn show(&mut self, ui: &mut Ui, store: &FeatureStore) -> Response {
        let desired_size = ui.available_size();
        let (rect, mut response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        self.sync(store);

        if response.hovered() {
            let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.1 {
                self.zoom = (self.zoom + scroll_delta as f64 * 0.01).clamp(MIN_ZOOM, MAX_ZOOM);
                response.mark_changed();
            }

            if self.drawing_armed {
                ui.ctx().set_cursor_icon(CursorIcon::Crosshair);
            } else if self.listener.is_some()
                && response
                    .hover_pos()
                    .and_then(|pos| self.hit_test(rect, pos))
                    .is_some()
            {
                ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            }
        }

        if response.dragged() {
            let drag_delta = response.drag_delta();
            if drag_delta.length_sq() > 0.5 {
                self.pan_by(drag_delta);
                response.mark_changed();
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if self.handle_click(rect, pos) {
                    response.mark_changed();
                }
            }
        }

        self.paint(ui, rect);
        response
    }

    /// Routes a click at screen position `pos`. Returns whether it did anything.
    pub fn handle_click(&mut self, rect: Rect, pos: Pos2) -> bool {
        if let Some(hit) = self.hit_test(rect, pos) {
            if let Some(listener) = self.listener.clone() {
                return listener.on_marker_clicked(self, hit);
            }
        }

        if self.drawing_armed {
            let lat_lng = self.screen_to_lat_lng(rect, pos);
            // drawn on the next sync, once the store has accepted it
            self.drawing_armed = false;
            self.placed.push(SurfaceEvent::MarkerPlaced { lat_lng });
            log::debug!("marker drawn at ({}, {})", lat_lng.lat, lat_lng.lng);
            return true;
        }

        false
    }

    /// Topmost drawn marker within hit range of `pos`
    pub fn hit_test(&self, rect: Rect, pos: Pos2) -> Option<LatLng> {
        self.drawn
            .iter()
            .rev()
            .find(|m| {
                let offset = self.lat_lng_to_screen(rect, m) - pos;
                (offset.length() as f64) <= MARKER_HIT_RADIUS
            })
            .copied()
    }

    pub fn lat_lng_to_screen(&self, rect: Rect, lat_lng: &LatLng) -> Pos2 {
        let point = geo::project(lat_lng, self.zoom);
        let center = geo::project(&self.center, self.zoom);
        rect.center() + Vec2::new((point.x - center.x) as f32, (point.y - center.y) as f32)
    }

    pub fn screen_to_lat_lng(&self, rect: Rect, pos: Pos2) -> LatLng {
        let center = geo::project(&self.center, self.zoom);
        let offset = pos - rect.center();
        geo::unproject(
            &center.add(&Point::new(offset.x as f64, offset.y as f64)),
            self.zoom,
        )
    }

    fn pan_by(&mut self, drag_delta: Vec2) {
        let center = geo::project(&self.center, self.zoom);
        let moved = center.subtract(&Point::new(drag_delta.x as f64, drag_delta.y as f64));
        self.center = geo::unproject(&moved, self.zoom);
    }

    fn paint(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background_color);

        for (index, marker) in self.drawn.iter().enumerate() {
            let pos = self.lat_lng_to_screen(rect, marker);
            if !rect.expand(self.style.marker_radius).contains(pos) {
                continue;
            }
            painter.circle_filled(pos, self.style.marker_radius, self.style.marker_color);
            painter.circle_stroke(pos, self.style.marker_radius, self.style.marker_border);
            painter.text(
                pos + Vec2::new(self.style.marker_radius + 2.0, -self.style.marker_radius),
                Align2::LEFT_BOTTOM,
                (index + 1).to_string(),
                self.style.label_font.clone(),
                self.style.label_color,
            );
        }

        if self.drawing_armed {
            painter.text(
                rect.left_top() + Vec2::new(8.0, 8.0),
                Align2::LEFT_TOP,
                "Click on the map to place a marker",
                FontId::proportional(12.0),
                self.style.hint_color,
            );
        }
    }
}

impl RenderedMarkers for MarkerCanvas {
    fn remove_rendered(&mut self, lat_lng: &LatLng) -> bool {
        match self.drawn.iter().position(|m| m == lat_lng) {
            Some(index) => {
                self.drawn.remove(index);
                true
            }
            None => false,
        }
    }
}

impl MapSurface for MarkerCanvas {
    fn arm_marker_drawing(&mut self) {
        self.drawing_armed = true;
    }

    fn trigger_clear_all(&mut self) {
        self.drawn.clear();
    }

    fn set_click_listener(&mut self, listener: Option<ClickListener>) {
        self.listener = listener;
    }
}

impl Default for MarkerCanvas {
    fn default() -> Self {
        Self::new(
            LatLng::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
            DEFAULT_ZOOM,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{editor::MarkerEditor, input::events::Invocation};

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_center_maps_to_rect_center() {
        let canvas = MarkerCanvas::default();
        let pos = canvas.lat_lng_to_screen(viewport(), &canvas.center());
        assert!((pos - viewport().center()).length() < 1e-3);
    }

    #[test]
    fn test_screen_round_trip() {
        let canvas = MarkerCanvas::default();
        let pos = Pos2::new(520.0, 180.0);
        let lat_lng = canvas.screen_to_lat_lng(viewport(), pos);
        let back = canvas.lat_lng_to_screen(viewport(), &lat_lng);
        assert!((back - pos).length() < 0.01);
    }

    #[test]
    fn test_click_without_tool_does_nothing() {
        let mut canvas = MarkerCanvas::default();
        assert!(!canvas.handle_click(viewport(), Pos2::new(100.0, 100.0)));
        assert!(canvas.take_events().is_empty());
    }

    #[test]
    fn test_drawing_is_one_shot() {
        let mut canvas = MarkerCanvas::default();
        canvas.arm_marker_drawing();

        assert!(canvas.handle_click(viewport(), Pos2::new(100.0, 100.0)));
        assert!(!canvas.is_drawing_armed());
        assert!(!canvas.handle_click(viewport(), Pos2::new(200.0, 200.0)));

        assert_eq!(canvas.take_events().len(), 1);
        assert!(canvas.drawn().is_empty());
    }

    #[test]
    fn test_rejected_placement_is_never_drawn() {
        let config = crate::core::config::EditorProfile::Strict.resolve();
        let canvas = MarkerCanvas::new(LatLng::new(-40.75, 179.9), 5.0);
        let mut editor = MarkerEditor::with_config(canvas, config);

        let (canvas, store) = editor.surface_and_store();
        canvas.sync(store);

        // east of the antimeridian, so lng > 180
        editor.request_add_marker(Invocation(1));
        let pos = Pos2::new(700.0, 300.0);
        assert!(editor.surface().screen_to_lat_lng(viewport(), pos).lng > 180.0);
        assert!(editor.surface_mut().handle_click(viewport(), pos));
        for event in editor.surface_mut().take_events() {
            editor.handle_surface_event(event);
        }

        let (canvas, store) = editor.surface_and_store();
        canvas.sync(store);
        assert!(store.is_empty());
        assert_eq!(canvas.drawn().len(), store.len());
    }

    #[test]
    fn test_accepted_placement_drawn_after_sync() {
        let mut editor = MarkerEditor::new(MarkerCanvas::default());
        let (canvas, store) = editor.surface_and_store();
        canvas.sync(store);

        editor.request_add_marker(Invocation(1));
        editor
            .surface_mut()
            .handle_click(viewport(), Pos2::new(250.0, 350.0));
        for event in editor.surface_mut().take_events() {
            editor.handle_surface_event(event);
        }

        let (canvas, store) = editor.surface_and_store();
        canvas.sync(store);
        assert_eq!(store.len(), 1);
        assert_eq!(canvas.drawn(), store.markers().as_slice());
    }

    #[test]
    fn test_place_then_delete_through_editor() {
        let mut editor = MarkerEditor::new(MarkerCanvas::default());
        let click_pos = Pos2::new(300.0, 250.0);

        editor.request_add_marker(Invocation(1));
        editor.surface_mut().handle_click(viewport(), click_pos);
        for event in editor.surface_mut().take_events() {
            editor.handle_surface_event(event);
        }
        assert_eq!(editor.store().len(), 1);

        let (canvas, store) = editor.surface_and_store();
        canvas.sync(store);

        editor.set_delete_mode(true);
        assert!(editor.surface_mut().handle_click(viewport(), click_pos));
        assert!(editor.surface().drawn().is_empty());
        assert_eq!(editor.store().len(), 1);

        editor.process_pending_clicks();
        assert!(editor.store().is_empty());
    }

    #[test]
    fn test_marker_click_ignored_without_listener() {
        let mut editor = MarkerEditor::new(MarkerCanvas::default());
        let marker = editor
            .surface()
            .screen_to_lat_lng(viewport(), Pos2::new(400.0, 300.0));
        editor.on_marker_placed(marker);
        let (canvas, store) = editor.surface_and_store();
        canvas.sync(store);

        assert!(!editor
            .surface_mut()
            .handle_click(viewport(), Pos2::new(401.0, 301.0)));
        assert_eq!(editor.surface().drawn().len(), 1);
        assert_eq!(editor.controller().bridge().pending(), 0);
    }

    #[test]
    fn test_sync_follows_revision() {
        let mut canvas = MarkerCanvas::default();
        let mut store = FeatureStore::new();
        store.add(LatLng::new(-41.0, 174.0));

        canvas.sync(&store);
        assert_eq!(canvas.drawn().len(), 1);

        canvas.trigger_clear_all();
        store.clear_all();
        canvas.sync(&store);
        assert!(canvas.drawn().is_empty());
    }
}
