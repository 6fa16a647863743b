pub mod canvas;

pub use canvas::{CanvasStyle, MarkerCanvas};

pub trait UiMarkerExt {
    fn marker_canvas(
        &mut self,
        canvas: &mut MarkerCanvas,
        store: &crate::data::store::FeatureStore,
    ) -> egui::Response;
}

impl UiMarkerExt for egui::Ui {
    fn marker_canvas(
        &mut self,
        canvas: &mut MarkerCanvas,
        store: &crate::data::store::FeatureStore,
    ) -> egui::Response {
        canvas.show(self, store)
    }
}
