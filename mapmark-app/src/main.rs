use mapmark::{
    constants::{ADD_MARKER_HELP, CLEAR_ALL_HELP, DELETE_MODE_HELP},
    ui::{MarkerCanvas, UiMarkerExt},
    EditorConfig, InvocationCounter, MarkerEditor,
};

/// Standalone marker editor
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EditorConfig::from_env();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("mapmark - marker editor"),
        ..Default::default()
    };

    eframe::run_native(
        "mapmark-app",
        options,
        Box::new(move |cc| Box::new(MarkerApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("viewer exited with error: {e}"))?;

    Ok(())
}

/// The main application struct
struct MarkerApp {
    editor: MarkerEditor<MarkerCanvas>,
    add_presses: InvocationCounter,
    clear_presses: InvocationCounter,
    delete_mode: bool,
}

impl MarkerApp {
    fn new(_cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let canvas = MarkerCanvas::new(config.initial_center, config.initial_zoom);
        log::info!(
            "opening map at ({}, {}) zoom {}",
            config.initial_center.lat,
            config.initial_center.lng,
            config.initial_zoom
        );

        Self {
            editor: MarkerEditor::with_config(canvas, config),
            add_presses: InvocationCounter::new(),
            clear_presses: InvocationCounter::new(),
            delete_mode: false,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.label("Use the following controls to add or remove custom markers.");

        ui.horizontal(|ui| {
            if ui
                .button("Add marker")
                .on_hover_text(ADD_MARKER_HELP)
                .clicked()
            {
                let invocation = self.add_presses.next();
                self.editor.request_add_marker(invocation);
            }

            if ui
                .toggle_value(&mut self.delete_mode, "Delete mode")
                .on_hover_text(DELETE_MODE_HELP)
                .changed()
            {
                self.editor.set_delete_mode(self.delete_mode);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let clear = egui::Button::new(
                    egui::RichText::new("Clear all markers").color(egui::Color32::WHITE),
                )
                .fill(egui::Color32::from_rgb(220, 53, 69));

                if ui.add(clear).on_hover_text(CLEAR_ALL_HELP).clicked() {
                    let invocation = self.clear_presses.next();
                    self.editor.request_clear_all(invocation);
                }
            });
        });
    }
}

impl eframe::App for MarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Button-driven marker editing");
            self.controls(ui);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let canvas = self.editor.surface();
            ui.label(format!(
                "Mode: {:?} | Markers: {} | Center: {:.4}, {:.4} | Zoom: {:.2}",
                self.editor.mode(),
                self.editor.store().len(),
                canvas.center().lat,
                canvas.center().lng,
                canvas.zoom()
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (canvas, store) = self.editor.surface_and_store();
            ui.marker_canvas(canvas, store);
        });

        let events = self.editor.surface_mut().take_events();
        let placed = !events.is_empty();
        for event in events {
            self.editor.handle_surface_event(event);
        }

        if self.editor.process_pending_clicks() > 0 || placed {
            ctx.request_repaint();
        }
    }
}
