use mapmark::{
    ClickListener, Invocation, LatLng, MapSurface, MarkerEditor, RenderedMarkers,
};

/// A surface with no window: keeps a list of "drawn" markers
#[derive(Default)]
struct HeadlessSurface {
    drawn: Vec<LatLng>,
    listener: Option<ClickListener>,
    drawing_armed: bool,
}

impl HeadlessSurface {
    /// Simulates the user placing a point with the drawing tool
    fn place(&mut self, lat_lng: LatLng) -> Option<LatLng> {
        if !self.drawing_armed {
            return None;
        }
        self.drawing_armed = false;
        self.drawn.push(lat_lng);
        Some(lat_lng)
    }

    /// Simulates the user clicking a drawn marker
    fn click(&mut self, lat_lng: LatLng) {
        if let Some(listener) = self.listener.clone() {
            listener.on_marker_clicked(self, lat_lng);
        }
    }
}

impl RenderedMarkers for HeadlessSurface {
    fn remove_rendered(&mut self, lat_lng: &LatLng) -> bool {
        match self.drawn.iter().position(|m| m == lat_lng) {
            Some(i) => {
                self.drawn.remove(i);
                true
            }
            None => false,
        }
    }
}

impl MapSurface for HeadlessSurface {
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

/// Walks through adding, deleting and clearing markers without any UI
fn main() -> mapmark::Result<()> {
    #[cfg(feature = "debug")]
    mapmark::init_logging();

    println!("🗺️ mapmark headless example");
    println!("===========================");

    let mut editor = MarkerEditor::new(HeadlessSurface::default());

    println!("\n📍 Adding markers:");
    let points = [
        LatLng::new(-40.75, 173.03),
        LatLng::new(-41.29, 174.78),
        LatLng::new(-36.85, 174.76),
    ];
    for (i, point) in points.iter().enumerate() {
        editor.request_add_marker(Invocation(i as u64 + 1));
        if let Some(placed) = editor.surface_mut().place(*point) {
            editor.on_marker_placed(placed);
        }
        println!("   {} - {:.4}, {:.4}", i + 1, point.lat, point.lng);
    }
    println!("   Mode after placing: {:?}", editor.mode());

    println!("\n🗑️ Delete mode:");
    editor.set_delete_mode(true);
    editor.surface_mut().click(points[1]);
    println!(
        "   Drawn right after click: {}, stored: {}",
        editor.surface().drawn.len(),
        editor.store().len()
    );
    editor.process_pending_clicks();
    println!("   Stored after processing: {}", editor.store().len());

    editor.set_delete_mode(false);
    editor.surface_mut().click(points[0]);
    println!(
        "   Click with delete mode off left {} marker(s)",
        editor.store().len()
    );

    println!("\n📋 GeoJSON:");
    println!("   {}", editor.to_geojson()?);

    println!("\n🧹 Clearing:");
    editor.request_clear_all(Invocation(1));
    editor.request_clear_all(Invocation(2));
    println!("   Markers left: {}", editor.store().len());

    println!("\n✅ Headless example completed successfully!");
    Ok(())
}
