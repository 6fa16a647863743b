//! Core constants derived from Leaflet defaults and the marker editor's
//! initial view. Keeping them in a single place makes the magic numbers easy to tweak.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude the map opens at.
pub const DEFAULT_CENTER_LAT: f64 = -40.75;

/// Longitude the map opens at.
pub const DEFAULT_CENTER_LNG: f64 = 173.03;

/// Zoom the map opens at.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Zoom limits for the viewer.
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Radius of a rendered marker dot, in screen pixels.
pub const MARKER_RADIUS: f32 = 7.0;

/// Pointer distance (screen pixels) that still counts as a hit on a marker.
pub const MARKER_HIT_RADIUS: f64 = 10.0;

/// How often the async service drains clicks that arrived between commands.
pub const DEFAULT_CLICK_POLL_MS: u64 = 50;

/// Help text shown for the editor's controls.
pub const ADD_MARKER_HELP: &str =
    "After clicking me, click on the map to add a marker. You must click me in between each marker added.";
pub const DELETE_MODE_HELP: &str = "When activated, click markers on the map to delete them";
pub const CLEAR_ALL_HELP: &str = "Delete all custom markers that you have added";
