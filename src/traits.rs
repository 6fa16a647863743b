//! Seams between the editor core and whatever draws the map
//!
//! The core never renders anything itself. A map surface receives the three
//! commands below and reports placements and clicks back; see
//! [`crate::input::events::SurfaceEvent`].

use crate::{core::geo::LatLng, input::bridge::ClickListener};

/// The surface's layer of drawn marker visuals
pub trait RenderedMarkers {
    /// Removes the visual for the marker at `lat_lng` right away.
    /// Returns whether a visual was drawn there.
    fn remove_rendered(&mut self, lat_lng: &LatLng) -> bool;
}

/// Commands the editor sends to the map surface
pub trait MapSurface {
    /// Enter single-point marker drawing. The surface drops back to no active
    /// tool by itself once one point has been placed.
    fn arm_marker_drawing(&mut self);

    /// Remove every drawn marker from the surface
    fn trigger_clear_all(&mut self);

    /// Install (`Some`) or remove (`None`) the listener for clicks on drawn markers
    fn set_click_listener(&mut self, listener: Option<ClickListener>);
}
