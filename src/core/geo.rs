use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::constants::TILE_SIZE;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude.
///
/// Equality is exact on the stored `f64` values. Two markers are the same
/// marker only when both components compare equal bit-for-bit in value
/// (`-0.0 == 0.0`, `NaN` never matches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Both components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// GeoJSON position, longitude first
    pub fn to_position(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Builds a coordinate from a GeoJSON `[lng, lat]` position
    pub fn from_position(position: [f64; 2]) -> Self {
        Self::new(position[1], position[0])
    }

    /// Exact comparison against a GeoJSON `[lng, lat]` position
    pub fn matches_position(&self, position: &[f64; 2]) -> bool {
        position[0] == self.lng && position[1] == self.lat
    }

    /// Clamps latitude to the Web Mercator range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Converts to Web Mercator projection (EPSG:3857)
    pub fn to_mercator(&self) -> Point {
        let lat = Self::clamp_lat(self.lat);
        let x = self.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;
        Point::new(x, y)
    }

    /// Creates LatLng from Web Mercator coordinates
    pub fn from_mercator(point: Point) -> Self {
        let lng = (point.x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        Self::new(lat, lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::Point::new(lat_lng.lng, lat_lng.lat)
    }
}

impl From<geo_types::Point<f64>> for LatLng {
    fn from(point: geo_types::Point<f64>) -> Self {
        LatLng::new(point.y(), point.x())
    }
}

impl From<geo_types::Coord<f64>> for LatLng {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        LatLng::new(coord.y, coord.x)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Pixel coordinates of `lat_lng` in the world bitmap at `zoom`.
/// The origin is the top-left corner of the world; y grows southwards.
pub fn project(lat_lng: &LatLng, zoom: f64) -> Point {
    let world = world_size(zoom);
    let merc = lat_lng.to_mercator();
    let circumference = 2.0 * PI * EARTH_RADIUS;
    Point::new(
        (merc.x / circumference + 0.5) * world,
        (0.5 - merc.y / circumference) * world,
    )
}

/// Inverse of [`project`].
pub fn unproject(point: &Point, zoom: f64) -> LatLng {
    let world = world_size(zoom);
    let circumference = 2.0 * PI * EARTH_RADIUS;
    let merc = Point::new(
        (point.x / world - 0.5) * circumference,
        (0.5 - point.y / world) * circumference,
    );
    LatLng::from_mercator(merc)
}

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE as f64 * 2_f64.powf(zoom)
}
