//! Configuration for the marker editor
//!
//! Plain option structs with sensible defaults, a few named profiles, and an
//! environment overlay so the viewer can be pointed somewhere else without a
//! rebuild.

use crate::{
    core::{
        constants::{DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_CLICK_POLL_MS, DEFAULT_ZOOM},
        geo::LatLng,
    },
    data::store::RemovalPolicy,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Where the map opens
    pub initial_center: LatLng,
    pub initial_zoom: f64,
    /// What happens when several markers share the clicked coordinate
    pub removal_policy: RemovalPolicy,
    /// Treat out-of-range latitudes/longitudes as malformed
    pub reject_out_of_range: bool,
    /// Tick for draining clicks in the async service
    pub click_poll_interval_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorProfile::Standard.resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorProfile {
    #[default]
    Standard,
    Strict,
    Custom(EditorConfig),
}

impl EditorProfile {
    pub fn resolve(&self) -> EditorConfig {
        match self {
            Self::Standard => EditorConfig {
                initial_center: LatLng::new(DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG),
                initial_zoom: DEFAULT_ZOOM,
                removal_policy: RemovalPolicy::FirstMatch,
                reject_out_of_range: false,
                click_poll_interval_ms: DEFAULT_CLICK_POLL_MS,
            },
            Self::Strict => EditorConfig {
                reject_out_of_range: true,
                ..Self::Standard.resolve()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl EditorConfig {
    /// Default config with `MAPMARK_*` environment overrides applied.
    ///
    /// Unset or unparsable variables keep the default value.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_f64 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<f64>().ok());
        let parse_bool = |key: &str| {
            lookup(key).and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Some(true),
                "0" | "false" | "no" | "off" => Some(false),
                _ => None,
            })
        };

        if let Some(lat) = parse_f64("MAPMARK_CENTER_LAT") {
            self.initial_center.lat = lat;
        }
        if let Some(lng) = parse_f64("MAPMARK_CENTER_LNG") {
            self.initial_center.lng = lng;
        }
        if let Some(zoom) = parse_f64("MAPMARK_ZOOM") {
            self.initial_zoom = zoom;
        }
        if let Some(remove_all) = parse_bool("MAPMARK_REMOVE_ALL") {
            self.removal_policy = if remove_all {
                RemovalPolicy::AllMatches
            } else {
                RemovalPolicy::FirstMatch
            };
        }
        if let Some(strict) = parse_bool("MAPMARK_STRICT_COORDS") {
            self.reject_out_of_range = strict;
        }

        log::debug!("editor config resolved: {:?}", self);
        self
    }
}
