//! # mapmark
//!
//! Button-driven marker editing for interactive maps.
//!
//! Instead of a multi-step draw/edit toolbar, markers are placed with an
//! "add marker" command, removed by clicking them while a "delete mode"
//! switch is on, and wiped with "clear all". The library keeps the marker
//! collection and the interaction state; drawing the map is left to a
//! [`MapSurface`] implementation such as the egui [`ui::canvas::MarkerCanvas`].

pub mod core;
pub mod data;
pub mod editor;
pub mod input;
pub mod traits;
pub use crate::core::constants;

#[cfg(feature = "tokio-runtime")]
pub mod runtime;

#[cfg(feature = "egui")]
pub mod ui;

pub mod prelude;

// Re-export public API
pub use crate::core::{
    config::{EditorConfig, EditorProfile},
    geo::LatLng,
    mode::{Mode, ModeController},
};

pub use data::{
    geojson::{FeatureCollection, GeoJsonFeature},
    store::{FeatureStore, RemovalPolicy},
};

pub use editor::MarkerEditor;

pub use input::{
    bridge::{ClickListener, PointerEventBridge},
    events::{Invocation, InvocationCounter, PendingClick, SurfaceEvent},
};

pub use traits::{MapSurface, RenderedMarkers};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MarkerError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("Malformed coordinate: {0}")]
    MalformedCoordinate(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Editor service is no longer running")]
    ServiceClosed,
}

/// Error type alias for convenience
pub type Error = MarkerError;

/// Installs `env_logger` as the `log` backend. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
