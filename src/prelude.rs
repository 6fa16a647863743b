//! Prelude module for common mapmark types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapmark::prelude::*;`

pub use crate::core::{
    config::{EditorConfig, EditorProfile},
    geo::{LatLng, Point},
    mode::{Mode, ModeController},
};

pub use crate::data::{
    geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry},
    store::{FeatureStore, RemovalPolicy},
};

pub use crate::editor::MarkerEditor;

pub use crate::input::{
    bridge::{ClickListener, PointerEventBridge},
    events::{Invocation, InvocationCounter, PendingClick, SurfaceEvent},
};

pub use crate::traits::{MapSurface, RenderedMarkers};

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::{spawn_editor, EditorCommand, EditorHandle, EditorSnapshot};

#[cfg(feature = "egui")]
pub use crate::ui::canvas::{CanvasStyle, MarkerCanvas};

pub use crate::{Error as MarkerError, Result};
