//! Marker storage
//!
//! [`FeatureStore`] is the single source of truth for placed markers. Every
//! mutation goes through `add`, `clear_all` or `remove_by_coordinate`; the
//! surface only ever reads the collection it exposes.

use crate::{
    core::geo::LatLng,
    data::geojson::{FeatureCollection, GeoJsonFeature},
    Result,
};
use serde::{Deserialize, Serialize};

/// How many markers a removal takes out when several share the coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RemovalPolicy {
    /// Remove the earliest-inserted matching marker only
    #[default]
    FirstMatch,
    /// Remove every matching marker
    AllMatches,
}

#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    collection: FeatureCollection,
    revision: u64,
}

impl FeatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from an existing collection
    pub fn from_collection(collection: FeatureCollection) -> Self {
        Self {
            collection,
            revision: 0,
        }
    }

    pub fn from_geojson(geojson_str: &str) -> Result<Self> {
        Ok(Self::from_collection(FeatureCollection::from_str(
            geojson_str,
        )?))
    }

    /// Appends a marker at `lat_lng`
    pub fn add(&mut self, lat_lng: LatLng) {
        self.collection.features.push(GeoJsonFeature::point(lat_lng));
        self.revision += 1;
        log::debug!(
            "marker added at ({}, {}), {} total",
            lat_lng.lat,
            lat_lng.lng,
            self.len()
        );
    }

    /// Empties the collection. Clearing an empty store changes nothing.
    pub fn clear_all(&mut self) {
        if self.collection.is_empty() {
            return;
        }
        let removed = self.collection.len();
        self.collection.features.clear();
        self.revision += 1;
        log::debug!("cleared {} markers", removed);
    }

    /// Removes the marker(s) whose coordinate equals `lat_lng` exactly and
    /// returns how many were removed. A miss is not an error.
    pub fn remove_by_coordinate(&mut self, lat_lng: LatLng, policy: RemovalPolicy) -> usize {
        let before = self.collection.len();

        match policy {
            RemovalPolicy::FirstMatch => {
                if let Some(index) = self
                    .collection
                    .features
                    .iter()
                    .position(|f| f.is_at(&lat_lng))
                {
                    self.collection.features.remove(index);
                }
            }
            RemovalPolicy::AllMatches => {
                self.collection.features.retain(|f| !f.is_at(&lat_lng));
            }
        }

        let removed = before - self.collection.len();
        if removed > 0 {
            self.revision += 1;
            log::debug!(
                "removed {} marker(s) at ({}, {})",
                removed,
                lat_lng.lat,
                lat_lng.lng
            );
        } else {
            log::debug!(
                "no marker at ({}, {}), nothing removed",
                lat_lng.lat,
                lat_lng.lng
            );
        }
        removed
    }

    /// Read-only view for rendering
    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Marker positions in insertion order
    pub fn markers(&self) -> Vec<LatLng> {
        self.collection.lat_lngs()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Bumped on every mutation that changes the collection
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn to_geojson(&self) -> Result<String> {
        self.collection.to_json()
    }
}
