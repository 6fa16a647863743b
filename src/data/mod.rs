pub mod geojson;
pub mod store;

pub use geojson::{FeatureCollection, GeoJsonFeature, GeoJsonGeometry};
pub use store::{FeatureStore, RemovalPolicy};
