use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Geometry of a marker feature. Only points are drawn by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: [f64; 2] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectionTag {
    #[default]
    FeatureCollection,
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(rename = "type", default)]
    pub tag: FeatureTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl GeoJsonFeature {
    /// A bare point feature at `lat_lng`
    pub fn point(lat_lng: LatLng) -> Self {
        Self {
            tag: FeatureTag::Feature,
            id: None,
            geometry: Some(GeoJsonGeometry::Point {
                coordinates: lat_lng.to_position(),
            }),
            properties: Some(Map::new()),
        }
    }

    /// The `[lng, lat]` position of a point feature
    pub fn position(&self) -> Option<&[f64; 2]> {
        match &self.geometry {
            Some(GeoJsonGeometry::Point { coordinates }) => Some(coordinates),
            None => None,
        }
    }

    pub fn lat_lng(&self) -> Option<LatLng> {
        self.position().map(|p| LatLng::from_position(*p))
    }

    /// Exact coordinate comparison; features without geometry never match
    pub fn is_at(&self, lat_lng: &LatLng) -> bool {
        self.position()
            .map(|p| lat_lng.matches_position(p))
            .unwrap_or(false)
    }
}

/// Root collection the map surface renders
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub tag: CollectionTag,
    #[serde(default)]
    pub features: Vec<GeoJsonFeature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a GeoJSON FeatureCollection document
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        let collection = serde_json::from_str(geojson_str)?;
        Ok(collection)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Positions of all point features, in collection order
    pub fn lat_lngs(&self) -> Vec<LatLng> {
        self.features.iter().filter_map(|f| f.lat_lng()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_parsing() {
        let geojson_str = r#"
        {
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Test Point"},
                    "geometry": {
                        "type": "Point",
                        "coordinates": [173.03, -40.75]
                    }
                }
            ]
        }
        "#;

        let collection = FeatureCollection::from_str(geojson_str).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.lat_lngs(), vec![LatLng::new(-40.75, 173.03)]);
    }

    #[test]
    fn test_point_feature_shape() {
        let feature = GeoJsonFeature::point(LatLng::new(-40.75, 173.03));
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "Point");
        assert_eq!(value["geometry"]["coordinates"][0], 173.03);
        assert_eq!(value["geometry"]["coordinates"][1], -40.75);
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_collection_tag_serialized() {
        let value = serde_json::to_value(FeatureCollection::new()).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_feature_without_geometry_never_matches() {
        let feature = GeoJsonFeature {
            tag: FeatureTag::Feature,
            id: None,
            geometry: None,
            properties: None,
        };
        assert!(!feature.is_at(&LatLng::new(0.0, 0.0)));
        assert_eq!(feature.lat_lng(), None);
    }

    #[test]
    fn test_rejects_unsupported_geometry() {
        let geojson_str = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}}
        ]}"#;
        assert!(FeatureCollection::from_str(geojson_str).is_err());
    }
}
