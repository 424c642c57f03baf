//! Decoded feature-collection input types.
//!
//! The engine does not fetch or parse external encodings; an upstream
//! collaborator decodes TopoJSON/GeoJSON (e.g. with `serde_json`) into
//! these shapes. Only the geometry kinds the map actually draws are
//! modeled; unknown property keys are ignored rather than rejected.

use serde::{Deserialize, Serialize};

/// Geometry of a decoded feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
}

/// Property bag covering both datasets: boundary features carry `name`,
/// point features carry the measurement and description fields. Everything
/// is optional; ingestion supplies defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub name: Option<String>,
    pub place: Option<String>,
    pub time: Option<String>,
    pub mag: Option<f64>,
    #[serde(rename = "magType")]
    pub mag_type: Option<String>,
    #[serde(rename = "magError")]
    pub mag_error: Option<f64>,
    pub depth: Option<f64>,
    #[serde(rename = "depthError")]
    pub depth_error: Option<f64>,
    pub dmin: Option<f64>,
    pub depth_category: Option<String>,
    pub magnitude_category: Option<String>,
}

/// One decoded feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Properties>,
}

/// A decoded feature collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }
}
