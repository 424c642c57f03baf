//! Normalization of decoded datasets into the map's data model.
//!
//! Enrichment is forgiving by design: a malformed point record keeps its
//! default categories and a missing geometry lands at the null island
//! origin, but no point record is ever dropped. Region features without a
//! polygon geometry contribute nothing to the base layer.

use crate::core::geo::{GeoBounds, LatLng};
use crate::data::categories::{DepthCategory, MagnitudeCategory};
use crate::data::geojson::{Feature, FeatureCollection, Geometry};
use geo::BoundingRect;
use geo_types::{LineString, MultiPolygon, Polygon};

/// An immutable polygon boundary, decoded once at load time and used only
/// for the base layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub name: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

impl RegionFeature {
    /// Geographic bounding box of the region, if it has any area.
    pub fn bounds(&self) -> Option<GeoBounds> {
        self.geometry.bounding_rect().map(|rect| {
            GeoBounds::from_coords(rect.min().y, rect.min().x, rect.max().y, rect.max().x)
        })
    }
}

/// One observation: geographic position plus the measurement fields shown
/// in the tooltip and the two derived categorical fields. Created once
/// during ingestion and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub id: usize,
    pub position: LatLng,
    pub magnitude: Option<f64>,
    pub depth: Option<f64>,
    pub mag_error: Option<f64>,
    pub depth_error: Option<f64>,
    pub mag_type: Option<String>,
    pub place: Option<String>,
    pub time: Option<String>,
    pub dmin: Option<f64>,
    pub depth_category: DepthCategory,
    pub magnitude_category: MagnitudeCategory,
}

/// Converts a decoded boundary collection into region features.
pub fn ingest_regions(collection: &FeatureCollection) -> Vec<RegionFeature> {
    collection
        .features
        .iter()
        .filter_map(region_from_feature)
        .collect()
}

/// Converts a decoded point collection into data points, deriving the two
/// categorical fields.
pub fn ingest_points(collection: &FeatureCollection) -> Vec<DataPoint> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| point_from_feature(index, feature))
        .collect()
}

/// Union of the geographic bounds of all regions; the projection fit
/// extent.
pub fn regions_extent(regions: &[RegionFeature]) -> GeoBounds {
    let mut extent: Option<GeoBounds> = None;
    for region in regions {
        if let Some(bounds) = region.bounds() {
            extent = Some(match extent {
                Some(current) => current.union(&bounds),
                None => bounds,
            });
        }
    }
    extent.unwrap_or_else(GeoBounds::world)
}

fn region_from_feature(feature: &Feature) -> Option<RegionFeature> {
    let polygons = match &feature.geometry {
        Some(Geometry::Polygon { coordinates }) => vec![polygon_from_rings(coordinates)?],
        Some(Geometry::MultiPolygon { coordinates }) => coordinates
            .iter()
            .filter_map(|rings| polygon_from_rings(rings))
            .collect(),
        _ => return None,
    };

    if polygons.is_empty() {
        return None;
    }

    let name = feature
        .properties
        .as_ref()
        .and_then(|properties| properties.name.clone());

    Some(RegionFeature {
        name,
        geometry: MultiPolygon(polygons),
    })
}

fn polygon_from_rings(rings: &[Vec<[f64; 2]>]) -> Option<Polygon<f64>> {
    let mut iter = rings.iter();
    let exterior = ring_to_line_string(iter.next()?);
    if exterior.0.len() < 3 {
        return None;
    }
    let interiors = iter.map(|ring| ring_to_line_string(ring)).collect();
    Some(Polygon::new(exterior, interiors))
}

fn ring_to_line_string(ring: &[[f64; 2]]) -> LineString<f64> {
    LineString::from(
        ring.iter()
            .map(|coordinate| (coordinate[0], coordinate[1]))
            .collect::<Vec<_>>(),
    )
}

fn point_from_feature(index: usize, feature: &Feature) -> DataPoint {
    let position = match &feature.geometry {
        Some(Geometry::Point { coordinates }) => LatLng::new(coordinates[1], coordinates[0]),
        // Malformed geometry is tolerated, never dropped.
        _ => LatLng::default(),
    };

    let id = feature
        .id
        .as_ref()
        .and_then(|value| value.as_u64())
        .map(|value| value as usize)
        .unwrap_or(index);

    let properties = feature.properties.clone().unwrap_or_default();

    DataPoint {
        id,
        position,
        magnitude: properties.mag,
        depth: properties.depth,
        mag_error: properties.mag_error,
        depth_error: properties.depth_error,
        mag_type: properties.mag_type,
        place: properties.place,
        time: properties.time,
        dmin: properties.dmin,
        depth_category: DepthCategory::from_raw(properties.depth_category.as_deref()),
        magnitude_category: MagnitudeCategory::from_raw(properties.magnitude_category.as_deref()),
    }
}
