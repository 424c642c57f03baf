//! The retained scene: projected base-layer geometry and point sprites.
//!
//! A scene is built from scratch whenever the datasets or the surface size
//! change (full clear-and-redraw, idempotent). Viewport-transform and
//! filter-state changes never rebuild it; they update sprite attributes in
//! place, which keeps gesture streams cheap and flicker-free.

use crate::core::geo::Point;
use crate::core::projection::FittedProjection;
use crate::core::viewport::ViewTransform;
use crate::data::categories::{DepthCategory, MagnitudeCategory};
use crate::data::ingest::{DataPoint, RegionFeature};
use crate::filter::FilterState;
use crate::render::style::{depth_color, magnitude_radius, Rgb};

/// One polygon of a region, projected into base (untransformed) scene
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPolygon {
    pub exterior: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
}

/// A projected region: one or more polygons sharing a name.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub name: Option<String>,
    pub polygons: Vec<ProjectedPolygon>,
}

/// One drawable point sprite. `base` never changes after the build; the
/// screen attributes are rewritten by the in-place passes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePoint {
    /// Source record id, for display
    pub id: usize,
    /// Projected position before the viewport transform
    pub base: Point,
    /// Position after the viewport transform
    pub screen: Point,
    /// Drawn radius: the category radius divided by the zoom scale, so
    /// circles keep a constant apparent size at any zoom level
    pub radius: f64,
    pub color: Rgb,
    pub opacity: f64,
    pub depth_category: DepthCategory,
    pub magnitude_category: MagnitudeCategory,
}

/// The drawn scene. Regions carry the group transform; points carry fully
/// resolved per-sprite attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    regions: Vec<RegionShape>,
    points: Vec<ScenePoint>,
    transform: ViewTransform,
}

impl Scene {
    /// Projects both collections and resolves every sprite attribute. The
    /// style resolver and filter state are consulted afresh here, never
    /// cached from a previous scene.
    pub fn build(
        regions: &[RegionFeature],
        points: &[DataPoint],
        projection: &FittedProjection,
        filters: &FilterState,
    ) -> Self {
        let regions = regions
            .iter()
            .map(|region| project_region(region, projection))
            .collect();

        let points = points
            .iter()
            .map(|point| {
                let base = projection.project(&point.position);
                ScenePoint {
                    id: point.id,
                    base,
                    screen: base,
                    radius: magnitude_radius(point.magnitude_category),
                    color: depth_color(point.depth_category),
                    opacity: filters.opacity_for(point),
                    depth_category: point.depth_category,
                    magnitude_category: point.magnitude_category,
                }
            })
            .collect();

        Self {
            regions,
            points,
            transform: ViewTransform::identity(),
        }
    }

    /// In-place pass for a viewport change: repositions every sprite and
    /// rescales its radius by `1 / k`. No geometry is re-derived.
    pub fn apply_transform(&mut self, transform: &ViewTransform) {
        self.transform = *transform;
        for point in &mut self.points {
            point.screen = transform.apply(&point.base);
            point.radius = magnitude_radius(point.magnitude_category) / transform.k;
        }
    }

    /// In-place pass for a filter change: recomputes every sprite's opacity
    /// over the full point set.
    pub fn apply_filters(&mut self, filters: &FilterState) {
        for point in &mut self.points {
            point.opacity =
                filters.opacity_for_categories(point.depth_category, point.magnitude_category);
        }
    }

    /// The group transform to draw the base layer under.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn regions(&self) -> &[RegionShape] {
        &self.regions
    }

    pub fn points(&self) -> &[ScenePoint] {
        &self.points
    }
}

fn project_region(region: &RegionFeature, projection: &FittedProjection) -> RegionShape {
    let polygons = region
        .geometry
        .0
        .iter()
        .map(|polygon| ProjectedPolygon {
            exterior: project_ring(polygon.exterior(), projection),
            holes: polygon
                .interiors()
                .iter()
                .map(|ring| project_ring(ring, projection))
                .collect(),
        })
        .collect();

    RegionShape {
        name: region.name.clone(),
        polygons,
    }
}

fn project_ring(ring: &geo_types::LineString<f64>, projection: &FittedProjection) -> Vec<Point> {
    ring.coords()
        .map(|coordinate| {
            projection.project(&crate::core::geo::LatLng::new(coordinate.y, coordinate.x))
        })
        .collect()
}
