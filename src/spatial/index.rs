//! R-tree index over projected point positions for hover hit-testing.
//!
//! The index is built once per scene rebuild, over base (untransformed)
//! coordinates, so it stays valid through any amount of zooming and
//! panning. Queries map the pointer through the inverse viewport transform
//! first.

use crate::core::geo::Point;
use crate::render::scene::ScenePoint;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// One indexed sprite: its position in the scene's point list plus the
/// unscaled category radius used for the hit radius.
#[derive(Debug, Clone, PartialEq)]
struct IndexedPoint {
    slot: usize,
    base: Point,
    base_radius: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.base.x, self.base.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.base.x - point[0];
        let dy = self.base.y - point[1];
        dx * dx + dy * dy
    }
}

/// Spatial index over a scene's points.
#[derive(Debug, Default)]
pub struct PointIndex {
    rtree: RTree<IndexedPoint>,
    max_base_radius: f64,
}

impl PointIndex {
    /// Builds the index from the scene's sprites.
    pub fn build(points: &[ScenePoint]) -> Self {
        let mut max_base_radius: f64 = 0.0;
        let items = points
            .iter()
            .enumerate()
            .map(|(slot, point)| {
                let base_radius =
                    crate::render::style::magnitude_radius(point.magnitude_category);
                max_base_radius = max_base_radius.max(base_radius);
                IndexedPoint {
                    slot,
                    base: point.base,
                    base_radius,
                }
            })
            .collect();

        Self {
            rtree: RTree::bulk_load(items),
            max_base_radius,
        }
    }

    /// Finds the sprite whose drawn circle contains the pointer, if any.
    ///
    /// `base_pointer` is the pointer position mapped into base coordinates;
    /// `k` is the current zoom scale. A circle drawn with screen radius
    /// `r / k` covers `r / k²` in base coordinates.
    pub fn hit_test(&self, base_pointer: &Point, k: f64) -> Option<usize> {
        if k <= 0.0 {
            return None;
        }

        let search = self.max_base_radius / (k * k);
        let query = [base_pointer.x, base_pointer.y];

        self.rtree
            .locate_within_distance(query, search * search)
            .filter(|candidate| {
                candidate.base.distance_to(base_pointer) <= candidate.base_radius / (k * k)
            })
            .min_by(|a, b| {
                a.distance_2(&query)
                    .partial_cmp(&b.distance_2(&query))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|candidate| candidate.slot)
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}
