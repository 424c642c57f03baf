//! Geographic-to-screen projection.
//!
//! A spherical Mercator projection fitted so the base layer's geographic
//! extent fills the drawing surface, with the vertical translation biased
//! to place the projection origin at two thirds of the surface height.
//! This keeps the populated mid-to-southern latitudes of a world dataset
//! away from the very top of the canvas.

use crate::core::geo::{GeoBounds, LatLng, Point};
use crate::layout::SurfaceSize;

/// A fitted projection: scale and translation over the raw Mercator curve.
///
/// Recomputed from scratch whenever the surface size or the base layer
/// changes; never mutated in place by viewport interaction, which operates
/// on projected coordinates instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedProjection {
    scale: f64,
    translate: Point,
}

impl FittedProjection {
    /// Fits the projection so `extent` exactly fills `size`, then biases
    /// the vertical translation to `height / 1.5`.
    ///
    /// A degenerate extent (empty base layer) falls back to the whole
    /// projectable world rather than failing.
    pub fn fit(extent: &GeoBounds, size: SurfaceSize) -> Self {
        let extent = if extent.is_valid() {
            extent.clone()
        } else {
            GeoBounds::world()
        };

        // Mercator is monotone and separable, so the projected bounding box
        // is exactly the projection of the geographic corners.
        let top_left = Self::raw(&LatLng::new(extent.north_east.lat, extent.south_west.lng));
        let bottom_right = Self::raw(&LatLng::new(extent.south_west.lat, extent.north_east.lng));

        let span_x = bottom_right.x - top_left.x;
        let span_y = bottom_right.y - top_left.y;

        let scale = if span_x > 0.0 && span_y > 0.0 {
            (size.width / span_x).min(size.height / span_y)
        } else {
            1.0
        };

        let translate = Point::new(
            (size.width - scale * (top_left.x + bottom_right.x)) / 2.0,
            size.height / 1.5,
        );

        Self { scale, translate }
    }

    /// Projects a geographic coordinate to surface coordinates.
    pub fn project(&self, coord: &LatLng) -> Point {
        let raw = Self::raw(coord);
        Point::new(
            self.translate.x + self.scale * raw.x,
            self.translate.y + self.scale * raw.y,
        )
    }

    /// The fitted scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Raw spherical Mercator: x grows east, y grows south (screen order).
    /// Latitude is clamped to the projectable range first.
    fn raw(coord: &LatLng) -> Point {
        let lat = LatLng::clamp_lat(coord.lat).to_radians();
        let x = coord.lng.to_radians();
        let y = -lat.tan().asinh();
        Point::new(x, y)
    }
}
