//! Viewport state: the zoom/pan transform and its transitions.
//!
//! One controller instance owns the authoritative [`ViewTransform`]. Every
//! mutation goes through its operations, each of which clamps rather than
//! rejects, so no input sequence can push the transform out of range.

use crate::core::config::MapOptions;
use crate::core::geo::Point;
use crate::layout::SurfaceSize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Zoom/pan transform applied to the rendered scene as a single 2D affine
/// transform: `screen = k * base + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Zoom scale
    pub k: f64,
    /// Horizontal pan offset in canvas units
    pub x: f64,
    /// Vertical pan offset in canvas units
    pub y: f64,
}

impl ViewTransform {
    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// The transform captured at every full redraw
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Maps a base (untransformed scene) point to the screen.
    pub fn apply(&self, point: &Point) -> Point {
        Point::new(self.k * point.x + self.x, self.k * point.y + self.y)
    }

    /// Maps a screen point back into base scene coordinates.
    pub fn invert(&self, point: &Point) -> Point {
        Point::new(self.invert_x(point.x), self.invert_y(point.y))
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.x) / self.k
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        (y - self.y) / self.k
    }

    /// Returns this transform shifted by `(dx, dy)` in base coordinates.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.k, self.x + self.k * dx, self.y + self.k * dy)
    }

    /// Returns this transform rescaled to `k` with `focus` (a screen point)
    /// held fixed.
    pub fn scaled_around(&self, focus: &Point, k: f64) -> Self {
        let ratio = k / self.k;
        Self::new(
            k,
            focus.x - (focus.x - self.x) * ratio,
            focus.y - (focus.y - self.y) * ratio,
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// An in-flight animated transition between two transforms. Superseded by
/// the next command, never explicitly cancelled.
#[derive(Debug, Clone)]
struct Transition {
    from: ViewTransform,
    to: ViewTransform,
    started: Instant,
    duration: Duration,
}

impl Transition {
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

fn ease_cubic_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn lerp(a: &ViewTransform, b: &ViewTransform, t: f64) -> ViewTransform {
    ViewTransform::new(
        a.k + (b.k - a.k) * t,
        a.x + (b.x - a.x) * t,
        a.y + (b.y - a.y) * t,
    )
}

/// Owns the viewport transform and its transitions.
///
/// Created at the first successful draw and reset on every full redraw;
/// all reads and writes go through these operations.
#[derive(Debug, Clone)]
pub struct ViewportController {
    transform: ViewTransform,
    initial: ViewTransform,
    surface: SurfaceSize,
    scale_extent: (f64, f64),
    pan_padding: f64,
    zoom_step: f64,
    duration: Duration,
    transition: Option<Transition>,
}

impl ViewportController {
    pub fn new(options: &MapOptions, surface: SurfaceSize) -> Self {
        Self {
            transform: ViewTransform::identity(),
            initial: ViewTransform::identity(),
            surface,
            scale_extent: options.scale_extent,
            pan_padding: options.pan_padding,
            zoom_step: options.zoom_step,
            duration: options.zoom_duration,
            transition: None,
        }
    }

    /// Current transform.
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Re-arms the controller after a full redraw: the identity transform
    /// becomes both current state and the recenter target.
    pub fn reset(&mut self, surface: SurfaceSize) {
        self.surface = surface;
        self.transform = ViewTransform::identity();
        self.initial = ViewTransform::identity();
        self.transition = None;
    }

    /// One tick of a drag/scroll gesture: the full transform is proposed
    /// and clamped. Supersedes any active transition.
    pub fn apply_gesture(&mut self, k: f64, x: f64, y: f64) {
        self.transition = None;
        self.transform = self.clamped(ViewTransform::new(k, x, y));
    }

    /// Pans by a screen-space delta (drag gesture convenience).
    pub fn pan_by(&mut self, delta: &Point) {
        let t = self.transform;
        self.apply_gesture(t.k, t.x + delta.x, t.y + delta.y);
    }

    /// Rescales by `factor` with `focus` (a screen point) held fixed
    /// (scroll-wheel gesture convenience).
    pub fn zoom_at(&mut self, focus: &Point, factor: f64) {
        let k = self.clamp_scale(self.transform.k * factor);
        let t = self.transform.scaled_around(focus, k);
        self.apply_gesture(t.k, t.x, t.y);
    }

    /// Programmatic zoom-in: multiplies the scale by the configured step,
    /// anchored at the canvas center, animated.
    pub fn zoom_in(&mut self) {
        self.animate_scale_by(self.zoom_step);
    }

    /// Programmatic zoom-out: halves the scale, anchored at the canvas
    /// center, animated.
    pub fn zoom_out(&mut self) {
        self.animate_scale_by(0.5);
    }

    /// Animates back to the transform captured at the last full redraw.
    pub fn recenter(&mut self) {
        self.transition = Some(Transition {
            from: self.transform,
            to: self.initial,
            started: Instant::now(),
            duration: self.duration,
        });
    }

    /// Advances any active transition. Returns true when the transform
    /// changed and the scene needs its attributes reapplied.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(transition) = &self.transition else {
            return false;
        };

        let progress = transition.progress(now);
        let eased = ease_cubic_out(progress);
        self.transform = self.clamped(lerp(&transition.from, &transition.to, eased));

        if progress >= 1.0 {
            self.transition = None;
        }
        true
    }

    fn animate_scale_by(&mut self, factor: f64) {
        let center = Point::new(self.surface.width / 2.0, self.surface.height / 2.0);
        let k = self.clamp_scale(self.transform.k * factor);
        let target = self.clamped(self.transform.scaled_around(&center, k));

        self.transition = Some(Transition {
            from: self.transform,
            to: target,
            started: Instant::now(),
            duration: self.duration,
        });
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.scale_extent.0, self.scale_extent.1)
    }

    /// Clamps the scale to the extent and the translation to the padded
    /// canvas bounds, so the scene cannot be dragged more than
    /// `pan_padding` beyond the canvas on any side.
    fn clamped(&self, proposed: ViewTransform) -> ViewTransform {
        let mut t = proposed;
        t.k = self.clamp_scale(t.k);

        if self.surface.width <= 0.0 || self.surface.height <= 0.0 {
            return t;
        }

        let pad = self.pan_padding;
        let dx0 = t.invert_x(0.0) + pad;
        let dx1 = t.invert_x(self.surface.width) - (self.surface.width + pad);
        let dy0 = t.invert_y(0.0) + pad;
        let dy1 = t.invert_y(self.surface.height) - (self.surface.height + pad);

        t.translated(Self::correction(dx0, dx1), Self::correction(dy0, dy1))
    }

    /// Translation correction along one axis: when the padded extent is
    /// smaller than the visible span the scene is centered, otherwise it is
    /// pushed back just inside the nearer violated edge.
    fn correction(d0: f64, d1: f64) -> f64 {
        if d1 > d0 {
            (d0 + d1) / 2.0
        } else {
            let low = d0.min(0.0);
            if low != 0.0 {
                low
            } else {
                d1.max(0.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ViewportController {
        ViewportController::new(
            &MapOptions::default(),
            SurfaceSize {
                width: 800.0,
                height: 600.0,
            },
        )
    }

    #[test]
    fn test_transform_roundtrip() {
        let t = ViewTransform::new(2.0, 30.0, -10.0);
        let p = Point::new(100.0, 50.0);
        let back = t.invert(&t.apply(&p));
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_scaled_around_keeps_focus_fixed() {
        let t = ViewTransform::new(2.0, 30.0, -10.0);
        let focus = Point::new(400.0, 300.0);
        let scaled = t.scaled_around(&focus, 5.0);

        let base = t.invert(&focus);
        let after = scaled.apply(&base);
        assert!((after.x - focus.x).abs() < 1e-9);
        assert!((after.y - focus.y).abs() < 1e-9);
    }

    #[test]
    fn test_gesture_scale_is_clamped() {
        let mut vc = controller();
        vc.apply_gesture(1000.0, 0.0, 0.0);
        assert_eq!(vc.transform().k, 30.0);

        vc.apply_gesture(0.0001, 0.0, 0.0);
        assert_eq!(vc.transform().k, 0.5);
    }

    #[test]
    fn test_pan_is_clamped_to_padding() {
        let mut vc = controller();
        vc.pan_by(&Point::new(1e6, 0.0));
        assert!(vc.transform().x <= 100.0 + 1e-9);

        let mut vc = controller();
        vc.pan_by(&Point::new(-1e6, -1e6));
        // At k=1 the scene may trail the canvas by at most the padding.
        assert!(vc.transform().x >= -100.0 - 1e-9);
        assert!(vc.transform().y >= -100.0 - 1e-9);
    }

    #[test]
    fn test_moderate_pan_is_untouched() {
        let mut vc = controller();
        vc.pan_by(&Point::new(40.0, -25.0));
        assert_eq!(vc.transform().x, 40.0);
        assert_eq!(vc.transform().y, -25.0);
    }

    #[test]
    fn test_zoom_in_converges_to_multiplied_scale() {
        let mut vc = controller();
        vc.zoom_in();
        assert!(vc.is_animating());

        let changed = vc.tick(Instant::now() + Duration::from_millis(500));
        assert!(changed);
        assert!(!vc.is_animating());
        assert!((vc.transform().k - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_out_halves_scale() {
        let mut vc = controller();
        vc.apply_gesture(4.0, 0.0, 0.0);
        vc.zoom_out();
        vc.tick(Instant::now() + Duration::from_millis(500));
        assert!((vc.transform().k - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_in_saturates_at_max() {
        let mut vc = controller();
        vc.apply_gesture(29.0, 0.0, 0.0);
        vc.zoom_in();
        vc.tick(Instant::now() + Duration::from_millis(500));
        assert_eq!(vc.transform().k, 30.0);
    }

    #[test]
    fn test_recenter_restores_identity() {
        let mut vc = controller();
        vc.apply_gesture(3.0, 50.0, -40.0);
        vc.recenter();
        vc.tick(Instant::now() + Duration::from_millis(500));
        assert_eq!(vc.transform(), ViewTransform::identity());
    }

    #[test]
    fn test_gesture_supersedes_transition() {
        let mut vc = controller();
        vc.zoom_in();
        assert!(vc.is_animating());

        vc.apply_gesture(2.0, 10.0, 10.0);
        assert!(!vc.is_animating());
        assert_eq!(vc.transform().k, 2.0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut vc = controller();
        vc.apply_gesture(3.0, 50.0, -40.0);
        vc.zoom_in();
        vc.reset(SurfaceSize {
            width: 400.0,
            height: 300.0,
        });
        assert_eq!(vc.transform(), ViewTransform::identity());
        assert!(!vc.is_animating());
    }

    #[test]
    fn test_zoom_at_keeps_cursor_anchored() {
        let mut vc = controller();
        let focus = Point::new(200.0, 150.0);
        let base = vc.transform().invert(&focus);
        vc.zoom_at(&focus, 2.0);
        let after = vc.transform().apply(&base);
        // The anchor may only move if the translation clamp kicked in.
        assert!((after.x - focus.x).abs() < 1e-6);
        assert!((after.y - focus.y).abs() < 1e-6);
    }
}
