//! Surface-size observation.
//!
//! The drawing surface is measured by the embedding UI; the tracker dedupes
//! those measurements and reports only real changes, which drive the full
//! re-projection path. Excessive resize events therefore cost nothing and
//! cannot corrupt viewport state.

use serde::{Deserialize, Serialize};

/// Dimensions of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when the surface has a drawable area
    pub fn is_drawable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Detects container size changes, including the first mount.
#[derive(Debug, Clone, Default)]
pub struct SurfaceTracker {
    last: Option<SurfaceSize>,
}

impl SurfaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a measurement. Returns the new size when it differs from the
    /// last observed one (always on the first call), `None` otherwise.
    pub fn observe(&mut self, size: SurfaceSize) -> Option<SurfaceSize> {
        if self.last == Some(size) {
            return None;
        }
        self.last = Some(size);
        Some(size)
    }

    /// The most recently observed size, if any.
    pub fn current(&self) -> Option<SurfaceSize> {
        self.last
    }
}
