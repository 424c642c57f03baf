//! Per-category filter state and the derived visibility rule.
//!
//! Two independent multi-select sets, one per categorical dimension. An
//! empty set places no constraint on its dimension. A point is emphasized
//! only when both dimensions pass; the combination across dimensions is a
//! deliberate AND (a product-policy choice, preserved from the reference
//! behavior).

use crate::data::categories::{DepthCategory, MagnitudeCategory};
use crate::data::ingest::DataPoint;
use fxhash::FxHashSet;

/// Opacity of points that pass the active filters.
pub const EMPHASIS_OPACITY: f64 = 1.0;

/// Opacity of points that fail the active filters. Non-matching points are
/// dimmed, never removed from the scene.
pub const DEEMPHASIS_OPACITY: f64 = 0.05;

/// The two filterable categorical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Depth,
    Magnitude,
}

/// A category in either dimension, as carried by legend entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Depth(DepthCategory),
    Magnitude(MagnitudeCategory),
}

/// Multi-select category filters. Mutated only through [`FilterState::toggle`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    depth: FxHashSet<DepthCategory>,
    magnitude: FxHashSet<MagnitudeCategory>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the category to its dimension's selection if absent, removes it
    /// if present. Multi-select: no exclusivity within a dimension.
    pub fn toggle(&mut self, category: Category) {
        match category {
            Category::Depth(c) => {
                if !self.depth.insert(c) {
                    self.depth.remove(&c);
                }
            }
            Category::Magnitude(c) => {
                if !self.magnitude.insert(c) {
                    self.magnitude.remove(&c);
                }
            }
        }
    }

    /// True when neither dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.depth.is_empty() && self.magnitude.is_empty()
    }

    /// Whether the depth dimension passes for `category`: the selection is
    /// empty or contains it.
    pub fn depth_passes(&self, category: DepthCategory) -> bool {
        self.depth.is_empty() || self.depth.contains(&category)
    }

    /// Whether the magnitude dimension passes for `category`.
    pub fn magnitude_passes(&self, category: MagnitudeCategory) -> bool {
        self.magnitude.is_empty() || self.magnitude.contains(&category)
    }

    /// Whether a single-dimension category passes its own dimension,
    /// independent of the other dimension's state. Drives legend swatch
    /// emphasis.
    pub fn category_passes(&self, category: Category) -> bool {
        match category {
            Category::Depth(c) => self.depth_passes(c),
            Category::Magnitude(c) => self.magnitude_passes(c),
        }
    }

    /// The opacity a point should be drawn with: emphasized only when both
    /// dimensions pass.
    pub fn opacity_for(&self, point: &DataPoint) -> f64 {
        self.opacity_for_categories(point.depth_category, point.magnitude_category)
    }

    /// Same rule over bare category values, for scene sprites.
    pub fn opacity_for_categories(
        &self,
        depth: DepthCategory,
        magnitude: MagnitudeCategory,
    ) -> f64 {
        if self.depth_passes(depth) && self.magnitude_passes(magnitude) {
            EMPHASIS_OPACITY
        } else {
            DEEMPHASIS_OPACITY
        }
    }
}
