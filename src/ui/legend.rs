//! Legend model: swatch rows for both categorical dimensions plus the
//! zoom/recenter controls.
//!
//! The legend owns no filter or viewport state. It describes what to draw
//! (entries with per-swatch emphasis derived from the current filter
//! state) and translates clicks into commands for the map.

use crate::data::categories::{DepthCategory, MagnitudeCategory};
use crate::filter::{Category, Dimension, FilterState};
use crate::render::style::{depth_color, magnitude_radius, Rgb};

/// Opacity of a swatch whose category is filtered out of its dimension.
pub const DIMMED_SWATCH_OPACITY: f64 = 0.3;

/// A command produced by a legend click.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendAction {
    Toggle(Category),
    ZoomIn,
    ZoomOut,
    Recenter,
}

/// One legend row.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub dimension: Dimension,
    pub category: Category,
    pub label: &'static str,
    /// Color swatch (depth dimension)
    pub color: Option<Rgb>,
    /// Radius swatch (magnitude dimension)
    pub radius: Option<f64>,
}

/// Stateless legend description.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legend;

impl Legend {
    /// Depth rows, one per category, styled with the live resolver.
    pub fn depth_entries() -> Vec<LegendEntry> {
        DepthCategory::ALL
            .iter()
            .map(|&category| LegendEntry {
                dimension: Dimension::Depth,
                category: Category::Depth(category),
                label: category.label(),
                color: Some(depth_color(category)),
                radius: None,
            })
            .collect()
    }

    /// Magnitude rows, one per category.
    pub fn magnitude_entries() -> Vec<LegendEntry> {
        MagnitudeCategory::ALL
            .iter()
            .map(|&category| LegendEntry {
                dimension: Dimension::Magnitude,
                category: Category::Magnitude(category),
                label: category.label(),
                color: None,
                radius: Some(magnitude_radius(category)),
            })
            .collect()
    }

    /// Swatch emphasis mirrors the filter rule for the entry's own
    /// dimension only: full opacity when that dimension's selection is
    /// empty or contains the category, dimmed otherwise.
    pub fn swatch_opacity(filters: &FilterState, entry: &LegendEntry) -> f64 {
        if filters.category_passes(entry.category) {
            1.0
        } else {
            DIMMED_SWATCH_OPACITY
        }
    }

    /// The command for clicking a swatch row.
    pub fn click(entry: &LegendEntry) -> LegendAction {
        LegendAction::Toggle(entry.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_has_a_row() {
        assert_eq!(Legend::depth_entries().len(), DepthCategory::ALL.len());
        assert_eq!(
            Legend::magnitude_entries().len(),
            MagnitudeCategory::ALL.len()
        );
    }

    #[test]
    fn test_depth_rows_carry_colors() {
        for entry in Legend::depth_entries() {
            assert!(entry.color.is_some());
            assert!(entry.radius.is_none());
        }
    }

    #[test]
    fn test_magnitude_rows_carry_radii() {
        for entry in Legend::magnitude_entries() {
            assert!(entry.radius.is_some());
            assert!(entry.color.is_none());
        }
    }

    #[test]
    fn test_swatch_emphasis_follows_own_dimension_only() {
        let mut filters = FilterState::new();
        filters.toggle(Category::Depth(DepthCategory::Shallow));

        let depth_entries = Legend::depth_entries();
        let shallow = &depth_entries[0];
        let deep = &depth_entries[2];
        assert_eq!(Legend::swatch_opacity(&filters, shallow), 1.0);
        assert_eq!(
            Legend::swatch_opacity(&filters, deep),
            DIMMED_SWATCH_OPACITY
        );

        // The magnitude column is untouched by a depth selection.
        for entry in Legend::magnitude_entries() {
            assert_eq!(Legend::swatch_opacity(&filters, &entry), 1.0);
        }
    }

    #[test]
    fn test_click_toggles_own_category() {
        let entry = &Legend::depth_entries()[1];
        assert_eq!(
            Legend::click(entry),
            LegendAction::Toggle(Category::Depth(DepthCategory::Intermediate))
        );
    }
}
