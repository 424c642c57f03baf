//! Map behavior configuration.

use crate::render::style::Rgb;
use std::time::Duration;

/// Tunable options for the map. Defaults match the reference behavior;
/// callers that need a different zoom range or palette override fields
/// before constructing the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Allowed zoom scale range, inclusive
    pub scale_extent: (f64, f64),
    /// How far (in canvas units) the scene may be dragged past the canvas
    /// edge on any side
    pub pan_padding: f64,
    /// Multiplier applied by one programmatic zoom-in step; zoom-out halves
    pub zoom_step: f64,
    /// Duration of programmatic zoom/recenter transitions
    pub zoom_duration: Duration,
    /// Base layer polygon fill
    pub region_fill: Rgb,
    /// Base layer polygon stroke
    pub region_stroke: Rgb,
    /// Tooltip offset from the pointer, in pixels (x right, y down)
    pub tooltip_offset: (f64, f64),
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            scale_extent: (0.5, 30.0),
            pan_padding: 100.0,
            zoom_step: 1.5,
            zoom_duration: Duration::from_millis(150),
            region_fill: Rgb::new(0xcc, 0xcc, 0xcc),
            region_stroke: Rgb::new(0x33, 0x33, 0x33),
            tooltip_offset: (10.0, -28.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = MapOptions::default();
        assert_eq!(options.scale_extent, (0.5, 30.0));
        assert_eq!(options.pan_padding, 100.0);
        assert_eq!(options.zoom_duration, Duration::from_millis(150));
        assert_eq!(options.region_fill.to_hex(), "#cccccc");
    }
}
