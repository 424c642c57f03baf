//! The hover tooltip.
//!
//! Exactly one tooltip instance exists per map. Content and position are
//! replaced wholesale on each hover and cleared on pointer-leave, so a
//! stale label can never survive into the next hover.

use crate::core::geo::Point;
use crate::data::ingest::DataPoint;

/// A floating label following the hovered point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    visible: bool,
    content: Option<String>,
    position: Point,
    offset: (f64, f64),
}

impl Tooltip {
    pub fn new(offset: (f64, f64)) -> Self {
        Self {
            offset,
            ..Default::default()
        }
    }

    /// Shows the label for `point`, anchored at the pointer plus the
    /// configured offset. Replaces any previous content.
    pub fn show(&mut self, point: &DataPoint, pointer: Point) {
        self.content = Some(format_content(point));
        self.position = pointer.add(&Point::new(self.offset.0, self.offset.1));
        self.visible = true;
    }

    /// Hides the label and releases its content.
    pub fn hide(&mut self) {
        self.visible = false;
        self.content = None;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rendered opacity: hidden tooltips are fully transparent.
    pub fn opacity(&self) -> f64 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

fn format_content(point: &DataPoint) -> String {
    let mut lines = Vec::with_capacity(5);

    lines.push(point.place.clone().unwrap_or_else(|| "unknown place".to_string()));
    if let Some(time) = &point.time {
        lines.push(time.clone());
    }

    lines.push(format!(
        "Magnitude: {} ± {} ({})",
        fmt_value(point.magnitude),
        fmt_value(point.mag_error),
        point.mag_type.as_deref().unwrap_or("n/a"),
    ));
    lines.push(format!(
        "Depth: {} ± {} km",
        fmt_value(point.depth),
        fmt_value(point.depth_error),
    ));
    lines.push(format!(
        "Nearest station: {}°",
        fmt_value(point.dmin)
    ));

    lines.join("\n")
}

fn fmt_value(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value}"),
        None => "n/a".to_string(),
    }
}
