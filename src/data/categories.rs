//! Closed categorical classifications for the two styled dimensions.
//!
//! Source records may carry these as precomputed strings, as raw numeric
//! measurements, or not at all. The enums are closed: every raw value maps
//! onto a variant, with `Unknown`/`Minor` absorbing everything
//! unrecognized or absent.

use serde::{Deserialize, Serialize};

/// Hypocenter depth classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthCategory {
    Shallow,
    Intermediate,
    Deep,
    Unknown,
}

impl DepthCategory {
    /// All variants, in display order.
    pub const ALL: [DepthCategory; 4] = [
        DepthCategory::Shallow,
        DepthCategory::Intermediate,
        DepthCategory::Deep,
        DepthCategory::Unknown,
    ];

    /// Resolves a raw string from the source record. Anything absent or
    /// unrecognized is `Unknown`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("shallow") => DepthCategory::Shallow,
            Some("intermediate") => DepthCategory::Intermediate,
            Some("deep") => DepthCategory::Deep,
            _ => DepthCategory::Unknown,
        }
    }

    /// Classifies a raw depth measurement in kilometers.
    pub fn from_depth_km(depth: f64) -> Self {
        if depth < 70.0 {
            DepthCategory::Shallow
        } else if depth < 300.0 {
            DepthCategory::Intermediate
        } else {
            DepthCategory::Deep
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepthCategory::Shallow => "shallow",
            DepthCategory::Intermediate => "intermediate",
            DepthCategory::Deep => "deep",
            DepthCategory::Unknown => "unknown",
        }
    }
}

impl Default for DepthCategory {
    fn default() -> Self {
        DepthCategory::Unknown
    }
}

/// Event magnitude classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeCategory {
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
}

impl MagnitudeCategory {
    /// All variants, in display order.
    pub const ALL: [MagnitudeCategory; 5] = [
        MagnitudeCategory::Minor,
        MagnitudeCategory::Light,
        MagnitudeCategory::Moderate,
        MagnitudeCategory::Strong,
        MagnitudeCategory::Major,
    ];

    /// Resolves a raw string from the source record. Anything absent or
    /// unrecognized is `Minor`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("light") => MagnitudeCategory::Light,
            Some("moderate") => MagnitudeCategory::Moderate,
            Some("strong") => MagnitudeCategory::Strong,
            Some("major") => MagnitudeCategory::Major,
            _ => MagnitudeCategory::Minor,
        }
    }

    /// Classifies a raw magnitude measurement. The whole tail above 7
    /// counts as `Major`.
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude < 4.0 {
            MagnitudeCategory::Minor
        } else if magnitude < 5.0 {
            MagnitudeCategory::Light
        } else if magnitude < 6.0 {
            MagnitudeCategory::Moderate
        } else if magnitude < 7.0 {
            MagnitudeCategory::Strong
        } else {
            MagnitudeCategory::Major
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MagnitudeCategory::Minor => "minor",
            MagnitudeCategory::Light => "light",
            MagnitudeCategory::Moderate => "moderate",
            MagnitudeCategory::Strong => "strong",
            MagnitudeCategory::Major => "major",
        }
    }
}

impl Default for MagnitudeCategory {
    fn default() -> Self {
        MagnitudeCategory::Minor
    }
}
