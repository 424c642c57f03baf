//! Prelude module for common seismap types and traits
//!
//! Re-exports the most commonly used types for easy importing with
//! `use seismap::prelude::*;`

pub use crate::core::{
    config::MapOptions,
    geo::{GeoBounds, LatLng, Point},
    map::{MapState, PointMap},
    projection::FittedProjection,
    viewport::{ViewTransform, ViewportController},
};

pub use crate::data::{
    categories::{DepthCategory, MagnitudeCategory},
    geojson::{Feature, FeatureCollection, Geometry},
    ingest::{DataPoint, RegionFeature},
    source::{DataSource, StaticSource},
};

pub use crate::filter::{Category, Dimension, FilterState};
pub use crate::layout::{SurfaceSize, SurfaceTracker};
pub use crate::render::{
    scene::Scene,
    style::{depth_color, magnitude_radius, Rgb},
};
pub use crate::spatial::index::PointIndex;
pub use crate::ui::{
    legend::{Legend, LegendAction},
    tooltip::Tooltip,
};

#[cfg(feature = "egui")]
pub use crate::ui::widget::MapWidget;

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
