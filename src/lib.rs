//! # Seismap
//!
//! An interactive geospatial point-map engine.
//!
//! A base region layer (polygon boundaries) is overlaid with data points
//! positioned by geographic coordinate, styled by two independent
//! categorical attributes, and manipulable via zoom/pan, per-category
//! filtering, and hover inspection. The core is a plain state machine:
//! one viewport transform, one filter state, a retained scene, and a set
//! of discrete operations that mutate them. Rendering is a deterministic
//! projection of that state; the optional egui widget is one such
//! projection.

pub mod core;
pub mod data;
pub mod filter;
pub mod layout;
pub mod prelude;
pub mod render;
pub mod spatial;
pub mod ui;

// Re-export public API
pub use crate::core::{
    config::MapOptions,
    geo::{GeoBounds, LatLng, Point},
    map::{MapState, PointMap},
    projection::FittedProjection,
    viewport::{ViewTransform, ViewportController},
};

pub use crate::data::{
    categories::{DepthCategory, MagnitudeCategory},
    ingest::{DataPoint, RegionFeature},
    source::DataSource,
};

pub use crate::filter::{Category, Dimension, FilterState};
pub use crate::layout::{SurfaceSize, SurfaceTracker};
pub use crate::render::scene::Scene;
pub use crate::ui::{legend::Legend, tooltip::Tooltip};

#[cfg(feature = "egui")]
pub use crate::ui::widget::MapWidget;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("data source error: {0}")]
    Source(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

/// Error type alias for convenience
pub type Error = MapError;
