//! The asynchronous seam to the outside world.
//!
//! Retrieval and decoding live with the caller; the map only needs
//! something that can eventually produce the two decoded collections. Both
//! loads are issued concurrently and joined: the map never draws from a
//! partial dataset, and a failed load leaves it perpetually un-rendered
//! (logged, no retry).

use crate::data::geojson::FeatureCollection;
use crate::{MapError, Result};
use async_trait::async_trait;

/// Produces the decoded boundary and point datasets.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// The boundary dataset, converted upstream from its topology encoding
    /// into a polygon feature collection.
    async fn boundary(&self) -> Result<FeatureCollection>;

    /// The point dataset.
    async fn points(&self) -> Result<FeatureCollection>;
}

/// A source over collections already in memory. Useful for embedding
/// pre-decoded data and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    boundary: FeatureCollection,
    points: FeatureCollection,
}

impl StaticSource {
    pub fn new(boundary: FeatureCollection, points: FeatureCollection) -> Self {
        Self { boundary, points }
    }
}

#[async_trait]
impl DataSource for StaticSource {
    async fn boundary(&self) -> Result<FeatureCollection> {
        Ok(self.boundary.clone())
    }

    async fn points(&self) -> Result<FeatureCollection> {
        Ok(self.points.clone())
    }
}

/// Loads both datasets concurrently. Returns them only when both resolved;
/// either failure is logged and propagated.
pub async fn load_datasets(
    source: &dyn DataSource,
) -> Result<(FeatureCollection, FeatureCollection)> {
    let (boundary, points) = futures::join!(source.boundary(), source.points());

    match (boundary, points) {
        (Ok(boundary), Ok(points)) => Ok((boundary, points)),
        (Err(error), _) => {
            log::error!("boundary dataset failed to load: {error}");
            Err(error)
        }
        (_, Err(error)) => {
            log::error!("point dataset failed to load: {error}");
            Err(error)
        }
    }
}

/// A source whose datasets never materialize. Exercises the not-ready path.
#[derive(Debug, Clone)]
pub struct UnavailableSource {
    reason: String,
}

impl UnavailableSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DataSource for UnavailableSource {
    async fn boundary(&self) -> Result<FeatureCollection> {
        Err(MapError::Source(self.reason.clone()))
    }

    async fn points(&self) -> Result<FeatureCollection> {
        Err(MapError::Source(self.reason.clone()))
    }
}
