//! Port definitions for the metadata query layer.
//!
//! The grouping engine never performs I/O itself; everything it needs
//! beyond the loaded points arrives through this port.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Dimension, DimensionStatistics, PointId, PointMetadata};

/// Port for the two lazy fetches behind the point cloud
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch rich metadata for a batch of points.
    ///
    /// The ids may span both datasets; partitioning them is the
    /// implementation's concern. Points the backend has no auxiliary data
    /// for are simply absent from the returned map — a partial map is a
    /// valid response, not an error.
    async fn fetch_point_metadata(
        &self,
        point_ids: &[PointId],
    ) -> Result<HashMap<PointId, PointMetadata>>;

    /// Fetch summary statistics for a dimension.
    ///
    /// Returns the value interval for a numeric dimension or the category
    /// set for a categorical one. A dimension the backend does not know is
    /// a hard error ([`crate::EmbedlensError::DimensionNotFound`]).
    async fn fetch_dimension_statistics(&self, dimension: &Dimension)
        -> Result<DimensionStatistics>;
}
