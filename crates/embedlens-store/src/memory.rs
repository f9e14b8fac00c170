//! In-memory metadata source for development and testing.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock poisoning
//! only occurs when another thread panicked while holding the lock, which is
//! an unrecoverable state.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use embedlens_core::error::{EmbedlensError, Result};
use embedlens_core::models::{Dimension, DimensionStatistics, PointId, PointMetadata};
use embedlens_core::ports::MetadataSource;

/// In-memory implementation of MetadataSource
#[derive(Debug, Clone, Default)]
pub struct MemoryMetadataSource {
    metadata: Arc<RwLock<HashMap<PointId, PointMetadata>>>,
    statistics: Arc<RwLock<HashMap<String, DimensionStatistics>>>,
}

impl MemoryMetadataSource {
    /// Create a new empty in-memory source
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed metadata for a point
    pub fn insert_metadata(&self, point_id: PointId, metadata: PointMetadata) {
        self.metadata.write().unwrap().insert(point_id, metadata);
    }

    /// Seed statistics for a dimension, keyed by name
    pub fn insert_statistics(&self, dimension_name: impl Into<String>, stats: DimensionStatistics) {
        self.statistics.write().unwrap().insert(dimension_name.into(), stats);
    }
}

#[async_trait]
impl MetadataSource for MemoryMetadataSource {
    async fn fetch_point_metadata(
        &self,
        point_ids: &[PointId],
    ) -> Result<HashMap<PointId, PointMetadata>> {
        let metadata = self.metadata.read().unwrap();
        Ok(point_ids
            .iter()
            .filter_map(|id| metadata.get(id).map(|m| (id.clone(), m.clone())))
            .collect())
    }

    async fn fetch_dimension_statistics(
        &self,
        dimension: &Dimension,
    ) -> Result<DimensionStatistics> {
        let statistics = self.statistics.read().unwrap();
        statistics.get(&dimension.name).cloned().ok_or_else(|| {
            EmbedlensError::DimensionNotFound { name: dimension.name.clone() }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedlens_core::interval::Interval;
    use embedlens_core::models::{DimensionDataType, DimensionKind};

    fn id(s: &str) -> PointId {
        PointId(s.to_string())
    }

    #[tokio::test]
    async fn test_fetch_returns_only_seeded_points() {
        let source = MemoryMetadataSource::new();
        source.insert_metadata(id("0:PRIMARY"), PointMetadata::default());

        let fetched = source
            .fetch_point_metadata(&[id("0:PRIMARY"), id("1:PRIMARY")])
            .await
            .unwrap();

        // Partial maps are valid: unseeded points are simply absent
        assert_eq!(fetched.len(), 1);
        assert!(fetched.contains_key(&id("0:PRIMARY")));
        assert!(!fetched.contains_key(&id("1:PRIMARY")));
    }

    #[tokio::test]
    async fn test_fetch_spans_both_datasets() {
        let source = MemoryMetadataSource::new();
        source.insert_metadata(id("0:PRIMARY"), PointMetadata::default());
        source.insert_metadata(id("0:REFERENCE"), PointMetadata::default());

        let fetched = source
            .fetch_point_metadata(&[id("0:PRIMARY"), id("0:REFERENCE")])
            .await
            .unwrap();

        assert_eq!(fetched.len(), 2);
    }

    #[tokio::test]
    async fn test_statistics_for_seeded_dimension() {
        let source = MemoryMetadataSource::new();
        source.insert_statistics("age", DimensionStatistics::numeric(Interval::new(0.0, 100.0)));

        let dim = Dimension::new("age", DimensionKind::Feature, DimensionDataType::Numeric);
        let stats = source.fetch_dimension_statistics(&dim).await.unwrap();

        assert_eq!(stats.interval, Some(Interval::new(0.0, 100.0)));
        assert_eq!(stats.categories, None);
    }

    #[tokio::test]
    async fn test_unknown_dimension_is_a_hard_error() {
        let source = MemoryMetadataSource::new();
        let dim = Dimension::new("missing", DimensionKind::Feature, DimensionDataType::Numeric);

        let err = source.fetch_dimension_statistics(&dim).await.unwrap_err();
        assert!(matches!(err, EmbedlensError::DimensionNotFound { .. }));
    }
}
