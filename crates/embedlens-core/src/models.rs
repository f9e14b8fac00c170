pub mod dimension;
pub mod metadata;
pub mod point;
pub mod strategy;

pub use dimension::{Dimension, DimensionDataType, DimensionKind, DimensionStatistics};
pub use metadata::{DimensionWithValue, PointMetadata};
pub use point::{DatasetRole, EmbeddingMetadata, EventMetadata, Point, PointId};
pub use strategy::{ClusterId, ColoringStrategy, DatasetVisibility, SelectionDisplay};
