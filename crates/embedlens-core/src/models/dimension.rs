use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// What kind of model attribute a dimension describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionKind {
    /// The model's predicted label
    Prediction,
    /// The ground-truth label
    Actual,
    /// A model input feature
    Feature,
    /// A tag attached to the event
    Tag,
}

/// How a dimension's values are typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DimensionDataType {
    Categorical,
    Numeric,
}

/// A named model attribute available for dimension-based coloring
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    /// Dimension name, unique within the model schema
    pub name: String,

    /// Attribute kind
    pub kind: DimensionKind,

    /// Value type
    pub data_type: DimensionDataType,
}

impl Dimension {
    pub fn new(name: impl Into<String>, kind: DimensionKind, data_type: DimensionDataType) -> Self {
        Self { name: name.into(), kind, data_type }
    }
}

/// Summary statistics for a dimension, fetched lazily.
///
/// Exactly one of the two fields is populated once computed: `interval` for
/// a numeric dimension, `categories` for a categorical one. Both `None`
/// means the statistics have not been computed yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionStatistics {
    /// Observed value range of a numeric dimension, half-open `[min, max)`
    pub interval: Option<Interval>,

    /// Distinct values of a categorical dimension
    pub categories: Option<Vec<String>>,
}

impl DimensionStatistics {
    /// Statistics for a numeric dimension
    pub fn numeric(interval: Interval) -> Self {
        Self { interval: Some(interval), categories: None }
    }

    /// Statistics for a categorical dimension
    pub fn categorical(categories: Vec<String>) -> Self {
        Self { interval: None, categories: Some(categories) }
    }
}
