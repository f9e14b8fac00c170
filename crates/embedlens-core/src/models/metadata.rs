use serde::{Deserialize, Serialize};

use super::dimension::Dimension;
use super::point::EventMetadata;

/// A dimension paired with its value for one point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionWithValue {
    /// The dimension this value belongs to
    pub dimension: Dimension,

    /// The raw value, rendered as text. None when the event has no value
    /// for this dimension.
    pub value: Option<String>,
}

/// Rich per-point metadata, fetched lazily.
///
/// Absence of an entry in the metadata map is an expected transient state:
/// the fetch is in flight or the point has no auxiliary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointMetadata {
    /// The same event labels the point carries at load time
    pub event_metadata: EventMetadata,

    /// Per-dimension values for this point
    pub dimensions: Vec<DimensionWithValue>,
}

impl PointMetadata {
    /// Look up this point's value for a dimension by name
    pub fn value_for(&self, dimension_name: &str) -> Option<&DimensionWithValue> {
        self.dimensions.iter().find(|dv| dv.dimension.name == dimension_name)
    }
}
