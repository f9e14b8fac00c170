use serde::{Deserialize, Serialize};

/// Unique identifier for a point in the cloud.
///
/// Ids are minted by the backend as `"{row_index}:{role}"`, where the role
/// token's final dot-separated segment names the dataset the point belongs
/// to (`PRIMARY` or `REFERENCE`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointId(pub String);

impl PointId {
    /// The dataset this point belongs to, decoded from the id.
    pub fn dataset_role(&self) -> DatasetRole {
        DatasetRole::of_point_id(self)
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two disjoint datasets a point id can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetRole {
    /// The dataset under analysis (production traffic)
    Primary,
    /// The baseline dataset compared against (e.g. training data)
    Reference,
}

impl DatasetRole {
    /// Decode dataset membership from a point id.
    ///
    /// The role token is everything after the first `:`; its final
    /// dot-separated segment is compared against the role names. The rule is
    /// total: anything that is not recognizably a reference id is primary,
    /// so dataset grouping never falls back to an unknown group.
    pub fn of_point_id(id: &PointId) -> DatasetRole {
        let role_token = match id.0.split_once(':') {
            Some((_, role)) => role,
            None => return DatasetRole::Primary,
        };
        match role_token.rsplit('.').next() {
            Some("REFERENCE") => DatasetRole::Reference,
            _ => DatasetRole::Primary,
        }
    }
}

/// Lightweight per-event labels supplied at load time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Label the model predicted
    pub prediction_label: Option<String>,

    /// Score the model predicted
    pub prediction_score: Option<f64>,

    /// Ground-truth label
    pub actual_label: Option<String>,

    /// Ground-truth score
    pub actual_score: Option<f64>,
}

/// Links back to the raw data behind an embedding
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingMetadata {
    /// URL to the raw data (e.g. an image) the embedding was computed from
    pub link_to_data: Option<String>,

    /// Raw text the embedding was computed from
    pub raw_data: Option<String>,
}

/// A single visualized embedding instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique identifier, encodes dataset membership
    pub id: PointId,

    /// Projected 3D position. Projection is precomputed upstream.
    pub coordinates: [f64; 3],

    /// Lightweight labels, available synchronously
    pub event_metadata: EventMetadata,

    /// Links to the raw data behind the embedding
    pub embedding_metadata: EmbeddingMetadata,
}

impl Point {
    /// Create a point with no labels attached
    pub fn new(id: impl Into<String>, coordinates: [f64; 3]) -> Self {
        Self {
            id: PointId(id.into()),
            coordinates,
            event_metadata: EventMetadata::default(),
            embedding_metadata: EmbeddingMetadata::default(),
        }
    }

    /// Attach event labels to this point
    pub fn with_event_metadata(mut self, event_metadata: EventMetadata) -> Self {
        self.event_metadata = event_metadata;
        self
    }
}
