use serde::{Deserialize, Serialize};

/// The active rule set for grouping and coloring points.
///
/// This is a closed set: adding a variant is a compile-time event for every
/// `match` over it, which is exactly the exhaustiveness the grouping engine
/// relies on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColoringStrategy {
    /// Partition by dataset membership (primary vs reference)
    #[default]
    Dataset,
    /// Partition by prediction correctness (correct / incorrect / unknown)
    Correctness,
    /// Partition by the value of a selected dimension
    Dimension,
}

/// Identifier of a cluster produced upstream by the cluster finder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClusterId(pub String);

/// Per-dataset visibility toggles for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetVisibility {
    pub primary: bool,
    pub reference: bool,
}

impl Default for DatasetVisibility {
    fn default() -> Self {
        Self { primary: true, reference: true }
    }
}

/// How the current selection is displayed in the side panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionDisplay {
    #[default]
    List,
    Gallery,
}
