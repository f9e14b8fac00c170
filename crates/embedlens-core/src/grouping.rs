//! Group assignment and derived coloring configuration.
//!
//! [`compute_groups`] maps every point to exactly one named group for the
//! active coloring strategy; [`derive_coloring`] builds the matching
//! visibility and color maps as a single value. Both are pure: no I/O, no
//! side effects, and every input combination has a defined output.

use std::collections::HashMap;

use crate::color::{
    discrete_color, sequential_color, Color, CORRECT_COLOR, INCORRECT_COLOR, PALETTE_SIZE,
    PRIMARY_COLOR, REFERENCE_COLOR, UNKNOWN_COLOR,
};
use crate::interval::{classify, make_buckets, BUCKET_COUNT};
use crate::models::{
    ColoringStrategy, DatasetRole, Dimension, DimensionDataType, DimensionKind,
    DimensionStatistics, Point, PointId, PointMetadata,
};

/// Fallback group for incomplete or ambiguous data
pub const GROUP_UNKNOWN: &str = "unknown";
/// Dataset-strategy group names
pub const GROUP_PRIMARY: &str = "primary";
pub const GROUP_REFERENCE: &str = "reference";
/// Correctness-strategy group names
pub const GROUP_CORRECT: &str = "correct";
pub const GROUP_INCORRECT: &str = "incorrect";

/// Assign every point to exactly one named group.
///
/// The returned map's key set is exactly the input point-id set; values are
/// always drawn from the strategy's group names plus `"unknown"`.
pub fn compute_groups(
    points: &[Point],
    strategy: ColoringStrategy,
    metadata: &HashMap<PointId, PointMetadata>,
    dimension: Option<&Dimension>,
    statistics: Option<&DimensionStatistics>,
) -> HashMap<PointId, String> {
    points
        .iter()
        .map(|point| {
            let group = match strategy {
                ColoringStrategy::Dataset => match point.id.dataset_role() {
                    DatasetRole::Primary => GROUP_PRIMARY.to_string(),
                    DatasetRole::Reference => GROUP_REFERENCE.to_string(),
                },
                ColoringStrategy::Correctness => correctness_group(point),
                ColoringStrategy::Dimension => match (dimension, metadata.get(&point.id)) {
                    (Some(dim), Some(meta)) => dimension_group(meta, dim, statistics),
                    // No dimension selected, or the metadata fetch has not
                    // completed for this point yet.
                    _ => GROUP_UNKNOWN.to_string(),
                },
            };
            (point.id.clone(), group)
        })
        .collect()
}

/// Correctness from the point's own lightweight labels. Never needs the
/// lazily-fetched metadata map.
fn correctness_group(point: &Point) -> String {
    match (&point.event_metadata.prediction_label, &point.event_metadata.actual_label) {
        (Some(predicted), Some(actual)) if predicted == actual => GROUP_CORRECT.to_string(),
        (Some(_), Some(_)) => GROUP_INCORRECT.to_string(),
        _ => GROUP_UNKNOWN.to_string(),
    }
}

/// Group for one point under the dimension strategy
fn dimension_group(
    meta: &PointMetadata,
    dimension: &Dimension,
    statistics: Option<&DimensionStatistics>,
) -> String {
    match (dimension.kind, dimension.data_type) {
        (DimensionKind::Prediction, DimensionDataType::Categorical) => {
            label_or_unknown(meta.event_metadata.prediction_label.as_deref())
        }
        (DimensionKind::Actual, DimensionDataType::Categorical) => {
            label_or_unknown(meta.event_metadata.actual_label.as_deref())
        }
        _ => {
            let value = match meta.value_for(&dimension.name).and_then(|dv| dv.value.as_deref()) {
                Some(value) => value,
                None => return GROUP_UNKNOWN.to_string(),
            };
            match dimension.data_type {
                DimensionDataType::Categorical => value.to_string(),
                DimensionDataType::Numeric => numeric_group(value, statistics),
            }
        }
    }
}

fn label_or_unknown(label: Option<&str>) -> String {
    label.map(str::to_string).unwrap_or_else(|| GROUP_UNKNOWN.to_string())
}

/// Bucket name for a numeric value, or `"unknown"` when the value does not
/// parse to a real number or the interval statistics have not been computed.
fn numeric_group(value: &str, statistics: Option<&DimensionStatistics>) -> String {
    // "NaN" parses successfully but belongs in no bucket
    let parsed = match value.parse::<f64>() {
        Ok(parsed) if !parsed.is_nan() => parsed,
        _ => return GROUP_UNKNOWN.to_string(),
    };
    let interval = match statistics.and_then(|stats| stats.interval) {
        Some(interval) => interval,
        None => return GROUP_UNKNOWN.to_string(),
    };
    let buckets = make_buckets(interval, BUCKET_COUNT);
    buckets[classify(parsed, &buckets)].name.clone()
}

/// Visibility and color maps for the groups the active strategy can produce.
///
/// Always recomputed whole alongside the group assignment, never patched,
/// so the three maps cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColoringConfig {
    /// Group name -> included in the render set
    pub visibility: HashMap<String, bool>,
    /// Group name -> display color
    pub colors: HashMap<String, Color>,
}

impl ColoringConfig {
    fn from_entries(entries: Vec<(String, Color)>) -> Self {
        let visibility = entries.iter().map(|(name, _)| (name.clone(), true)).collect();
        let colors = entries.into_iter().collect();
        Self { visibility, colors }
    }

    /// Display color for a group, falling back to the unknown sentinel for
    /// names not yet in the map (e.g. categorical values seen before the
    /// dimension statistics arrive).
    pub fn color_for(&self, group: &str) -> Color {
        self.colors.get(group).copied().unwrap_or(UNKNOWN_COLOR)
    }
}

/// Derive the coloring configuration for a strategy.
///
/// Categorical dimensions with at most [`PALETTE_SIZE`] categories use the
/// discrete palette; beyond that every category switches to the sequential
/// ramp indexed by rank. Numeric dimensions always use the sequential ramp
/// over their bucket order.
pub fn derive_coloring(
    strategy: ColoringStrategy,
    dimension: Option<&Dimension>,
    statistics: Option<&DimensionStatistics>,
) -> ColoringConfig {
    match strategy {
        ColoringStrategy::Dataset => ColoringConfig::from_entries(vec![
            (GROUP_PRIMARY.to_string(), PRIMARY_COLOR),
            (GROUP_REFERENCE.to_string(), REFERENCE_COLOR),
            (GROUP_UNKNOWN.to_string(), UNKNOWN_COLOR),
        ]),
        ColoringStrategy::Correctness => ColoringConfig::from_entries(vec![
            (GROUP_CORRECT.to_string(), CORRECT_COLOR),
            (GROUP_INCORRECT.to_string(), INCORRECT_COLOR),
            (GROUP_UNKNOWN.to_string(), UNKNOWN_COLOR),
        ]),
        ColoringStrategy::Dimension => {
            let stats = match (dimension, statistics) {
                (Some(_), Some(stats)) => stats,
                _ => {
                    return ColoringConfig::from_entries(vec![(
                        GROUP_UNKNOWN.to_string(),
                        UNKNOWN_COLOR,
                    )])
                }
            };
            dimension_coloring(stats)
        }
    }
}

fn dimension_coloring(statistics: &DimensionStatistics) -> ColoringConfig {
    let group_names: Vec<String> = if let Some(categories) = &statistics.categories {
        let mut sorted = categories.clone();
        sorted.sort();
        sorted.dedup();
        sorted
    } else if let Some(interval) = statistics.interval {
        make_buckets(interval, BUCKET_COUNT).into_iter().map(|b| b.name).collect()
    } else {
        // Statistics not yet computed
        Vec::new()
    };

    let count = group_names.len();
    let use_discrete = statistics.categories.is_some() && count <= PALETTE_SIZE;

    let mut entries: Vec<(String, Color)> = group_names
        .into_iter()
        .enumerate()
        .map(|(rank, name)| {
            let color = if use_discrete {
                discrete_color(rank).unwrap_or(UNKNOWN_COLOR)
            } else if count > 1 {
                sequential_color(rank as f64 / (count - 1) as f64)
            } else {
                sequential_color(0.0)
            };
            (name, color)
        })
        .collect();
    entries.push((GROUP_UNKNOWN.to_string(), UNKNOWN_COLOR));
    ColoringConfig::from_entries(entries)
}
