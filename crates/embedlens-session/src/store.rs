//! The point-cloud session store.
//!
//! State lives behind a `std::sync::RwLock` that is never held across an
//! await point; the async operations split into a synchronous mutation
//! phase and a fetch-then-commit continuation. Each mutable input carries a
//! generation counter, and a completed fetch commits only if its generation
//! is still current — a stale fetch is a silent no-op, never a merge.
//!
//! `RwLock::unwrap()` is used intentionally here. Lock poisoning only
//! occurs when another thread panicked while holding the lock, which is an
//! unrecoverable state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use embedlens_core::color::Color;
use embedlens_core::config::SessionConfig;
use embedlens_core::error::Result;
use embedlens_core::grouping::{compute_groups, derive_coloring, ColoringConfig};
use embedlens_core::models::{
    ClusterId, ColoringStrategy, DatasetVisibility, Dimension, DimensionStatistics, Point,
    PointId, PointMetadata, SelectionDisplay,
};
use embedlens_core::ports::MetadataSource;

/// Mutable state of one view session
#[derive(Debug)]
struct SessionState {
    points: Vec<Point>,
    point_data: HashMap<PointId, PointMetadata>,
    strategy: ColoringStrategy,
    dimension: Option<Dimension>,
    dimension_statistics: Option<DimensionStatistics>,
    point_id_to_group: HashMap<PointId, String>,
    coloring: ColoringConfig,
    selected_point_ids: HashSet<PointId>,
    selected_cluster_id: Option<ClusterId>,
    dataset_visibility: DatasetVisibility,
    selection_display: SelectionDisplay,
    loaded_at: Option<DateTime<Utc>>,
    // Generation counters for staleness checks. `points_generation` guards
    // the metadata fetch, `dimension_generation` the statistics fetch.
    points_generation: u64,
    dimension_generation: u64,
}

impl SessionState {
    fn new(strategy: ColoringStrategy) -> Self {
        Self {
            points: Vec::new(),
            point_data: HashMap::new(),
            strategy,
            dimension: None,
            dimension_statistics: None,
            point_id_to_group: HashMap::new(),
            coloring: derive_coloring(strategy, None, None),
            selected_point_ids: HashSet::new(),
            selected_cluster_id: None,
            dataset_visibility: DatasetVisibility::default(),
            selection_display: SelectionDisplay::default(),
            loaded_at: None,
            points_generation: 0,
            dimension_generation: 0,
        }
    }

    /// Rebuild the group assignment from the current inputs
    fn recompute_groups(&mut self) {
        self.point_id_to_group = compute_groups(
            &self.points,
            self.strategy,
            &self.point_data,
            self.dimension.as_ref(),
            self.dimension_statistics.as_ref(),
        );
    }

    /// Rebuild the visibility/color maps from the current inputs
    fn recompute_coloring(&mut self) {
        self.coloring =
            derive_coloring(self.strategy, self.dimension.as_ref(), self.dimension_statistics.as_ref());
    }
}

/// Read-only view of the session state for the rendering layer
#[derive(Debug, Clone, Serialize)]
pub struct CloudSnapshot {
    pub points: Vec<Point>,
    pub strategy: ColoringStrategy,
    pub dimension: Option<Dimension>,
    pub dimension_statistics: Option<DimensionStatistics>,
    pub point_id_to_group: HashMap<PointId, String>,
    pub point_group_visibility: HashMap<String, bool>,
    pub point_group_colors: HashMap<String, Color>,
    pub selected_point_ids: HashSet<PointId>,
    pub selected_cluster_id: Option<ClusterId>,
    pub dataset_visibility: DatasetVisibility,
    pub selection_display: SelectionDisplay,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// The stateful orchestrator of one point-cloud view session.
///
/// Created once per session; all state changes go through the operation
/// set below, and every change to the grouping inputs recomputes the
/// group/visibility/color triad before the lock is released, so the
/// renderer can never observe a partially updated state.
pub struct PointCloudStore<S: MetadataSource> {
    state: RwLock<SessionState>,
    source: S,
    config: SessionConfig,
}

impl<S: MetadataSource> PointCloudStore<S> {
    /// Create a store with default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, SessionConfig::with_defaults())
    }

    /// Create a store with explicit configuration
    pub fn with_config(source: S, config: SessionConfig) -> Self {
        Self {
            state: RwLock::new(SessionState::new(config.default_strategy.value)),
            source,
            config,
        }
    }

    /// Replace the loaded point set.
    ///
    /// Selections and the metadata cache are cleared and groups recomputed
    /// immediately (typically all-unknown under the dimension strategy);
    /// rich metadata is then fetched asynchronously and committed only if no
    /// newer point set has been installed in the meantime.
    pub async fn set_points(&self, points: Vec<Point>) -> Result<()> {
        let (ids, generation) = {
            let mut state = self.state.write().unwrap();
            state.points = points;
            state.point_data.clear();
            state.selected_point_ids.clear();
            state.selected_cluster_id = None;
            state.loaded_at = Some(Utc::now());
            state.points_generation += 1;
            state.recompute_groups();
            let ids: Vec<PointId> = state.points.iter().map(|p| p.id.clone()).collect();
            (ids, state.points_generation)
        };

        tracing::debug!("fetching metadata for {} points", ids.len());
        let batch_size = self.config.metadata_batch_size.value.max(1);
        let mut fetched = HashMap::new();
        for chunk in ids.chunks(batch_size) {
            let map = self.source.fetch_point_metadata(chunk).await.map_err(|e| {
                tracing::warn!("point metadata fetch failed: {}", e);
                e
            })?;
            fetched.extend(map);
        }

        let mut state = self.state.write().unwrap();
        if state.points_generation != generation {
            tracing::debug!("discarding metadata fetched for a superseded point set");
            return Ok(());
        }
        state.point_data = fetched;
        state.recompute_groups();
        Ok(())
    }

    /// Switch the active coloring strategy.
    ///
    /// Dimension selection is strategy-scoped, so the selected dimension and
    /// its statistics are reset; any in-flight statistics fetch dies stale.
    pub fn set_coloring_strategy(&self, strategy: ColoringStrategy) {
        let mut state = self.state.write().unwrap();
        state.strategy = strategy;
        state.dimension = None;
        state.dimension_statistics = None;
        state.dimension_generation += 1;
        state.recompute_coloring();
        state.recompute_groups();
    }

    /// Select a dimension for dimension-based coloring.
    ///
    /// Statistics are fetched asynchronously; until they arrive the coloring
    /// configuration carries only the unknown group. On an invalid dimension
    /// the selection rolls back to none and the error is surfaced.
    pub async fn set_dimension(&self, dimension: Dimension) -> Result<()> {
        let generation = {
            let mut state = self.state.write().unwrap();
            state.dimension = Some(dimension.clone());
            state.dimension_statistics = None;
            state.dimension_generation += 1;
            state.recompute_coloring();
            state.recompute_groups();
            state.dimension_generation
        };

        let statistics = match self.source.fetch_dimension_statistics(&dimension).await {
            Ok(statistics) => statistics,
            Err(e) => {
                tracing::warn!("statistics fetch failed for dimension '{}': {}", dimension.name, e);
                let mut state = self.state.write().unwrap();
                if state.dimension_generation == generation {
                    state.dimension = None;
                    state.dimension_statistics = None;
                    state.recompute_coloring();
                    state.recompute_groups();
                }
                return Err(e);
            }
        };

        let mut state = self.state.write().unwrap();
        if state.dimension_generation != generation {
            tracing::debug!(
                "discarding statistics fetched for superseded dimension '{}'",
                dimension.name
            );
            return Ok(());
        }
        state.dimension_statistics = Some(statistics);
        state.recompute_coloring();
        state.recompute_groups();
        Ok(())
    }

    /// Replace the point selection
    pub fn set_selected_point_ids(&self, point_ids: Vec<PointId>) {
        let mut state = self.state.write().unwrap();
        state.selected_point_ids = point_ids.into_iter().collect();
    }

    /// Replace the cluster selection
    pub fn set_selected_cluster_id(&self, cluster_id: Option<ClusterId>) {
        let mut state = self.state.write().unwrap();
        state.selected_cluster_id = cluster_id;
    }

    /// Replace the per-dataset visibility toggles
    pub fn set_dataset_visibility(&self, visibility: DatasetVisibility) {
        let mut state = self.state.write().unwrap();
        state.dataset_visibility = visibility;
    }

    /// Replace the per-group visibility map.
    ///
    /// The map is replaced whole; derived maps are values, never patched.
    pub fn set_point_group_visibility(&self, visibility: HashMap<String, bool>) {
        let mut state = self.state.write().unwrap();
        state.coloring.visibility = visibility;
    }

    /// Switch how the selection panel displays selected points
    pub fn set_selection_display(&self, display: SelectionDisplay) {
        let mut state = self.state.write().unwrap();
        state.selection_display = display;
    }

    /// Clear points, selections, and group assignment.
    ///
    /// In-flight fetches for the cleared state die stale.
    pub fn reset(&self) {
        let mut state = self.state.write().unwrap();
        state.points.clear();
        state.point_data.clear();
        state.point_id_to_group.clear();
        state.selected_point_ids.clear();
        state.selected_cluster_id = None;
        state.dimension = None;
        state.dimension_statistics = None;
        state.loaded_at = None;
        state.points_generation += 1;
        state.dimension_generation += 1;
        state.recompute_coloring();
    }

    // Read access. Each getter clones under the read lock; the renderer
    // never holds a reference into the store.

    pub fn points(&self) -> Vec<Point> {
        self.state.read().unwrap().points.clone()
    }

    pub fn point_data(&self) -> HashMap<PointId, PointMetadata> {
        self.state.read().unwrap().point_data.clone()
    }

    pub fn coloring_strategy(&self) -> ColoringStrategy {
        self.state.read().unwrap().strategy
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.state.read().unwrap().dimension.clone()
    }

    pub fn dimension_statistics(&self) -> Option<DimensionStatistics> {
        self.state.read().unwrap().dimension_statistics.clone()
    }

    pub fn point_id_to_group(&self) -> HashMap<PointId, String> {
        self.state.read().unwrap().point_id_to_group.clone()
    }

    pub fn point_group_visibility(&self) -> HashMap<String, bool> {
        self.state.read().unwrap().coloring.visibility.clone()
    }

    pub fn point_group_colors(&self) -> HashMap<String, Color> {
        self.state.read().unwrap().coloring.colors.clone()
    }

    /// Display color for a group, falling back to the unknown sentinel for
    /// names not yet in the color map
    pub fn color_for_group(&self, group: &str) -> Color {
        self.state.read().unwrap().coloring.color_for(group)
    }

    pub fn selected_point_ids(&self) -> HashSet<PointId> {
        self.state.read().unwrap().selected_point_ids.clone()
    }

    pub fn selected_cluster_id(&self) -> Option<ClusterId> {
        self.state.read().unwrap().selected_cluster_id.clone()
    }

    pub fn dataset_visibility(&self) -> DatasetVisibility {
        self.state.read().unwrap().dataset_visibility
    }

    pub fn selection_display(&self) -> SelectionDisplay {
        self.state.read().unwrap().selection_display
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.state.read().unwrap().loaded_at
    }

    /// One coherent view of the whole session state
    pub fn snapshot(&self) -> CloudSnapshot {
        let state = self.state.read().unwrap();
        CloudSnapshot {
            points: state.points.clone(),
            strategy: state.strategy,
            dimension: state.dimension.clone(),
            dimension_statistics: state.dimension_statistics.clone(),
            point_id_to_group: state.point_id_to_group.clone(),
            point_group_visibility: state.coloring.visibility.clone(),
            point_group_colors: state.coloring.colors.clone(),
            selected_point_ids: state.selected_point_ids.clone(),
            selected_cluster_id: state.selected_cluster_id.clone(),
            dataset_visibility: state.dataset_visibility,
            selection_display: state.selection_display,
            loaded_at: state.loaded_at,
        }
    }
}
