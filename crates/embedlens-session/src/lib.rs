//! Embedlens Session - The stateful point-cloud store
//!
//! One [`store::PointCloudStore`] instance owns the mutable state of a view
//! session: the loaded points, the active coloring strategy, the lazily
//! fetched metadata cache, and the derived group/visibility/color maps the
//! renderer polls. All mutation goes through its operation set; the
//! renderer's view of the state is read-only.

pub mod store;

pub use store::{CloudSnapshot, PointCloudStore};
