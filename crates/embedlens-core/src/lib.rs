//! Embedlens Core - Domain models, pure grouping engines, and port definitions
//!
//! This crate contains the coloring/grouping engine for the embedding point
//! cloud: interval bucketing, palettes, group assignment, and the async port
//! through which point metadata and dimension statistics are fetched.

pub mod color;
pub mod config;
pub mod error;
pub mod grouping;
pub mod interval;
pub mod models;
pub mod ports;

pub use error::{EmbedlensError, Result};
