//! Error types for Embedlens

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedlensError {
    // Fetch-boundary errors
    #[error("Dimension not found: {name}")]
    DimensionNotFound { name: String },

    #[error("Point metadata fetch failed: {reason}")]
    MetadataFetch { reason: String },

    #[error("Dimension statistics fetch failed for {dimension}: {reason}")]
    StatisticsFetch { dimension: String, reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EmbedlensError>;
