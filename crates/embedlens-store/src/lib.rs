//! Embedlens Store - Metadata source implementations
//!
//! Backends for the [`embedlens_core::ports::MetadataSource`] port. The
//! in-memory backend here serves development and tests; production
//! deployments implement the port against their own query layer.

pub mod memory;

pub use memory::MemoryMetadataSource;
