//! Core types for snappy
//!
//! This crate provides:
//! - Retention tiers and per-dataset retention policies
//! - The snapshot naming codec (`prefix-YYYY-MM-DD_HH:MM:SS_tier`)
//! - sanoid.conf-compatible configuration loading
//! - The snapshot catalog interface and an in-memory implementation

pub mod catalog;
pub mod config;
pub mod memory;
pub mod policy;
pub mod snapshot;
pub mod tier;

// Re-exports
pub use catalog::{CatalogError, ListedSnapshot, SnapshotCatalog};
pub use config::{ConfigError, SanoidConfig, DEFAULT_CONFIG_PATH};
pub use memory::{CatalogCall, MemoryCatalog};
pub use policy::{RetentionSpec, Windows, DEFAULT_PREFIX};
pub use snapshot::{format_name, parse_timestamp, NameCodec, NameError, Snapshot, SnapshotName};
pub use tier::Tier;
