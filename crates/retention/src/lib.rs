//! Tiered retention engine
//!
//! This crate provides:
//! - Age zones derived from per-tier retention counts
//! - Calendar bucketing (day / ISO week / month / year) and survivor selection
//! - Promotion/deletion planning
//! - The daily snapshot creation check
//! - Plan execution against a snapshot catalog

pub mod apply;
pub mod bucket;
pub mod creator;
pub mod partition;
pub mod plan;
pub mod session;

// Re-exports
pub use apply::{Applier, ApplyReport, Operation, OperationLog};
pub use bucket::BucketKey;
pub use creator::{CreateDecision, SkipReason};
pub use plan::{BucketOutcome, Decision, Plan, Rename};
pub use session::{load_snapshots, run, RunOptions, RunSummary};

/// Result type for retention operations
pub type Result<T> = anyhow::Result<T>;
