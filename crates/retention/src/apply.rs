//! Plan execution
//!
//! Renames run before deletes. Every operation is reported to the
//! [`OperationLog`] before it is issued, so a failing call still shows up
//! as the last line. In dry-run mode nothing reaches the catalog.

use crate::plan::Plan;
use anyhow::{Context, Result};
use snappy_core::SnapshotCatalog;
use std::fmt;

/// A mutating catalog call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create(String),
    Rename { from: String, to: String },
    Destroy(String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create(name) => write!(f, "CREATE {}", name),
            Operation::Rename { from, to } => write!(f, "RENAME {} → {}", from, to),
            Operation::Destroy(name) => write!(f, "DELETE {}", name),
        }
    }
}

/// Audit line for an operation
pub fn describe(op: &Operation, dry_run: bool) -> String {
    if dry_run {
        format!("[DRY] {}", op)
    } else {
        op.to_string()
    }
}

/// Receives every operation just before it is issued
pub trait OperationLog {
    fn record(&mut self, op: &Operation, dry_run: bool);
}

impl OperationLog for Vec<String> {
    fn record(&mut self, op: &Operation, dry_run: bool) {
        self.push(describe(op, dry_run));
    }
}

/// Counts of operations issued (or, in dry-run mode, announced)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub renamed: usize,
    pub destroyed: usize,
}

/// Issues operations against a catalog
pub struct Applier<'a> {
    catalog: &'a mut dyn SnapshotCatalog,
    log: &'a mut dyn OperationLog,
    dry_run: bool,
}

impl<'a> Applier<'a> {
    pub fn new(
        catalog: &'a mut dyn SnapshotCatalog,
        log: &'a mut dyn OperationLog,
        dry_run: bool,
    ) -> Self {
        Self {
            catalog,
            log,
            dry_run,
        }
    }

    /// Create a snapshot
    pub fn create(&mut self, full_name: &str) -> Result<()> {
        let op = Operation::Create(full_name.to_string());
        self.log.record(&op, self.dry_run);
        if self.dry_run {
            return Ok(());
        }
        self.catalog
            .create(full_name)
            .with_context(|| format!("Failed to create snapshot {}", full_name))
    }

    /// Apply a plan: promotions first, then deletions
    ///
    /// Stops at the first failing call; operations already issued stay done.
    pub fn apply(&mut self, plan: &Plan) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();

        tracing::info!("Executing promotions");
        for rename in &plan.renames {
            if rename.from == rename.to || plan.deletes.contains(&rename.from) {
                continue;
            }
            let op = Operation::Rename {
                from: rename.from.clone(),
                to: rename.to.clone(),
            };
            self.log.record(&op, self.dry_run);
            if !self.dry_run {
                self.catalog
                    .rename(&rename.from, &rename.to)
                    .with_context(|| format!("Failed to rename {} to {}", rename.from, rename.to))?;
            }
            report.renamed += 1;
        }

        tracing::info!("Executing deletions");
        for name in &plan.deletes {
            if plan.keep.contains(name) {
                continue;
            }
            let op = Operation::Destroy(name.clone());
            self.log.record(&op, self.dry_run);
            if !self.dry_run {
                self.catalog
                    .destroy(name)
                    .with_context(|| format!("Failed to destroy {}", name))?;
            }
            report.destroyed += 1;
        }

        tracing::info!("Retention processing finished");
        Ok(report)
    }
}
