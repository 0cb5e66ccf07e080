//! In-memory snapshot catalog
//!
//! Behaves like a single-dataset-aware snapshot store without touching any
//! real filesystem. Every mutating call is recorded so callers can check
//! exactly what was issued and in which order.

use crate::catalog::{CatalogError, ListedSnapshot, SnapshotCatalog};
use std::cell::Cell;

/// A mutating call received by [`MemoryCatalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogCall {
    Create(String),
    Rename { from: String, to: String },
    Destroy(String),
}

/// Snapshot catalog held in memory
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    snapshots: Vec<ListedSnapshot>,
    calls: Vec<CatalogCall>,
    fail_on: Option<String>,
    list_count: Cell<usize>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing snapshots, oldest first
    pub fn with_snapshots(snapshots: impl IntoIterator<Item = ListedSnapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Make any mutating call targeting `full_name` fail
    pub fn fail_on(&mut self, full_name: impl Into<String>) {
        self.fail_on = Some(full_name.into());
    }

    /// Names currently present
    pub fn names(&self) -> Vec<&str> {
        self.snapshots.iter().map(|s| s.full_name.as_str()).collect()
    }

    /// Mutating calls received so far
    pub fn calls(&self) -> &[CatalogCall] {
        &self.calls
    }

    /// Number of `list` calls served
    pub fn list_count(&self) -> usize {
        self.list_count.get()
    }

    fn check(&self, operation: &str, name: &str) -> Result<(), CatalogError> {
        if self.fail_on.as_deref() == Some(name) {
            return Err(CatalogError::Rejected {
                operation: operation.to_string(),
                name: name.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn position(&self, operation: &str, name: &str) -> Result<usize, CatalogError> {
        self.snapshots
            .iter()
            .position(|s| s.full_name == name)
            .ok_or_else(|| CatalogError::Rejected {
                operation: operation.to_string(),
                name: name.to_string(),
                reason: "dataset does not exist".to_string(),
            })
    }
}

impl SnapshotCatalog for MemoryCatalog {
    fn list(&self, dataset: &str) -> Result<Vec<ListedSnapshot>, CatalogError> {
        self.list_count.set(self.list_count.get() + 1);
        let prefix = format!("{}@", dataset);
        Ok(self
            .snapshots
            .iter()
            .filter(|s| s.full_name.starts_with(&prefix))
            .cloned()
            .collect())
    }

    fn create(&mut self, full_name: &str) -> Result<(), CatalogError> {
        self.calls.push(CatalogCall::Create(full_name.to_string()));
        self.check("create", full_name)?;
        if self.snapshots.iter().any(|s| s.full_name == full_name) {
            return Err(CatalogError::Rejected {
                operation: "create".to_string(),
                name: full_name.to_string(),
                reason: "dataset already exists".to_string(),
            });
        }
        self.snapshots.push(ListedSnapshot::new(full_name, 0));
        Ok(())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<(), CatalogError> {
        self.calls.push(CatalogCall::Rename {
            from: old.to_string(),
            to: new.to_string(),
        });
        self.check("rename", old)?;
        let idx = self.position("rename", old)?;
        if self.snapshots.iter().any(|s| s.full_name == new) {
            return Err(CatalogError::Rejected {
                operation: "rename".to_string(),
                name: new.to_string(),
                reason: "dataset already exists".to_string(),
            });
        }
        self.snapshots[idx].full_name = new.to_string();
        Ok(())
    }

    fn destroy(&mut self, full_name: &str) -> Result<(), CatalogError> {
        self.calls.push(CatalogCall::Destroy(full_name.to_string()));
        self.check("destroy", full_name)?;
        let idx = self.position("destroy", full_name)?;
        self.snapshots.remove(idx);
        Ok(())
    }
}
