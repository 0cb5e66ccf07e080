//! Interface to the system that actually stores snapshots

/// One row of a snapshot listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedSnapshot {
    /// `dataset@snapname`
    pub full_name: String,
    /// Bytes referenced only by this snapshot
    pub used_bytes: u64,
}

impl ListedSnapshot {
    pub fn new(full_name: impl Into<String>, used_bytes: u64) -> Self {
        Self {
            full_name: full_name.into(),
            used_bytes,
        }
    }
}

/// Failure of an external snapshot operation
///
/// Every variant is fatal for the current run; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected listing line: {line:?}")]
    MalformedListing { line: String },

    #[error("{operation} {name} rejected: {reason}")]
    Rejected {
        operation: String,
        name: String,
        reason: String,
    },
}

/// Snapshot storage backend
///
/// Calls are blocking and either complete or fail as a whole.
pub trait SnapshotCatalog {
    /// List snapshots of `dataset`, oldest first
    fn list(&self, dataset: &str) -> Result<Vec<ListedSnapshot>, CatalogError>;

    /// Create a snapshot with the given full name
    fn create(&mut self, full_name: &str) -> Result<(), CatalogError>;

    /// Rename a snapshot
    fn rename(&mut self, old: &str, new: &str) -> Result<(), CatalogError>;

    /// Destroy a snapshot
    fn destroy(&mut self, full_name: &str) -> Result<(), CatalogError>;
}
