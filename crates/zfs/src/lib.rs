//! ZFS integration
//!
//! This crate provides:
//! - A [`SnapshotCatalog`] backed by the `zfs` command-line tool
//! - Parsing of `zfs list` output

pub mod listing;

use snappy_core::{CatalogError, ListedSnapshot, SnapshotCatalog};
use std::path::{Path, PathBuf};
use std::process::Command;

pub use listing::parse_listing;

/// Default name of the zfs binary (resolved through `PATH`)
pub const DEFAULT_ZFS_BIN: &str = "zfs";

/// Snapshot catalog that shells out to `zfs`
#[derive(Debug, Clone)]
pub struct ZfsCli {
    binary: PathBuf,
}

impl Default for ZfsCli {
    fn default() -> Self {
        Self::new(DEFAULT_ZFS_BIN)
    }
}

impl ZfsCli {
    /// Use the given zfs binary
    pub fn new(binary: impl AsRef<Path>) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
        }
    }

    /// Run `zfs <args>` and return its stdout
    fn run(&self, args: &[&str]) -> Result<String, CatalogError> {
        let command = format!("{} {}", self.binary.display(), args.join(" "));
        tracing::trace!("Running {}", command);

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| CatalogError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CatalogError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SnapshotCatalog for ZfsCli {
    fn list(&self, dataset: &str) -> Result<Vec<ListedSnapshot>, CatalogError> {
        let stdout = self.run(&[
            "list", "-t", "snapshot", "-o", "name,used", "-H", "-p", "-s", "creation", dataset,
        ])?;
        parse_listing(&stdout)
    }

    fn create(&mut self, full_name: &str) -> Result<(), CatalogError> {
        self.run(&["snapshot", full_name]).map(|_| ())
    }

    fn rename(&mut self, old: &str, new: &str) -> Result<(), CatalogError> {
        self.run(&["rename", old, new]).map(|_| ())
    }

    fn destroy(&mut self, full_name: &str) -> Result<(), CatalogError> {
        self.run(&["destroy", full_name]).map(|_| ())
    }
}
