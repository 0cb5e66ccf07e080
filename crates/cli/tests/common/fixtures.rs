//! Test fixtures: a scratch directory with a stand-in `zfs` and a config file
//!
//! The fake `zfs` prints a canned listing for `zfs list`, appends new rows
//! on `zfs snapshot`, applies renames and destroys to that listing, and
//! records every invocation in `calls`. Listing and destroys can be made to
//! fail.

use super::cli::SnappyCommand;
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

const FAKE_ZFS: &str = r#"#!/bin/sh
dir="$(dirname "$0")"
echo "$*" >> "$dir/calls"
case "$1" in
  list)
    [ -f "$dir/fail_list" ] && { echo "cannot open dataset" >&2; exit 1; }
    cat "$dir/listing"
    ;;
  snapshot)
    printf '%s\t0\n' "$2" >> "$dir/listing"
    ;;
  rename)
    awk -F '\t' -v OFS='\t' -v a="$2" -v b="$3" '$1 == a { $1 = b } { print }' \
      "$dir/listing" > "$dir/listing.tmp" && mv "$dir/listing.tmp" "$dir/listing"
    ;;
  destroy)
    [ -f "$dir/fail_destroy" ] && { echo "cannot destroy '$2': dataset is busy" >&2; exit 1; }
    awk -F '\t' -v n="$2" '$1 != n' "$dir/listing" > "$dir/listing.tmp" && mv "$dir/listing.tmp" "$dir/listing"
    ;;
esac
exit 0
"#;

pub const DATASET: &str = "tank/data";

/// Scratch project with a fake zfs binary
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    /// Create a project with an empty listing
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("Failed to create temp dir")?;
        let zfs = dir.path().join("zfs");
        fs::write(&zfs, FAKE_ZFS)?;
        fs::set_permissions(&zfs, fs::Permissions::from_mode(0o755))?;
        fs::write(dir.path().join("listing"), "")?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn zfs_bin(&self) -> String {
        self.path().join("zfs").display().to_string()
    }

    /// Write `sanoid.conf` and return its path
    pub fn write_config(&self, text: &str) -> Result<String> {
        let path = self.path().join("sanoid.conf");
        fs::write(&path, text)?;
        Ok(path.display().to_string())
    }

    /// Replace the listing with `(name, used)` rows
    pub fn set_listing(&self, rows: &[(String, u64)]) -> Result<()> {
        let text: String = rows
            .iter()
            .map(|(name, used)| format!("{}\t{}\n", name, used))
            .collect();
        fs::write(self.path().join("listing"), text)?;
        Ok(())
    }

    /// Make every `zfs destroy` fail
    pub fn fail_destroys(&self) -> Result<()> {
        fs::write(self.path().join("fail_destroy"), "")?;
        Ok(())
    }

    /// Make `zfs list` fail
    pub fn fail_listing(&self) -> Result<()> {
        fs::write(self.path().join("fail_list"), "")?;
        Ok(())
    }

    /// Snapshot names currently in the listing
    pub fn listed_names(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("listing"))
            .map(|text| {
                text.lines()
                    .filter_map(|line| line.split('\t').next())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every zfs invocation, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.path().join("calls"))
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// zfs invocations other than `list`
    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| !call.starts_with("list "))
            .collect()
    }

    /// `snappy [extra...] tank/data` against this project's config and zfs
    pub fn snappy(&self, extra: &[&str]) -> SnappyCommand {
        let conf = self.path().join("sanoid.conf").display().to_string();
        let zfs_bin = self.zfs_bin();
        let mut cmd = SnappyCommand::new(self.path());
        cmd.args(&["--conf", conf.as_str(), "--zfs-bin", zfs_bin.as_str()]);
        cmd.args(extra);
        cmd.args(&[DATASET]);
        cmd
    }
}

/// Local wall-clock time, as snappy sees it
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Managed snapshot name taken `days_ago` days before now
pub fn snap_name(prefix: &str, days_ago: i64, tier: &str) -> String {
    let ts = local_now() - Duration::days(days_ago);
    format!("{}@{}-{}_{}", DATASET, prefix, ts.format("%Y-%m-%d_%H:%M:%S"), tier)
}
