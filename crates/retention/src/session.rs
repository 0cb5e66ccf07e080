//! One retention run against a dataset
//!
//! list → (optional) create → re-list → plan → apply

use crate::apply::{Applier, ApplyReport, OperationLog};
use crate::creator::{self, CreateDecision, SkipReason};
use crate::plan::{self, Plan};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use snappy_core::{NameCodec, RetentionSpec, Snapshot, SnapshotCatalog};

/// Switches for a run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Take today's daily snapshot first, if needed
    pub create: bool,
    /// Announce operations without issuing them
    pub dry_run: bool,
}

/// What a run did
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Name of the snapshot created (or announced, in dry-run mode)
    pub created: Option<String>,
    /// Why creation was skipped, when it was requested
    pub skipped: Option<SkipReason>,
    /// Managed snapshots the plan was computed from
    pub managed: usize,
    /// Unique bytes held by the snapshots scheduled for deletion
    pub deleted_bytes: u64,
    pub plan: Plan,
    pub report: ApplyReport,
}

/// List and decode the managed snapshots of `dataset`, oldest first
///
/// Foreign snapshots are dropped.
pub fn load_snapshots(
    catalog: &dyn SnapshotCatalog,
    dataset: &str,
    codec: &NameCodec,
) -> Result<Vec<Snapshot>> {
    let listed = catalog
        .list(dataset)
        .with_context(|| format!("Failed to list snapshots of {}", dataset))?;

    let mut snapshots: Vec<Snapshot> = listed
        .iter()
        .filter_map(|entry| codec.parse(&entry.full_name, entry.used_bytes))
        .collect();
    snapshots.sort_by(|a, b| a.timestamp().cmp(&b.timestamp()));

    tracing::debug!(
        "Found {} managed snapshots on {} ({} listed)",
        snapshots.len(),
        dataset,
        listed.len()
    );
    Ok(snapshots)
}

/// Run retention for one dataset at `now`
pub fn run(
    catalog: &mut dyn SnapshotCatalog,
    log: &mut dyn OperationLog,
    dataset: &str,
    spec: &RetentionSpec,
    options: RunOptions,
    now: NaiveDateTime,
) -> Result<RunSummary> {
    let codec = NameCodec::new(&spec.prefix)?;

    // 1. Load existing snapshots
    let mut snapshots = load_snapshots(catalog, dataset, &codec)?;

    // 2. Take today's snapshot if asked to
    let mut created = None;
    let mut skipped = None;
    if options.create {
        tracing::info!("Creating daily snapshot (if necessary)");
        match creator::decide(&snapshots, dataset, &codec, now) {
            CreateDecision::Create { full_name } => {
                Applier::new(catalog, log, options.dry_run).create(&full_name)?;
                created = Some(full_name);
            }
            CreateDecision::Skip(reason) => {
                tracing::info!("Skipped creation: {}", reason);
                skipped = Some(reason);
            }
        }

        // Refresh after creation
        snapshots = load_snapshots(catalog, dataset, &codec)?;
    }

    // 3. Plan
    tracing::info!("Applying retention policy");
    let plan = plan::plan(&snapshots, spec, now);
    let deleted_bytes: u64 = snapshots
        .iter()
        .filter(|s| plan.deletes.contains(&s.full_name))
        .map(|s| s.used_bytes)
        .sum();

    // 4. Apply
    let report = Applier::new(catalog, log, options.dry_run).apply(&plan)?;

    Ok(RunSummary {
        created,
        skipped,
        managed: snapshots.len(),
        deleted_bytes,
        plan,
        report,
    })
}
