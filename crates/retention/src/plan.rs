//! Promotion/deletion planning
//!
//! Planning is a pure function of the snapshot list, the retention policy and
//! "now". Each bucket is decided on its own (one survivor, everything else
//! deleted) and the per-bucket decisions are then folded into a [`Plan`].

use crate::bucket::{self, BucketKey};
use crate::partition;
use chrono::NaiveDateTime;
use serde::Serialize;
use snappy_core::{RetentionSpec, Snapshot, Tier};
use std::collections::{BTreeMap, BTreeSet};

/// What happens to one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    /// Survivor already carrying the zone's tier
    Keep,
    /// Survivor that must be renamed to the zone's tier
    Promote { to: String },
    /// Not the survivor of its bucket
    Delete,
}

/// A tier promotion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// Outcome of one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketOutcome {
    pub tier: Tier,
    pub key: BucketKey,
    pub survivor: String,
    pub promoted_to: Option<String>,
    pub discarded: Vec<String>,
}

/// Everything a run intends to do
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    /// Names that must exist after the plan is applied
    pub keep: BTreeSet<String>,
    /// Names to destroy; never overlaps `keep` or any rename source
    pub deletes: BTreeSet<String>,
    /// Promotions, in zone then bucket order
    pub renames: Vec<Rename>,
    /// Decision per managed snapshot, by current name
    pub decisions: BTreeMap<String, Decision>,
    /// Per-bucket detail, in zone then bucket order
    pub buckets: Vec<BucketOutcome>,
}

impl Plan {
    /// True when applying the plan would change nothing
    pub fn is_noop(&self) -> bool {
        self.renames.is_empty() && self.deletes.is_empty()
    }

    /// Number of surviving snapshots
    pub fn survivors(&self) -> usize {
        self.buckets.len()
    }
}

/// Decide every member of one bucket
///
/// Exactly one member gets `Keep` or `Promote`; the rest get `Delete`.
/// Returns an empty list for an empty bucket.
pub fn decide_bucket<'a>(target: Tier, members: &[&'a Snapshot]) -> Vec<(&'a Snapshot, Decision)> {
    let Some(survivor) = bucket::best(target, members) else {
        return Vec::new();
    };

    members
        .iter()
        .map(|snap| {
            let decision = if snap.full_name != survivor.full_name {
                Decision::Delete
            } else if snap.tier() != target {
                Decision::Promote {
                    to: snap.promoted_name(target),
                }
            } else {
                Decision::Keep
            };
            (*snap, decision)
        })
        .collect()
}

/// Build the retention plan for a set of managed snapshots
pub fn plan(snapshots: &[Snapshot], spec: &RetentionSpec, now: NaiveDateTime) -> Plan {
    let mut result = Plan::default();

    if snapshots.is_empty() {
        tracing::debug!("No snapshots to retain/prune");
        return result;
    }

    let windows = spec.windows();
    tracing::trace!("Daily window:   0-{} days", windows.daily);
    tracing::trace!("Weekly window:  {}-{} days", windows.daily + 1, windows.weekly);
    tracing::trace!("Monthly window: {}-{} days", windows.weekly + 1, windows.monthly);
    tracing::trace!(
        "Yearly window:  {}+ days (yearly count reaches {} days)",
        windows.monthly + 1,
        windows.yearly
    );

    let mut sorted: Vec<Snapshot> = snapshots.to_vec();
    sorted.sort_by(|a, b| a.timestamp().cmp(&b.timestamp()));

    let zones = partition::partition(&sorted, &windows, now);
    let mut discarded: BTreeSet<String> = BTreeSet::new();

    for (tier, members) in &zones {
        tracing::info!("Processing {} tier ({} snapshots)", tier, members.len());

        for (key, group) in bucket::group(*tier, members) {
            let mut outcome: Option<BucketOutcome> = None;
            let mut losers = Vec::new();

            for (snap, decision) in decide_bucket(*tier, &group) {
                match &decision {
                    Decision::Keep => {
                        result.keep.insert(snap.full_name.clone());
                        outcome = Some(survivor_outcome(*tier, key, snap, None));
                    }
                    Decision::Promote { to } => {
                        tracing::info!("Promote {} → {}", snap.full_name, to);
                        result.keep.insert(snap.full_name.clone());
                        result.keep.insert(to.clone());
                        result.renames.push(Rename {
                            from: snap.full_name.clone(),
                            to: to.clone(),
                        });
                        outcome = Some(survivor_outcome(*tier, key, snap, Some(to.clone())));
                    }
                    Decision::Delete => {
                        discarded.insert(snap.full_name.clone());
                        losers.push(snap.full_name.clone());
                    }
                }
                result.decisions.insert(snap.full_name.clone(), decision);
            }

            if let Some(mut outcome) = outcome {
                tracing::debug!(
                    "{} {}: {} snaps → keeping {}",
                    tier,
                    key,
                    group.len(),
                    outcome.survivor
                );
                outcome.discarded = losers;
                result.buckets.push(outcome);
            }
        }
    }

    let rename_sources: BTreeSet<&String> = result.renames.iter().map(|r| &r.from).collect();
    result.deletes = discarded
        .into_iter()
        .filter(|name| !result.keep.contains(name) && !rename_sources.contains(name))
        .collect();

    result
}

fn survivor_outcome(
    tier: Tier,
    key: BucketKey,
    snap: &Snapshot,
    promoted_to: Option<String>,
) -> BucketOutcome {
    BucketOutcome {
        tier,
        key,
        survivor: snap.full_name.clone(),
        promoted_to,
        discarded: Vec::new(),
    }
}
