//! Daily snapshot creation check

use chrono::NaiveDateTime;
use snappy_core::{NameCodec, Snapshot, Tier};
use std::fmt;

/// Why no snapshot is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The newest snapshot is a daily one taken today
    AlreadyCreatedToday,
    /// The newest snapshot holds no unique data, so nothing changed since
    Unchanged,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyCreatedToday => f.write_str("daily snapshot for today already exists"),
            SkipReason::Unchanged => f.write_str("dataset unchanged since last snapshot"),
        }
    }
}

/// Result of the creation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateDecision {
    Create { full_name: String },
    Skip(SkipReason),
}

/// Decide whether a daily snapshot should be taken at `now`
///
/// Only the newest existing snapshot is consulted. This is advisory: two
/// concurrent runs can both decide to create.
pub fn decide(
    snapshots: &[Snapshot],
    dataset: &str,
    codec: &NameCodec,
    now: NaiveDateTime,
) -> CreateDecision {
    if let Some(last) = snapshots.iter().max_by_key(|s| s.timestamp()) {
        if last.tier() == Tier::Daily && last.timestamp().date() == now.date() {
            return CreateDecision::Skip(SkipReason::AlreadyCreatedToday);
        }
        if last.used_bytes == 0 {
            return CreateDecision::Skip(SkipReason::Unchanged);
        }
    }

    CreateDecision::Create {
        full_name: codec.format(dataset, now, Tier::Daily),
    }
}
