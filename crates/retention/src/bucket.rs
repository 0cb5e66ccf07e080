//! Calendar bucketing and survivor selection

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use snappy_core::{Snapshot, Tier};
use std::collections::BTreeMap;
use std::fmt;

/// Calendar period a snapshot is grouped under within its zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BucketKey {
    /// Calendar date
    Day(NaiveDate),
    /// ISO 8601 week (Monday start, week 1 holds the first Thursday)
    Week { year: i32, week: u32 },
    /// Calendar month
    Month { year: i32, month: u32 },
    /// Calendar year
    Year(i32),
}

impl BucketKey {
    /// Bucket of `ts` at the granularity of `tier`
    pub fn for_tier(tier: Tier, ts: NaiveDateTime) -> Self {
        match tier {
            Tier::Daily => BucketKey::Day(ts.date()),
            Tier::Weekly => {
                let iso = ts.iso_week();
                BucketKey::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Tier::Monthly => BucketKey::Month {
                year: ts.year(),
                month: ts.month(),
            },
            Tier::Yearly => BucketKey::Year(ts.year()),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            BucketKey::Week { year, week } => write!(f, "{}-W{:02}", year, week),
            BucketKey::Month { year, month } => write!(f, "{}-{:02}", year, month),
            BucketKey::Year(year) => write!(f, "{}", year),
        }
    }
}

impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Group zone members by their bucket at `tier` granularity
pub fn group<'a>(
    tier: Tier,
    members: &[&'a Snapshot],
) -> BTreeMap<BucketKey, Vec<&'a Snapshot>> {
    let mut buckets: BTreeMap<BucketKey, Vec<&'a Snapshot>> = BTreeMap::new();
    for &snap in members {
        buckets
            .entry(BucketKey::for_tier(tier, snap.timestamp()))
            .or_default()
            .push(snap);
    }
    buckets
}

/// Pick the snapshot worth keeping from a bucket of the `target` tier
///
/// Largest `used_bytes` wins, then the newest timestamp, then a member
/// already named for `target`, then the greater name. Two names for the same
/// instant differ only in their tier suffix, so the survivor's promoted name
/// never collides with another member. The result does not depend on input
/// order. `None` only for an empty group.
pub fn best<'a>(target: Tier, group: &[&'a Snapshot]) -> Option<&'a Snapshot> {
    group
        .iter()
        .copied()
        .max_by(|a, b| {
            (a.used_bytes, a.timestamp(), a.tier() == target, &a.full_name).cmp(&(
                b.used_bytes,
                b.timestamp(),
                b.tier() == target,
                &b.full_name,
            ))
        })
}
