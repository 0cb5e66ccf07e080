//! Age zones
//!
//! Every snapshot falls into exactly one zone:
//!
//! ```text
//! daily    age <= daily_window
//! weekly   daily_window   < age <= weekly_window
//! monthly  weekly_window  < age <= monthly_window
//! yearly   age > monthly_window
//! ```

use chrono::NaiveDateTime;
use snappy_core::{Snapshot, Tier, Windows};
use std::collections::BTreeMap;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days elapsed between `ts` and `now`, rounded down
///
/// Timestamps in the future give a negative age.
pub fn age_days(ts: NaiveDateTime, now: NaiveDateTime) -> i64 {
    (now - ts).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Zone a snapshot of the given age belongs to
pub fn zone_for_age(age: i64, windows: &Windows) -> Tier {
    if age <= windows.daily {
        Tier::Daily
    } else if age <= windows.weekly {
        Tier::Weekly
    } else if age <= windows.monthly {
        Tier::Monthly
    } else {
        Tier::Yearly
    }
}

/// Split snapshots into their zones
///
/// All four tiers are present in the result, possibly with no members.
/// Members keep their input order.
pub fn partition<'a>(
    snapshots: &'a [Snapshot],
    windows: &Windows,
    now: NaiveDateTime,
) -> BTreeMap<Tier, Vec<&'a Snapshot>> {
    let mut zones: BTreeMap<Tier, Vec<&'a Snapshot>> =
        Tier::ALL.iter().map(|tier| (*tier, Vec::new())).collect();

    for snap in snapshots {
        let zone = zone_for_age(age_days(snap.timestamp(), now), windows);
        zones.entry(zone).or_default().push(snap);
    }

    zones
}
