//! Retention policy configuration

use serde::Serialize;

/// Snapshot prefix used when the configuration does not name one
pub const DEFAULT_PREFIX: &str = "snappy";

/// Per-tier retention counts for one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionSpec {
    /// Days kept at daily granularity
    pub daily: u32,
    /// Weeks kept at weekly granularity
    pub weekly: u32,
    /// Months (30 days each) kept at monthly granularity
    pub monthly: u32,
    /// Years (365 days each) kept at yearly granularity
    pub yearly: u32,
    /// Prefix of managed snapshot names
    pub prefix: String,
}

impl Default for RetentionSpec {
    fn default() -> Self {
        Self {
            daily: 0,
            weekly: 0,
            monthly: 0,
            yearly: 0,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

/// Cumulative age boundaries (in days) derived from a [`RetentionSpec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Windows {
    pub daily: i64,
    pub weekly: i64,
    pub monthly: i64,
    pub yearly: i64,
}

impl RetentionSpec {
    /// Compute the window boundaries
    ///
    /// Each tier's window starts where the previous one ends, so a zero
    /// count yields a zero-width window.
    pub fn windows(&self) -> Windows {
        let daily = i64::from(self.daily);
        let weekly = daily + i64::from(self.weekly) * 7;
        let monthly = weekly + i64::from(self.monthly) * 30;
        let yearly = monthly + i64::from(self.yearly) * 365;

        Windows {
            daily,
            weekly,
            monthly,
            yearly,
        }
    }
}
