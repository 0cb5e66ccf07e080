//! Retention tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Retention tier of a managed snapshot
///
/// The tier is carried as the last `_`-separated component of the snapshot
/// name and selects the calendar granularity used when bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// One survivor per calendar day
    Daily,
    /// One survivor per ISO week
    Weekly,
    /// One survivor per calendar month
    Monthly,
    /// One survivor per calendar year
    Yearly,
}

impl Tier {
    /// All tiers, youngest zone first
    pub const ALL: [Tier; 4] = [Tier::Daily, Tier::Weekly, Tier::Monthly, Tier::Yearly];

    /// Literal used in snapshot names
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Daily => "daily",
            Tier::Weekly => "weekly",
            Tier::Monthly => "monthly",
            Tier::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four tier literals
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tier: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Tier::Daily),
            "weekly" => Ok(Tier::Weekly),
            "monthly" => Ok(Tier::Monthly),
            "yearly" => Ok(Tier::Yearly),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}
