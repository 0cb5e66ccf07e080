//! Snapshot records and the naming codec
//!
//! Managed snapshots are named `{dataset}@{prefix}-{YYYY-MM-DD}_{HH:MM:SS}_{tier}`.
//! The timestamp is fixed at creation; promotion only swaps the tier suffix.
//! Anything that does not match this grammar for the configured prefix is
//! a foreign snapshot and is left alone.

use crate::tier::Tier;
use chrono::NaiveDateTime;
use regex::Regex;

/// Format of the timestamp component of a snapshot name
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H:%M:%S";

/// Shape of a timestamp: `d` is an ASCII digit, anything else is literal
const TIMESTAMP_SHAPE: &[u8; 19] = b"dddd-dd-dd_dd:dd:dd";

/// Errors produced while decoding snapshot names
#[derive(Debug, thiserror::Error)]
pub enum NameError {
    #[error("Not a managed snapshot name: {name}")]
    NotOurs { name: String },

    #[error("Malformed timestamp: {value}")]
    MalformedTimestamp { value: String },

    #[error("Invalid snapshot prefix '{prefix}': {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: regex::Error,
    },
}

/// Parse the timestamp component of a snapshot name
///
/// Only `YYYY-MM-DD_HH:MM:SS` with every field zero-padded is accepted.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, NameError> {
    let malformed = || NameError::MalformedTimestamp {
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    if bytes.len() != TIMESTAMP_SHAPE.len() {
        return Err(malformed());
    }
    let shape_ok = bytes.iter().zip(TIMESTAMP_SHAPE.iter()).all(|(b, s)| match s {
        b'd' => b.is_ascii_digit(),
        literal => b == literal,
    });
    if !shape_ok {
        return Err(malformed());
    }

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| malformed())
}

/// Format a full snapshot name (`dataset@prefix-timestamp_tier`)
pub fn format_name(dataset: &str, prefix: &str, timestamp: NaiveDateTime, tier: Tier) -> String {
    format!(
        "{}@{}-{}_{}",
        dataset,
        prefix,
        timestamp.format(TIMESTAMP_FORMAT),
        tier
    )
}

/// Decoded structure of a managed snapshot name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotName {
    pub dataset: String,
    pub prefix: String,
    pub timestamp: NaiveDateTime,
    pub tier: Tier,
}

impl SnapshotName {
    /// Render back to `dataset@prefix-timestamp_tier`
    pub fn full_name(&self) -> String {
        format_name(&self.dataset, &self.prefix, self.timestamp, self.tier)
    }

    /// Same snapshot under a different tier suffix
    pub fn with_tier(&self, tier: Tier) -> SnapshotName {
        SnapshotName {
            tier,
            ..self.clone()
        }
    }
}

/// A managed snapshot as seen in one listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub name: SnapshotName,
    pub full_name: String,
    /// Bytes referenced only by this snapshot
    pub used_bytes: u64,
}

impl Snapshot {
    pub fn new(name: SnapshotName, used_bytes: u64) -> Self {
        let full_name = name.full_name();
        Self {
            name,
            full_name,
            used_bytes,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.name.timestamp
    }

    pub fn tier(&self) -> Tier {
        self.name.tier
    }

    /// Full name this snapshot would carry after promotion to `tier`
    pub fn promoted_name(&self, tier: Tier) -> String {
        self.name.with_tier(tier).full_name()
    }
}

/// Parser/formatter for one snapshot prefix
#[derive(Debug, Clone)]
pub struct NameCodec {
    prefix: String,
    pattern: Regex,
}

impl NameCodec {
    /// Build a codec for `prefix`; the prefix is matched literally
    pub fn new(prefix: &str) -> Result<Self, NameError> {
        let source = format!(
            r"^{}-([0-9]{{4}}-[0-9]{{2}}-[0-9]{{2}}_[0-9]{{2}}:[0-9]{{2}}:[0-9]{{2}})_(daily|weekly|monthly|yearly)$",
            regex::escape(prefix)
        );
        let pattern = Regex::new(&source).map_err(|source| NameError::InvalidPrefix {
            prefix: prefix.to_string(),
            source,
        })?;

        Ok(Self {
            prefix: prefix.to_string(),
            pattern,
        })
    }

    /// Decode a full snapshot name
    pub fn parse_name(&self, full_name: &str) -> Result<SnapshotName, NameError> {
        let not_ours = || NameError::NotOurs {
            name: full_name.to_string(),
        };

        let (dataset, snapname) = full_name.split_once('@').ok_or_else(not_ours)?;
        let caps = self.pattern.captures(snapname).ok_or_else(not_ours)?;

        let timestamp = parse_timestamp(&caps[1])?;
        let tier = caps[2].parse::<Tier>().map_err(|_| not_ours())?;

        Ok(SnapshotName {
            dataset: dataset.to_string(),
            prefix: self.prefix.clone(),
            timestamp,
            tier,
        })
    }

    /// Classify a listed snapshot, returning `None` for foreign names
    pub fn parse(&self, full_name: &str, used_bytes: u64) -> Option<Snapshot> {
        match self.parse_name(full_name) {
            Ok(name) => Some(Snapshot::new(name, used_bytes)),
            Err(err) => {
                tracing::trace!("Ignoring foreign snapshot {}: {}", full_name, err);
                None
            }
        }
    }

    /// Format a name for `dataset` with this codec's prefix
    pub fn format(&self, dataset: &str, timestamp: NaiveDateTime, tier: Tier) -> String {
        format_name(dataset, &self.prefix, timestamp, tier)
    }
}
