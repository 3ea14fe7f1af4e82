use serde::Serialize;
use std::fmt;

/// How many matched keys are shown before asking for confirmation.
pub const PREVIEW_LIMIT: usize = 10;
/// A progress line is printed after every this many deletions.
pub const PROGRESS_INTERVAL: usize = 100;

/// Remaining time-to-live of a key as reported by `TTL`.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Ttl {
    Expires(u64),
    Persistent,
    Missing,
}

impl From<i64> for Ttl {
    fn from(raw: i64) -> Self {
        match raw {
            -1 => Ttl::Persistent,
            secs if secs >= 0 => Ttl::Expires(secs as u64),
            _ => Ttl::Missing,
        }
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ttl::Expires(secs) => write!(f, "{}s", secs),
            Ttl::Persistent => f.write_str("no expiry"),
            Ttl::Missing => f.write_str("expired"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPreview {
    pub key: String,
    pub ttl: Ttl,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PurgeOutcome {
    NoMatches,
    Cancelled { matched: usize },
    Purged { matched: usize, deleted: usize },
}

impl PurgeOutcome {
    pub fn deleted(&self) -> usize {
        match self {
            PurgeOutcome::Purged { deleted, .. } => *deleted,
            _ => 0,
        }
    }
}
