//! Vote ledger entry - the single current vote of one voter on one clip

use chrono::{DateTime, Utc};

use crate::value_objects::{Handle, VoteDirection};

/// Key identifying a ledger row: at most one entry exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoteKey {
    pub channel_login: Handle,
    pub clip_id: String,
    pub voter: Handle,
}

impl VoteKey {
    /// Create a new vote key
    pub fn new(channel_login: Handle, clip_id: impl Into<String>, voter: Handle) -> Self {
        Self {
            channel_login,
            clip_id: clip_id.into(),
            voter,
        }
    }
}

/// Vote ledger entry
///
/// A vote "change" overwrites the direction in place; it never creates
/// a second row for the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteLedgerEntry {
    pub channel_login: Handle,
    pub clip_id: String,
    pub voter: Handle,
    pub direction: VoteDirection,
    pub voted_at: DateTime<Utc>,
}

impl VoteLedgerEntry {
    /// Create a fresh entry for a key
    pub fn new(key: &VoteKey, direction: VoteDirection, voted_at: DateTime<Utc>) -> Self {
        Self {
            channel_login: key.channel_login.clone(),
            clip_id: key.clip_id.clone(),
            voter: key.voter.clone(),
            direction,
            voted_at,
        }
    }

    /// The key this entry is stored under
    pub fn key(&self) -> VoteKey {
        VoteKey {
            channel_login: self.channel_login.clone(),
            clip_id: self.clip_id.clone(),
            voter: self.voter.clone(),
        }
    }
}
