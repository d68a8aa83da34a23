//! Voter profile - heuristic tracking state for one voter

use chrono::{DateTime, Utc};

use crate::value_objects::Handle;

/// Statistics aggregated from the ledger for one voter.
///
/// Computed by the vote store on demand; the heuristic engine folds
/// these into the persisted `VoterProfile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoterStats {
    pub total: i64,
    pub downvotes: i64,
    pub last_hour: i64,
    pub last_day: i64,
    pub first_vote_at: Option<DateTime<Utc>>,
}

impl VoterStats {
    /// Down / total, 0.0 when the voter has no votes
    #[must_use]
    pub fn downvote_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.downvotes as f64 / self.total as f64
        }
    }
}

/// Voter profile entity
///
/// Upserted by the heuristic engine after every non-clear vote. The
/// flag fields (`flagged`, `flag_reason`, `flagged_at`) freeze once
/// `reviewed` is set; only admin remediation may touch them afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VoterProfile {
    pub voter: Handle,
    pub total_votes: i64,
    pub votes_last_hour: i64,
    pub votes_last_day: i64,
    pub downvote_ratio: f64,
    pub first_vote_at: Option<DateTime<Utc>>,
    pub last_vote_at: Option<DateTime<Utc>>,
    pub flagged: bool,
    pub flag_reason: Option<String>,
    pub flagged_at: Option<DateTime<Utc>>,
    pub reviewed: bool,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl VoterProfile {
    /// Create an empty profile for a previously unseen voter
    pub fn new(voter: Handle) -> Self {
        Self {
            voter,
            total_votes: 0,
            votes_last_hour: 0,
            votes_last_day: 0,
            downvote_ratio: 0.0,
            first_vote_at: None,
            last_vote_at: None,
            flagged: false,
            flag_reason: None,
            flagged_at: None,
            reviewed: false,
            reviewed_at: None,
        }
    }

    /// Flagged and not yet cleared by an admin
    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.flagged && !self.reviewed
    }

    /// Fold fresh ledger statistics into the profile
    pub fn update_stats(&mut self, stats: &VoterStats, now: DateTime<Utc>) {
        self.total_votes = stats.total;
        self.votes_last_hour = stats.last_hour;
        self.votes_last_day = stats.last_day;
        self.downvote_ratio = stats.downvote_ratio();
        self.first_vote_at = stats.first_vote_at;
        self.last_vote_at = Some(now);
    }
}
