//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL for deployment, in-memory
//! for tests and local development).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AggregateCount, Clip, RateLimitDecision, VoteKey, VoteLedgerEntry, VoterProfile, VoterStats,
};
use crate::error::DomainError;
use crate::value_objects::{ClipRef, Handle, VoteDirection};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Clip Repository
// ============================================================================

#[async_trait]
pub trait ClipRepository: Send + Sync {
    /// Resolve a clip reference (seq or external id) within a channel.
    /// Blocked clips resolve so callers can distinguish "blocked" from
    /// "absent" when they need to; voting treats both as not found.
    async fn resolve(&self, channel: &Handle, clip_ref: &ClipRef) -> RepoResult<Option<Clip>>;

    /// Insert a clip (ingestion-side collaborator; exposed for seeding)
    async fn create(&self, clip: &Clip) -> RepoResult<()>;

    /// Toggle the blocked flag
    async fn set_blocked(&self, channel: &Handle, clip_id: &str, blocked: bool) -> RepoResult<()>;
}

// ============================================================================
// Vote Store (ledger + aggregate)
// ============================================================================

/// The ledger mutation half of a vote decision.
///
/// One transition is the atomic unit of work: the ledger row change and
/// the matching aggregate deltas commit together or not at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No entry existed; insert one and increment its direction
    Record(VoteDirection),
    /// Entry existed with the opposite direction; flip it, decrement
    /// the old counter and increment the new one
    Change {
        from: VoteDirection,
        to: VoteDirection,
    },
    /// Delete the entry and decrement the direction of the row the
    /// store actually removes. The direction is read inside the same
    /// transaction, never trusted from the caller, so a snapshot that
    /// went stale between read and clear cannot skew the aggregate.
    /// Clearing an absent row is a no-op.
    Clear,
}

/// Combined port over the vote ledger and the aggregate counters.
///
/// The two live behind one trait because the coordinator's transaction
/// boundary spans both: `apply_transition` must never leave a ledger
/// row and its aggregate out of step. Decrements clamp at zero inside
/// the store.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Current ledger entry for a key, if any
    async fn find_entry(&self, key: &VoteKey) -> RepoResult<Option<VoteLedgerEntry>>;

    /// All ledger entries owned by a voter, oldest first
    async fn entries_by_voter(&self, voter: &Handle) -> RepoResult<Vec<VoteLedgerEntry>>;

    /// Atomically apply a transition for a key and return the clip's
    /// resulting aggregate. Creates a zeroed aggregate row if the clip
    /// has never been voted on.
    async fn apply_transition(
        &self,
        key: &VoteKey,
        transition: VoteTransition,
        at: DateTime<Utc>,
    ) -> RepoResult<AggregateCount>;

    /// Aggregate totals for a clip; `None` means no vote has ever
    /// touched it (readers treat that as zeros)
    async fn counts_for_clip(
        &self,
        channel: &Handle,
        clip_id: &str,
    ) -> RepoResult<Option<AggregateCount>>;

    /// Ledger-derived statistics for one voter at `now`
    async fn voter_stats(&self, voter: &Handle, now: DateTime<Utc>) -> RepoResult<VoterStats>;

    /// Number of distinct voters present in the ledger
    async fn distinct_voters(&self) -> RepoResult<i64>;

    /// Number of ledger entries with `voted_at >= since`
    async fn votes_since(&self, since: DateTime<Utc>) -> RepoResult<i64>;
}

// ============================================================================
// Voter Profile Repository
// ============================================================================

#[async_trait]
pub trait VoterProfileRepository: Send + Sync {
    /// Find a profile by voter handle
    async fn find(&self, voter: &Handle) -> RepoResult<Option<VoterProfile>>;

    /// Insert or replace a profile
    async fn upsert(&self, profile: &VoterProfile) -> RepoResult<()>;

    /// Flagged and not-yet-reviewed voters, most recent flag first
    async fn list_flagged(&self) -> RepoResult<Vec<VoterProfile>>;

    /// All tracked voters, most recently active first
    async fn list_all(&self, limit: i64) -> RepoResult<Vec<VoterProfile>>;

    /// Set `reviewed = true, flagged = false` without touching votes.
    /// Returns false if the voter is not tracked.
    async fn clear_flag(&self, voter: &Handle, at: DateTime<Utc>) -> RepoResult<bool>;

    /// Zero all counters and mark reviewed; part of admin undo
    async fn reset(&self, voter: &Handle, at: DateTime<Utc>) -> RepoResult<()>;

    /// Total tracked profiles
    async fn tracked_count(&self) -> RepoResult<i64>;

    /// Profiles with `flagged = true, reviewed = false`
    async fn flagged_unreviewed_count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Rate Limit Repository
// ============================================================================

#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Atomically consume one slot from the voter's fixed window.
    ///
    /// Single read-modify-write inside the store: resets the window when
    /// its age reaches `window_secs`, otherwise increments, denying with
    /// `retry_after = ceil(window_secs - age)` once the count exceeds
    /// `max_votes`. Concurrent calls for the same voter must not race.
    async fn check_and_consume(
        &self,
        voter: &Handle,
        max_votes: i64,
        window_secs: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<RateLimitDecision>;

    /// Drop a voter's window entirely (admin remediation)
    async fn clear(&self, voter: &Handle) -> RepoResult<()>;

    /// Housekeeping: remove windows older than `window_secs`
    async fn purge_stale(&self, window_secs: i64, now: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Channel Settings Provider
// ============================================================================

/// Out-of-scope collaborator supplying per-channel settings.
///
/// The service layer wraps this in a TTL cache with an explicit
/// fail-open policy (an unreachable provider means voting stays
/// enabled), so the policy is testable rather than incidental.
#[async_trait]
pub trait SettingsProvider: Send + Sync {
    /// Whether voting is enabled for a channel
    async fn votes_enabled(&self, channel: &Handle) -> Result<bool, DomainError>;
}
