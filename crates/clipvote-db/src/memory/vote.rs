//! In-memory implementation of VoteStore
//!
//! One mutex over both maps makes `apply_transition` atomic: the
//! ledger row and the aggregate never disagree, matching the
//! transaction boundary of the PostgreSQL backend.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use clipvote_core::entities::{AggregateCount, VoteKey, VoteLedgerEntry, VoterStats};
use clipvote_core::traits::{RepoResult, VoteStore, VoteTransition};
use clipvote_core::{Handle, VoteDirection};

#[derive(Default)]
struct Inner {
    entries: HashMap<VoteKey, VoteLedgerEntry>,
    totals: HashMap<(Handle, String), AggregateCount>,
}

/// In-memory implementation of VoteStore
#[derive(Default)]
pub struct MemVoteStore {
    inner: Mutex<Inner>,
}

impl MemVoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoteStore for MemVoteStore {
    async fn find_entry(&self, key: &VoteKey) -> RepoResult<Option<VoteLedgerEntry>> {
        Ok(self.inner.lock().entries.get(key).cloned())
    }

    async fn entries_by_voter(&self, voter: &Handle) -> RepoResult<Vec<VoteLedgerEntry>> {
        let inner = self.inner.lock();
        let mut entries: Vec<VoteLedgerEntry> = inner
            .entries
            .values()
            .filter(|e| e.voter == *voter)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.voted_at);
        Ok(entries)
    }

    async fn apply_transition(
        &self,
        key: &VoteKey,
        transition: VoteTransition,
        at: DateTime<Utc>,
    ) -> RepoResult<AggregateCount> {
        let mut inner = self.inner.lock();

        let (up_delta, down_delta) = match transition {
            VoteTransition::Record(direction) => {
                inner
                    .entries
                    .insert(key.clone(), VoteLedgerEntry::new(key, direction, at));
                deltas(None, Some(direction))
            }
            VoteTransition::Change { from, to } => {
                inner
                    .entries
                    .insert(key.clone(), VoteLedgerEntry::new(key, to, at));
                deltas(Some(from), Some(to))
            }
            // The decrement comes from the row actually removed, not
            // from whatever the caller last read
            VoteTransition::Clear => {
                let removed = inner.entries.remove(key).map(|e| e.direction);
                deltas(removed, None)
            }
        };

        let totals_key = (key.channel_login.clone(), key.clip_id.clone());
        let counts = inner
            .totals
            .entry(totals_key)
            .or_insert_with(|| AggregateCount::zero(key.channel_login.clone(), &key.clip_id, at));
        counts.apply_delta(up_delta, down_delta, at);
        Ok(counts.clone())
    }

    async fn counts_for_clip(
        &self,
        channel: &Handle,
        clip_id: &str,
    ) -> RepoResult<Option<AggregateCount>> {
        let inner = self.inner.lock();
        Ok(inner
            .totals
            .get(&(channel.clone(), clip_id.to_string()))
            .cloned())
    }

    async fn voter_stats(&self, voter: &Handle, now: DateTime<Utc>) -> RepoResult<VoterStats> {
        let hour_ago = now - Duration::hours(1);
        let day_ago = now - Duration::days(1);

        let inner = self.inner.lock();
        let mut stats = VoterStats::default();
        for entry in inner.entries.values().filter(|e| e.voter == *voter) {
            stats.total += 1;
            if entry.direction == VoteDirection::Down {
                stats.downvotes += 1;
            }
            if entry.voted_at >= hour_ago {
                stats.last_hour += 1;
            }
            if entry.voted_at >= day_ago {
                stats.last_day += 1;
            }
            stats.first_vote_at = match stats.first_vote_at {
                Some(first) if first <= entry.voted_at => Some(first),
                _ => Some(entry.voted_at),
            };
        }
        Ok(stats)
    }

    async fn distinct_voters(&self) -> RepoResult<i64> {
        let inner = self.inner.lock();
        let voters: HashSet<&Handle> = inner.entries.values().map(|e| &e.voter).collect();
        Ok(voters.len() as i64)
    }

    async fn votes_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        let inner = self.inner.lock();
        Ok(inner
            .entries
            .values()
            .filter(|e| e.voted_at >= since)
            .count() as i64)
    }
}

/// Signed (up, down) aggregate deltas for replacing one ledger row
/// direction with another; `None` on either side means "no row"
fn deltas(from: Option<VoteDirection>, to: Option<VoteDirection>) -> (i64, i64) {
    fn unit(direction: Option<VoteDirection>, sign: i64) -> (i64, i64) {
        match direction {
            Some(VoteDirection::Up) => (sign, 0),
            Some(VoteDirection::Down) => (0, sign),
            None => (0, 0),
        }
    }

    let (up_out, down_out) = unit(from, -1);
    let (up_in, down_in) = unit(to, 1);
    (up_out + up_in, down_out + down_in)
}
