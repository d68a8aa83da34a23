//! Admin remediation service
//!
//! Privileged operations for the review queue: listing flagged voters,
//! undoing a voter's ledger, clearing flags, and subsystem stats.
//! Privilege is enforced at the API boundary; everything here assumes
//! an authorized caller.

use chrono::{Duration, Utc};
use tracing::{info, instrument, warn};

use clipvote_core::traits::VoteTransition;
use clipvote_core::{DomainError, Handle};

use crate::dto::{AdminStatsResponse, FlaggedVoterResponse, UndoVotesResponse, VoterProfileResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::rate_limit::RateLimitService;

/// Admin remediation service
pub struct AdminService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flagged, not-yet-reviewed voters, most recent flag first
    #[instrument(skip(self))]
    pub async fn list_flagged(&self) -> ServiceResult<Vec<FlaggedVoterResponse>> {
        let profiles = self.ctx.profile_repo().list_flagged().await?;
        Ok(profiles.iter().map(FlaggedVoterResponse::from).collect())
    }

    /// All tracked voters, most recently active first
    #[instrument(skip(self))]
    pub async fn list_all(&self, limit: i64) -> ServiceResult<Vec<VoterProfileResponse>> {
        let profiles = self.ctx.profile_repo().list_all(limit).await?;
        Ok(profiles.iter().map(VoterProfileResponse::from).collect())
    }

    /// Undo every vote a voter has cast, then reset their profile and
    /// rate-limit window.
    ///
    /// Each ledger entry is removed through the same atomic transition
    /// the coordinator uses; the store decrements the direction of the
    /// row it actually deletes, so a vote that changed (or cleared)
    /// after the snapshot cannot skew the aggregate. A partial result
    /// reports how far it got and is safe to retry; only the remaining
    /// rows are touched next time.
    #[instrument(skip(self))]
    pub async fn undo_votes(&self, voter: &Handle) -> ServiceResult<UndoVotesResponse> {
        let entries = self.ctx.vote_store().entries_by_voter(voter).await?;
        let now = Utc::now();

        let mut undone: u64 = 0;
        for entry in &entries {
            let result = self
                .ctx
                .vote_store()
                .apply_transition(&entry.key(), VoteTransition::Clear, now)
                .await;

            match result {
                Ok(_) => undone += 1,
                Err(e) => {
                    warn!(
                        voter = %voter,
                        undone,
                        remaining = entries.len() as u64 - undone,
                        error = %e,
                        "Vote undo interrupted"
                    );
                    return Ok(UndoVotesResponse {
                        voter: voter.to_string(),
                        votes_undone: undone,
                        complete: false,
                    });
                }
            }
        }

        self.ctx.profile_repo().reset(voter, now).await?;
        RateLimitService::new(self.ctx).clear(voter).await?;

        info!(voter = %voter, undone, "Voter ledger undone");
        Ok(UndoVotesResponse {
            voter: voter.to_string(),
            votes_undone: undone,
            complete: true,
        })
    }

    /// Clear a voter's flag without touching their votes
    #[instrument(skip(self))]
    pub async fn clear_flag(&self, voter: &Handle) -> ServiceResult<()> {
        let cleared = self.ctx.profile_repo().clear_flag(voter, Utc::now()).await?;
        if !cleared {
            return Err(DomainError::VoterNotFound(voter.to_string()).into());
        }

        info!(voter = %voter, "Flag cleared");
        Ok(())
    }

    /// Subsystem counters for the admin dashboard
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<AdminStatsResponse> {
        let now = Utc::now();
        Ok(AdminStatsResponse {
            tracked_voters: self.ctx.profile_repo().tracked_count().await?,
            flagged_unreviewed: self.ctx.profile_repo().flagged_unreviewed_count().await?,
            distinct_ledger_voters: self.ctx.vote_store().distinct_voters().await?,
            votes_last_24h: self.ctx.vote_store().votes_since(now - Duration::days(1)).await?,
        })
    }
}
