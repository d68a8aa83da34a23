//! Vote transaction coordinator
//!
//! Orders the gates and the ledger transition for one vote submission:
//! channel settings, clip resolution, suspension, rate limit, then the
//! atomic ledger + aggregate commit. The heuristic recompute runs after
//! the commit and can never fail the vote.

use chrono::Utc;
use tracing::{info, instrument, warn};

use clipvote_core::entities::{AggregateCount, Clip, VoteKey};
use clipvote_core::traits::VoteTransition;
use clipvote_core::{ClipRef, DomainError, Handle, RequestedVote, VoteAction, VoteDirection};

use crate::dto::VoteResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::heuristic::HeuristicService;
use super::rate_limit::RateLimitService;

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Submit one vote (like, dislike or clear) for a clip.
    ///
    /// Gate order matters: suspension is evaluated before the rate
    /// limiter so a suspended voter never consumes a window slot, and
    /// the rate limiter consumes a slot on every attempt it sees,
    /// including the one it denies.
    #[instrument(skip(self))]
    pub async fn submit_vote(
        &self,
        channel: &Handle,
        clip_ref: &ClipRef,
        voter: &Handle,
        requested: RequestedVote,
    ) -> ServiceResult<VoteResponse> {
        if !self.ctx.settings().votes_enabled(channel).await {
            return Err(ServiceError::VotesDisabled);
        }

        let clip = self.resolve_votable(channel, clip_ref).await?;

        // Suspension gate
        if let Some(profile) = self.ctx.profile_repo().find(voter).await? {
            if profile.is_suspended() {
                info!(voter = %voter, "Suspended voter rejected");
                return Err(DomainError::Suspended.into());
            }
        }

        // Rate limit gate
        RateLimitService::new(self.ctx)
            .check_and_consume(voter)
            .await?;

        let key = VoteKey::new(channel.clone(), clip.clip_id.clone(), voter.clone());

        // Serialize read-decide-apply per key; concurrent submissions
        // for the same (channel, clip, voter) queue up here.
        let _guard = self.ctx.vote_lock(&key).await;

        let now = Utc::now();
        let existing = self
            .ctx
            .vote_store()
            .find_entry(&key)
            .await?
            .map(|entry| entry.direction);

        let (action, transition) = decide(existing, requested);

        let counts = match transition {
            Some(transition) => {
                self.ctx
                    .vote_store()
                    .apply_transition(&key, transition, now)
                    .await?
            }
            // Nothing to write; read current totals (absent row = zeros)
            None => self
                .ctx
                .vote_store()
                .counts_for_clip(channel, &clip.clip_id)
                .await?
                .unwrap_or_else(|| AggregateCount::zero(channel.clone(), &clip.clip_id, now)),
        };

        info!(
            voter = %voter,
            channel = %channel,
            clip_id = %clip.clip_id,
            action = %action,
            "Vote processed"
        );

        // Post-commit: recompute the voter's profile after every
        // non-clear vote, including unchanged resubmissions (they still
        // refresh activity). Best effort; a failure here must not fail
        // the already-committed vote.
        if !matches!(action, VoteAction::Cleared) {
            if let Err(e) = HeuristicService::new(self.ctx).recompute(voter, now).await {
                warn!(voter = %voter, error = %e, "Heuristic recompute failed after vote");
            }
        }

        let user_vote = match requested {
            RequestedVote::Clear => None,
            other => other.direction(),
        };

        Ok(VoteResponse::new(action, &counts, user_vote))
    }

    /// Resolve a clip and reject blocked ones the same way as missing
    async fn resolve_votable(&self, channel: &Handle, clip_ref: &ClipRef) -> ServiceResult<Clip> {
        let not_found = || DomainError::ClipNotFound {
            channel: channel.to_string(),
            clip: clip_ref.to_string(),
        };

        let clip = self
            .ctx
            .clip_repo()
            .resolve(channel, clip_ref)
            .await?
            .ok_or_else(not_found)?;

        if !clip.is_votable() {
            return Err(not_found().into());
        }

        Ok(clip)
    }
}

/// Transition decision table: current entry direction + request
fn decide(
    existing: Option<VoteDirection>,
    requested: RequestedVote,
) -> (VoteAction, Option<VoteTransition>) {
    match (existing, requested.direction()) {
        // Clear is idempotent: clearing nothing is still "cleared"
        (None, None) => (VoteAction::Cleared, None),
        (Some(_), None) => (VoteAction::Cleared, Some(VoteTransition::Clear)),
        (None, Some(to)) => (VoteAction::Recorded, Some(VoteTransition::Record(to))),
        (Some(from), Some(to)) if from == to => (VoteAction::Unchanged, None),
        (Some(from), Some(to)) => (VoteAction::Changed, Some(VoteTransition::Change { from, to })),
    }
}
