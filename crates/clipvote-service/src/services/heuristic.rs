//! Abuse heuristic engine
//!
//! Recomputes a voter's profile from the ledger after each recorded or
//! changed vote. The rules are deterministic threshold checks; the
//! resulting flag suspends the voter until an admin reviews it.
//!
//! Write policy: statistics always update. The flag fields are frozen
//! once `reviewed = true` and the engine never clears `reviewed`.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use clipvote_core::entities::{VoterProfile, VoterStats};
use clipvote_core::Handle;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Abuse heuristic engine
pub struct HeuristicService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HeuristicService<'a> {
    /// Create a new HeuristicService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Recompute a voter's profile from current ledger statistics
    #[instrument(skip(self))]
    pub async fn recompute(&self, voter: &Handle, now: DateTime<Utc>) -> ServiceResult<VoterProfile> {
        let stats = self.ctx.vote_store().voter_stats(voter, now).await?;

        let mut profile = self
            .ctx
            .profile_repo()
            .find(voter)
            .await?
            .unwrap_or_else(|| VoterProfile::new(voter.clone()));

        profile.update_stats(&stats, now);

        if !profile.reviewed {
            let reasons = self.evaluate(&stats, now);
            if reasons.is_empty() {
                profile.flagged = false;
                profile.flag_reason = None;
                profile.flagged_at = None;
            } else {
                if !profile.flagged {
                    profile.flagged_at = Some(now);
                    info!(voter = %voter, reasons = ?reasons, "Voter flagged");
                }
                profile.flagged = true;
                profile.flag_reason = Some(reasons.join("; "));
            }
        }

        self.ctx.profile_repo().upsert(&profile).await?;
        Ok(profile)
    }

    /// Evaluate every rule against the stats; returns the reasons that fire
    fn evaluate(&self, stats: &VoterStats, now: DateTime<Utc>) -> Vec<&'static str> {
        let config = self.ctx.heuristic();
        let mut reasons = Vec::new();

        if stats.total >= config.min_votes && stats.downvote_ratio() >= config.downvote_ratio {
            reasons.push("high downvote ratio");
        }

        if stats.last_hour >= config.velocity_per_hour {
            reasons.push("high velocity");
        }

        if let Some(first) = stats.first_vote_at {
            if now - first < Duration::seconds(config.new_account_secs)
                && stats.total >= config.min_votes
            {
                reasons.push("new account rapid voting");
            }
        }

        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{handle, test_context};
    use clipvote_core::entities::{VoteKey, VoterProfile};
    use clipvote_core::traits::VoteTransition;
    use clipvote_core::VoteDirection;

    fn ctx() -> ServiceContext {
        test_context(Default::default(), Default::default())
    }

    async fn seed_downvotes(ctx: &ServiceContext, voter: &Handle, n: i64, at: DateTime<Utc>) {
        for i in 0..n {
            let key = VoteKey::new(handle("streamer"), format!("clip{i}"), voter.clone());
            ctx.vote_store()
                .apply_transition(&key, VoteTransition::Record(VoteDirection::Down), at)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_flags_high_downvote_ratio() {
        let ctx = ctx();
        let voter = handle("grumpy");
        // Old first vote so the new-account rule stays quiet
        let old = Utc::now() - Duration::days(30);
        seed_downvotes(&ctx, &voter, 10, old).await;

        let profile = HeuristicService::new(&ctx)
            .recompute(&voter, Utc::now())
            .await
            .unwrap();

        assert!(profile.flagged);
        assert_eq!(profile.flag_reason.as_deref(), Some("high downvote ratio"));
        assert!(profile.flagged_at.is_some());
        assert!(profile.is_suspended());
    }

    #[tokio::test]
    async fn test_below_thresholds_not_flagged() {
        let ctx = ctx();
        let voter = handle("casual");
        let old = Utc::now() - Duration::days(30);
        seed_downvotes(&ctx, &voter, 5, old).await;

        let profile = HeuristicService::new(&ctx)
            .recompute(&voter, Utc::now())
            .await
            .unwrap();

        assert!(!profile.flagged);
        assert_eq!(profile.total_votes, 5);
    }

    #[tokio::test]
    async fn test_new_account_rapid_voting_concatenates_reasons() {
        let ctx = ctx();
        let voter = handle("fresh");
        let now = Utc::now();
        // 10 downvotes all within the last hour: ratio + new-account fire
        seed_downvotes(&ctx, &voter, 10, now).await;

        let profile = HeuristicService::new(&ctx)
            .recompute(&voter, now)
            .await
            .unwrap();

        assert!(profile.flagged);
        let reason = profile.flag_reason.unwrap();
        assert!(reason.contains("high downvote ratio"));
        assert!(reason.contains("new account rapid voting"));
    }

    #[tokio::test]
    async fn test_reviewed_profile_flag_is_frozen() {
        let ctx = ctx();
        let voter = handle("cleared");
        let now = Utc::now();
        seed_downvotes(&ctx, &voter, 10, now).await;

        let mut reviewed = VoterProfile::new(voter.clone());
        reviewed.reviewed = true;
        reviewed.reviewed_at = Some(now);
        ctx.profile_repo().upsert(&reviewed).await.unwrap();

        let profile = HeuristicService::new(&ctx)
            .recompute(&voter, now)
            .await
            .unwrap();

        // Stats updated, flag untouched
        assert_eq!(profile.total_votes, 10);
        assert!(!profile.flagged);
        assert!(profile.reviewed);
        assert!(!profile.is_suspended());
    }

    #[tokio::test]
    async fn test_flagged_at_retained_across_recomputes() {
        let ctx = ctx();
        let voter = handle("repeat");
        let old = Utc::now() - Duration::days(30);
        seed_downvotes(&ctx, &voter, 10, old).await;

        let service = HeuristicService::new(&ctx);
        let first = service.recompute(&voter, Utc::now()).await.unwrap();
        let second = service.recompute(&voter, Utc::now()).await.unwrap();

        assert_eq!(first.flagged_at, second.flagged_at);
    }
}
