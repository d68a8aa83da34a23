//! Rate limit service
//!
//! Per-voter fixed window over vote submissions. The window lives in
//! the store; this service applies the configured cap and translates
//! denials into domain errors.

use chrono::Utc;
use tracing::{info, instrument};

use clipvote_core::entities::RateLimitDecision;
use clipvote_core::{DomainError, Handle};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Rate limit service
pub struct RateLimitService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RateLimitService<'a> {
    /// Create a new RateLimitService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Consume one slot from the voter's window, or reject.
    ///
    /// Every non-suspended vote attempt consumes a slot, including the
    /// one that ends up denied.
    #[instrument(skip(self))]
    pub async fn check_and_consume(&self, voter: &Handle) -> ServiceResult<()> {
        let limits = self.ctx.vote_limits();
        let decision = self
            .ctx
            .rate_limit_repo()
            .check_and_consume(voter, limits.max_votes, limits.window_secs, Utc::now())
            .await?;

        match decision {
            RateLimitDecision::Allowed => Ok(()),
            RateLimitDecision::Denied { retry_after_secs } => {
                info!(voter = %voter, retry_after_secs, "Vote rate limit hit");
                Err(DomainError::RateLimited { retry_after_secs }.into())
            }
        }
    }

    /// Drop a voter's window entirely (admin remediation)
    #[instrument(skip(self))]
    pub async fn clear(&self, voter: &Handle) -> ServiceResult<()> {
        self.ctx.rate_limit_repo().clear(voter).await?;
        Ok(())
    }

    /// Remove windows that have aged out; returns how many were dropped
    #[instrument(skip(self))]
    pub async fn purge_stale(&self) -> ServiceResult<u64> {
        let limits = self.ctx.vote_limits();
        let purged = self
            .ctx
            .rate_limit_repo()
            .purge_stale(limits.window_secs, Utc::now())
            .await?;
        Ok(purged)
    }
}
