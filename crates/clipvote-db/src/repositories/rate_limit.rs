//! PostgreSQL implementation of RateLimitRepository
//!
//! The fixed-window consume is one conditional upsert: reset-or-
//! increment happens inside the database, so concurrent requests for
//! the same voter cannot interleave a read with a write.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;

use clipvote_core::entities::{RateLimitDecision, RateLimitWindow};
use clipvote_core::traits::{RateLimitRepository, RepoResult};
use clipvote_core::Handle;

use crate::models::RateLimitModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RateLimitRepository
#[derive(Clone)]
pub struct PgRateLimitRepository {
    pool: PgPool,
}

impl PgRateLimitRepository {
    /// Create a new PgRateLimitRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Shared decision logic for both backends
pub(crate) fn decide(
    window: &RateLimitWindow,
    max_votes: i64,
    window_secs: i64,
    now: DateTime<Utc>,
) -> RateLimitDecision {
    if window.vote_count > max_votes {
        let retry_after_secs = (window_secs - window.age_secs(now)).max(1);
        RateLimitDecision::Denied { retry_after_secs }
    } else {
        RateLimitDecision::Allowed
    }
}

#[async_trait]
impl RateLimitRepository for PgRateLimitRepository {
    #[instrument(skip(self))]
    async fn check_and_consume(
        &self,
        voter: &Handle,
        max_votes: i64,
        window_secs: i64,
        now: DateTime<Utc>,
    ) -> RepoResult<RateLimitDecision> {
        let stale_before = now - Duration::seconds(window_secs);

        let model = sqlx::query_as::<_, RateLimitModel>(
            r#"
            INSERT INTO vote_rate_limits (voter, vote_count, window_start)
            VALUES ($1, 1, $2)
            ON CONFLICT (voter) DO UPDATE SET
                vote_count = CASE
                    WHEN vote_rate_limits.window_start <= $3 THEN 1
                    ELSE vote_rate_limits.vote_count + 1
                END,
                window_start = CASE
                    WHEN vote_rate_limits.window_start <= $3 THEN $2
                    ELSE vote_rate_limits.window_start
                END
            RETURNING voter, vote_count, window_start
            "#,
        )
        .bind(voter.as_str())
        .bind(now)
        .bind(stale_before)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let window = RateLimitWindow::try_from(model)?;
        Ok(decide(&window, max_votes, window_secs, now))
    }

    #[instrument(skip(self))]
    async fn clear(&self, voter: &Handle) -> RepoResult<()> {
        sqlx::query("DELETE FROM vote_rate_limits WHERE voter = $1")
            .bind(voter.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn purge_stale(&self, window_secs: i64, now: DateTime<Utc>) -> RepoResult<u64> {
        let stale_before = now - Duration::seconds(window_secs);

        let result = sqlx::query("DELETE FROM vote_rate_limits WHERE window_start <= $1")
            .bind(stale_before)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgRateLimitRepository>();
    }

    #[test]
    fn test_decide_allows_under_cap() {
        let now = Utc::now();
        let window = RateLimitWindow {
            voter: Handle::parse("viewer").unwrap(),
            vote_count: 30,
            window_start: now,
        };
        assert!(decide(&window, 30, 300, now).is_allowed());
    }

    #[test]
    fn test_decide_denies_over_cap() {
        let now = Utc::now();
        let window = RateLimitWindow {
            voter: Handle::parse("viewer").unwrap(),
            vote_count: 31,
            window_start: now - Duration::seconds(100),
        };
        match decide(&window, 30, 300, now) {
            RateLimitDecision::Denied { retry_after_secs } => {
                assert_eq!(retry_after_secs, 200);
            }
            RateLimitDecision::Allowed => panic!("expected denial"),
        }
    }

    #[test]
    fn test_retry_after_is_at_least_one() {
        let now = Utc::now();
        let window = RateLimitWindow {
            voter: Handle::parse("viewer").unwrap(),
            vote_count: 31,
            window_start: now - Duration::seconds(300),
        };
        match decide(&window, 30, 300, now) {
            RateLimitDecision::Denied { retry_after_secs } => {
                assert_eq!(retry_after_secs, 1);
            }
            RateLimitDecision::Allowed => panic!("expected denial"),
        }
    }
}
