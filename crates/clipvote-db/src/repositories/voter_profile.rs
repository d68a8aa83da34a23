//! PostgreSQL implementation of VoterProfileRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use clipvote_core::entities::VoterProfile;
use clipvote_core::traits::{RepoResult, VoterProfileRepository};
use clipvote_core::Handle;

use crate::models::VoterProfileModel;

use super::error::map_db_error;

const PROFILE_COLUMNS: &str = "voter, total_votes, votes_last_hour, votes_last_day, \
                               downvote_ratio, first_vote_at, last_vote_at, flagged, \
                               flag_reason, flagged_at, reviewed, reviewed_at";

/// PostgreSQL implementation of VoterProfileRepository
#[derive(Clone)]
pub struct PgVoterProfileRepository {
    pool: PgPool,
}

impl PgVoterProfileRepository {
    /// Create a new PgVoterProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoterProfileRepository for PgVoterProfileRepository {
    #[instrument(skip(self))]
    async fn find(&self, voter: &Handle) -> RepoResult<Option<VoterProfile>> {
        let result = sqlx::query_as::<_, VoterProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM voter_profiles WHERE voter = $1"
        ))
        .bind(voter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(VoterProfile::try_from).transpose()
    }

    #[instrument(skip(self, profile))]
    async fn upsert(&self, profile: &VoterProfile) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO voter_profiles
                (voter, total_votes, votes_last_hour, votes_last_day, downvote_ratio,
                 first_vote_at, last_vote_at, flagged, flag_reason, flagged_at,
                 reviewed, reviewed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (voter) DO UPDATE SET
                total_votes = EXCLUDED.total_votes,
                votes_last_hour = EXCLUDED.votes_last_hour,
                votes_last_day = EXCLUDED.votes_last_day,
                downvote_ratio = EXCLUDED.downvote_ratio,
                first_vote_at = EXCLUDED.first_vote_at,
                last_vote_at = EXCLUDED.last_vote_at,
                flagged = EXCLUDED.flagged,
                flag_reason = EXCLUDED.flag_reason,
                flagged_at = EXCLUDED.flagged_at,
                reviewed = EXCLUDED.reviewed,
                reviewed_at = EXCLUDED.reviewed_at
            "#,
        )
        .bind(profile.voter.as_str())
        .bind(profile.total_votes)
        .bind(profile.votes_last_hour)
        .bind(profile.votes_last_day)
        .bind(profile.downvote_ratio)
        .bind(profile.first_vote_at)
        .bind(profile.last_vote_at)
        .bind(profile.flagged)
        .bind(&profile.flag_reason)
        .bind(profile.flagged_at)
        .bind(profile.reviewed)
        .bind(profile.reviewed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_flagged(&self) -> RepoResult<Vec<VoterProfile>> {
        let results = sqlx::query_as::<_, VoterProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM voter_profiles \
             WHERE flagged AND NOT reviewed \
             ORDER BY flagged_at DESC NULLS LAST"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(VoterProfile::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_all(&self, limit: i64) -> RepoResult<Vec<VoterProfile>> {
        let results = sqlx::query_as::<_, VoterProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM voter_profiles \
             ORDER BY last_vote_at DESC NULLS LAST \
             LIMIT $1"
        ))
        .bind(limit.clamp(1, 1000))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(VoterProfile::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn clear_flag(&self, voter: &Handle, at: DateTime<Utc>) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE voter_profiles
            SET flagged = FALSE, reviewed = TRUE, reviewed_at = $2
            WHERE voter = $1
            "#,
        )
        .bind(voter.as_str())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn reset(&self, voter: &Handle, at: DateTime<Utc>) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO voter_profiles
                (voter, total_votes, votes_last_hour, votes_last_day, downvote_ratio,
                 first_vote_at, last_vote_at, flagged, flag_reason, flagged_at,
                 reviewed, reviewed_at)
            VALUES ($1, 0, 0, 0, 0.0, NULL, NULL, FALSE, NULL, NULL, TRUE, $2)
            ON CONFLICT (voter) DO UPDATE SET
                total_votes = 0,
                votes_last_hour = 0,
                votes_last_day = 0,
                downvote_ratio = 0.0,
                flagged = FALSE,
                flag_reason = NULL,
                flagged_at = NULL,
                reviewed = TRUE,
                reviewed_at = $2
            "#,
        )
        .bind(voter.as_str())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn tracked_count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM voter_profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn flagged_unreviewed_count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM voter_profiles WHERE flagged AND NOT reviewed",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgVoterProfileRepository>();
    }
}
