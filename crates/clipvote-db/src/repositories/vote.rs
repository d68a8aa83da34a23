//! PostgreSQL implementation of VoteStore
//!
//! The ledger row change and the aggregate deltas for one transition
//! commit inside a single database transaction; the clamp at zero is
//! expressed with GREATEST so a buggy caller cannot drive totals
//! negative.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;

use clipvote_core::entities::{AggregateCount, VoteKey, VoteLedgerEntry, VoterStats};
use clipvote_core::traits::{RepoResult, VoteStore, VoteTransition};
use clipvote_core::{Handle, VoteDirection};

use crate::models::{AggregateModel, VoteModel, VoterStatsModel};

use super::error::map_db_error;

/// PostgreSQL implementation of VoteStore
#[derive(Clone)]
pub struct PgVoteStore {
    pool: PgPool,
}

impl PgVoteStore {
    /// Create a new PgVoteStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
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

async fn upsert_entry(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    key: &VoteKey,
    direction: VoteDirection,
    at: DateTime<Utc>,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO clip_votes (channel_login, clip_id, voter, direction, voted_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (channel_login, clip_id, voter)
        DO UPDATE SET direction = EXCLUDED.direction, voted_at = EXCLUDED.voted_at
        "#,
    )
    .bind(key.channel_login.as_str())
    .bind(&key.clip_id)
    .bind(key.voter.as_str())
    .bind(direction.as_str())
    .bind(at)
    .execute(&mut **tx)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

#[async_trait]
impl VoteStore for PgVoteStore {
    #[instrument(skip(self))]
    async fn find_entry(&self, key: &VoteKey) -> RepoResult<Option<VoteLedgerEntry>> {
        let result = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT channel_login, clip_id, voter, direction, voted_at
            FROM clip_votes
            WHERE channel_login = $1 AND clip_id = $2 AND voter = $3
            "#,
        )
        .bind(key.channel_login.as_str())
        .bind(&key.clip_id)
        .bind(key.voter.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(VoteLedgerEntry::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn entries_by_voter(&self, voter: &Handle) -> RepoResult<Vec<VoteLedgerEntry>> {
        let results = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT channel_login, clip_id, voter, direction, voted_at
            FROM clip_votes
            WHERE voter = $1
            ORDER BY voted_at
            "#,
        )
        .bind(voter.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(VoteLedgerEntry::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn apply_transition(
        &self,
        key: &VoteKey,
        transition: VoteTransition,
        at: DateTime<Utc>,
    ) -> RepoResult<AggregateCount> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let (up_delta, down_delta) = match transition {
            VoteTransition::Record(direction) => {
                upsert_entry(&mut tx, key, direction, at).await?;
                deltas(None, Some(direction))
            }
            VoteTransition::Change { from, to } => {
                upsert_entry(&mut tx, key, to, at).await?;
                deltas(Some(from), Some(to))
            }
            VoteTransition::Clear => {
                let removed: Option<String> = sqlx::query_scalar(
                    r#"
                    DELETE FROM clip_votes
                    WHERE channel_login = $1 AND clip_id = $2 AND voter = $3
                    RETURNING direction
                    "#,
                )
                .bind(key.channel_login.as_str())
                .bind(&key.clip_id)
                .bind(key.voter.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;

                let removed = removed
                    .as_deref()
                    .map(|d| d.parse::<VoteDirection>())
                    .transpose()?;
                deltas(removed, None)
            }
        };

        // Lazy aggregate creation on a clip's first vote
        sqlx::query(
            r#"
            INSERT INTO clip_vote_totals (channel_login, clip_id, up_votes, down_votes, updated_at)
            VALUES ($1, $2, 0, 0, $3)
            ON CONFLICT (channel_login, clip_id) DO NOTHING
            "#,
        )
        .bind(key.channel_login.as_str())
        .bind(&key.clip_id)
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let model = sqlx::query_as::<_, AggregateModel>(
            r#"
            UPDATE clip_vote_totals
            SET up_votes = GREATEST(up_votes + $3, 0),
                down_votes = GREATEST(down_votes + $4, 0),
                updated_at = $5
            WHERE channel_login = $1 AND clip_id = $2
            RETURNING channel_login, clip_id, up_votes, down_votes, updated_at
            "#,
        )
        .bind(key.channel_login.as_str())
        .bind(&key.clip_id)
        .bind(up_delta)
        .bind(down_delta)
        .bind(at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        AggregateCount::try_from(model)
    }

    #[instrument(skip(self))]
    async fn counts_for_clip(
        &self,
        channel: &Handle,
        clip_id: &str,
    ) -> RepoResult<Option<AggregateCount>> {
        let result = sqlx::query_as::<_, AggregateModel>(
            r#"
            SELECT channel_login, clip_id, up_votes, down_votes, updated_at
            FROM clip_vote_totals
            WHERE channel_login = $1 AND clip_id = $2
            "#,
        )
        .bind(channel.as_str())
        .bind(clip_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(AggregateCount::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn voter_stats(&self, voter: &Handle, now: DateTime<Utc>) -> RepoResult<VoterStats> {
        let hour_ago = now - Duration::hours(1);
        let day_ago = now - Duration::days(1);

        let model = sqlx::query_as::<_, VoterStatsModel>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE direction = 'down') AS downvotes,
                   COUNT(*) FILTER (WHERE voted_at >= $2) AS last_hour,
                   COUNT(*) FILTER (WHERE voted_at >= $3) AS last_day,
                   MIN(voted_at) AS first_vote_at
            FROM clip_votes
            WHERE voter = $1
            "#,
        )
        .bind(voter.as_str())
        .bind(hour_ago)
        .bind(day_ago)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(VoterStats::from(model))
    }

    #[instrument(skip(self))]
    async fn distinct_voters(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT voter) FROM clip_votes")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn votes_since(&self, since: DateTime<Utc>) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clip_votes WHERE voted_at >= $1")
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
