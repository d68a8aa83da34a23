//! PostgreSQL implementation of ClipRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clipvote_core::entities::Clip;
use clipvote_core::traits::{ClipRepository, RepoResult};
use clipvote_core::{ClipRef, Handle};

use crate::models::ClipModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ClipRepository
#[derive(Clone)]
pub struct PgClipRepository {
    pool: PgPool,
}

impl PgClipRepository {
    /// Create a new PgClipRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClipRepository for PgClipRepository {
    #[instrument(skip(self))]
    async fn resolve(&self, channel: &Handle, clip_ref: &ClipRef) -> RepoResult<Option<Clip>> {
        let result = match clip_ref {
            ClipRef::Seq(seq) => {
                sqlx::query_as::<_, ClipModel>(
                    r#"
                    SELECT channel_login, clip_id, seq, title, blocked
                    FROM clips
                    WHERE channel_login = $1 AND seq = $2
                    "#,
                )
                .bind(channel.as_str())
                .bind(seq)
                .fetch_optional(&self.pool)
                .await
            }
            ClipRef::Id(id) => {
                sqlx::query_as::<_, ClipModel>(
                    r#"
                    SELECT channel_login, clip_id, seq, title, blocked
                    FROM clips
                    WHERE channel_login = $1 AND clip_id = $2
                    "#,
                )
                .bind(channel.as_str())
                .bind(id)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        result.map(Clip::try_from).transpose()
    }

    #[instrument(skip(self, clip))]
    async fn create(&self, clip: &Clip) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO clips (channel_login, clip_id, seq, title, blocked)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (channel_login, clip_id) DO NOTHING
            "#,
        )
        .bind(clip.channel_login.as_str())
        .bind(&clip.clip_id)
        .bind(clip.seq)
        .bind(&clip.title)
        .bind(clip.blocked)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_blocked(&self, channel: &Handle, clip_id: &str, blocked: bool) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE clips SET blocked = $3 WHERE channel_login = $1 AND clip_id = $2
            "#,
        )
        .bind(channel.as_str())
        .bind(clip_id)
        .bind(blocked)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
