//! PostgreSQL implementation of SettingsProvider
//!
//! Channel settings are owned by the host system; this provider only
//! reads the voting toggle. A channel with no settings row defaults to
//! voting enabled.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use clipvote_core::traits::SettingsProvider;
use clipvote_core::{DomainError, Handle};

use super::error::map_db_error;

/// PostgreSQL implementation of SettingsProvider
#[derive(Clone)]
pub struct PgSettingsRepository {
    pool: PgPool,
}

impl PgSettingsRepository {
    /// Create a new PgSettingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsProvider for PgSettingsRepository {
    #[instrument(skip(self))]
    async fn votes_enabled(&self, channel: &Handle) -> Result<bool, DomainError> {
        let enabled: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT votes_enabled FROM channel_settings WHERE channel_login = $1
            "#,
        )
        .bind(channel.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(enabled.unwrap_or(true))
    }
}
