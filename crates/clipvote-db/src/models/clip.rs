//! Clip database model

use sqlx::FromRow;

/// Database model for the clips table
#[derive(Debug, Clone, FromRow)]
pub struct ClipModel {
    pub channel_login: String,
    pub clip_id: String,
    pub seq: i64,
    pub title: String,
    pub blocked: bool,
}
