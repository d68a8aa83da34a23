//! Rate limit window database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the vote_rate_limits table
#[derive(Debug, Clone, FromRow)]
pub struct RateLimitModel {
    pub voter: String,
    pub vote_count: i64,
    pub window_start: DateTime<Utc>,
}
