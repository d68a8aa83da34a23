//! Vote ledger and aggregate database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the clip_votes table
#[derive(Debug, Clone, FromRow)]
pub struct VoteModel {
    pub channel_login: String,
    pub clip_id: String,
    pub voter: String,
    pub direction: String,
    pub voted_at: DateTime<Utc>,
}

/// Database model for the clip_vote_totals table
#[derive(Debug, Clone, FromRow)]
pub struct AggregateModel {
    pub channel_login: String,
    pub clip_id: String,
    pub up_votes: i64,
    pub down_votes: i64,
    pub updated_at: DateTime<Utc>,
}

/// Per-voter ledger statistics (from an aggregate query)
#[derive(Debug, Clone, FromRow)]
pub struct VoterStatsModel {
    pub total: i64,
    pub downvotes: i64,
    pub last_hour: i64,
    pub last_day: i64,
    pub first_vote_at: Option<DateTime<Utc>>,
}
