//! Voter profile database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the voter_profiles table
#[derive(Debug, Clone, FromRow)]
pub struct VoterProfileModel {
    pub voter: String,
    pub total_votes: i64,
    pub votes_last_hour: i64,
    pub votes_last_day: i64,
    pub downvote_ratio: f64,
    pub first_vote_at: Option<DateTime<Utc>>,
    pub last_vote_at: Option<DateTime<Utc>>,
    pub flagged: bool,
    pub flag_reason: Option<String>,
    pub flagged_at: Option<DateTime<Utc>>,
    pub reviewed: bool,
    pub reviewed_at: Option<DateTime<Utc>>,
}
