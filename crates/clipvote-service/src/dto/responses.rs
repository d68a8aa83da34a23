//! Response DTOs for API endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;

use clipvote_core::entities::{AggregateCount, VoterProfile};
use clipvote_core::{VoteAction, VoteDirection};

/// Result of a vote submission
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub action: VoteAction,
    pub likes: i64,
    pub dislikes: i64,
    /// The voter's ledger entry after the submission, if any
    pub user_vote: Option<VoteDirection>,
}

impl VoteResponse {
    pub fn new(action: VoteAction, counts: &AggregateCount, user_vote: Option<VoteDirection>) -> Self {
        Self {
            action,
            likes: counts.up_votes,
            dislikes: counts.down_votes,
            user_vote,
        }
    }
}

/// Per-clip counts in a batch query
#[derive(Debug, Clone, Serialize)]
pub struct ClipVoteCounts {
    pub clip_id: String,
    pub seq: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub user_vote: Option<VoteDirection>,
}

/// Batch vote counts for a channel
#[derive(Debug, Clone, Serialize)]
pub struct ClipVotesResponse {
    pub channel: String,
    pub clips: Vec<ClipVoteCounts>,
    /// Whether the requesting viewer has any tracked voting history
    pub viewer_known: bool,
}

/// Flagged voter as shown in the admin review queue
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedVoterResponse {
    pub voter: String,
    pub total_votes: i64,
    pub votes_last_hour: i64,
    pub downvote_ratio: f64,
    pub flag_reason: Option<String>,
    pub flagged_at: Option<DateTime<Utc>>,
}

impl From<&VoterProfile> for FlaggedVoterResponse {
    fn from(profile: &VoterProfile) -> Self {
        Self {
            voter: profile.voter.to_string(),
            total_votes: profile.total_votes,
            votes_last_hour: profile.votes_last_hour,
            downvote_ratio: profile.downvote_ratio,
            flag_reason: profile.flag_reason.clone(),
            flagged_at: profile.flagged_at,
        }
    }
}

/// Full voter profile for admin listings
#[derive(Debug, Clone, Serialize)]
pub struct VoterProfileResponse {
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

impl From<&VoterProfile> for VoterProfileResponse {
    fn from(profile: &VoterProfile) -> Self {
        Self {
            voter: profile.voter.to_string(),
            total_votes: profile.total_votes,
            votes_last_hour: profile.votes_last_hour,
            votes_last_day: profile.votes_last_day,
            downvote_ratio: profile.downvote_ratio,
            first_vote_at: profile.first_vote_at,
            last_vote_at: profile.last_vote_at,
            flagged: profile.flagged,
            flag_reason: profile.flag_reason.clone(),
            flagged_at: profile.flagged_at,
            reviewed: profile.reviewed,
            reviewed_at: profile.reviewed_at,
        }
    }
}

/// Result of an admin vote undo
#[derive(Debug, Clone, Serialize)]
pub struct UndoVotesResponse {
    pub voter: String,
    pub votes_undone: u64,
    /// False when a mid-loop store failure left entries behind; the
    /// operation is retryable and will pick up the remaining rows
    pub complete: bool,
}

/// Subsystem counters for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct AdminStatsResponse {
    pub tracked_voters: i64,
    pub flagged_unreviewed: i64,
    pub distinct_ledger_voters: i64,
    pub votes_last_24h: i64,
}

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub store: String,
}

impl ReadinessResponse {
    pub fn ready(store_healthy: bool) -> Self {
        Self {
            status: if store_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                store: if store_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
