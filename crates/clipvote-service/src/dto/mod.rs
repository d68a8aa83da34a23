//! Data transfer objects
//!
//! Request DTOs validate input; response DTOs serialize API output.

pub mod requests;
pub mod responses;

pub use requests::{ListVotersQuery, SubmitVoteRequest, VoteCountsQuery};
pub use responses::{
    AdminStatsResponse, ClipVoteCounts, ClipVotesResponse, FlaggedVoterResponse, HealthResponse,
    ReadinessResponse, UndoVotesResponse, VoteResponse, VoterProfileResponse,
};
