//! # clipvote-service
//!
//! Application layer: the vote transaction coordinator, rate limiting,
//! the abuse heuristic engine, admin remediation, and vote queries.

pub mod dto;
pub mod services;

pub use dto::{
    AdminStatsResponse, ClipVoteCounts, ClipVotesResponse, FlaggedVoterResponse, HealthResponse,
    ListVotersQuery, ReadinessResponse, SubmitVoteRequest, UndoVotesResponse, VoteCountsQuery,
    VoteResponse, VoterProfileResponse,
};
pub use services::{
    AdminService, HeuristicService, QueryService, RateLimitService, ServiceContext, ServiceError,
    ServiceResult, VoteService,
};
