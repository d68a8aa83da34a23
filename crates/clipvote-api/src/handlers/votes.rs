//! Vote handlers
//!
//! Endpoints for submitting votes and reading clip vote counts.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use clipvote_core::{ClipRef, Handle, RequestedVote};
use clipvote_service::{
    ClipVotesResponse, QueryService, SubmitVoteRequest, VoteCountsQuery, VoteResponse, VoteService,
};

use crate::extractors::{AuthVoter, OptionalAuthVoter, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Submit, change or clear a vote on a clip
///
/// POST /channels/{channel}/clips/{clip}/vote
pub async fn submit_vote(
    State(state): State<AppState>,
    auth: AuthVoter,
    Path((channel, clip)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<SubmitVoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let channel = Handle::parse(&channel)
        .map_err(|_| ApiError::invalid_path("Invalid channel name format"))?;
    let clip_ref = ClipRef::parse(&clip);
    let requested: RequestedVote = body
        .vote
        .parse()
        .map_err(|_| ApiError::invalid_query("Vote must be 'like', 'dislike' or 'clear'"))?;

    let service = VoteService::new(state.service_context());
    let response = service
        .submit_vote(&channel, &clip_ref, &auth.voter, requested)
        .await?;
    Ok(Json(response))
}

/// Batch vote counts for clips in a channel
///
/// GET /channels/{channel}/votes?clips=1,2,AbcDef
pub async fn get_votes(
    State(state): State<AppState>,
    auth: OptionalAuthVoter,
    Path(channel): Path<String>,
    Query(query): Query<VoteCountsQuery>,
) -> ApiResult<Json<ClipVotesResponse>> {
    let channel = Handle::parse(&channel)
        .map_err(|_| ApiError::invalid_path("Invalid channel name format"))?;

    let refs: Vec<ClipRef> = query.refs().iter().map(|raw| ClipRef::parse(raw)).collect();
    if refs.is_empty() {
        return Err(ApiError::invalid_query("Clip list is empty"));
    }

    let viewer = auth.0.as_ref().map(|a| &a.voter);

    let service = QueryService::new(state.service_context());
    let response = service.get_clip_votes(&channel, &refs, viewer).await?;
    Ok(Json(response))
}
