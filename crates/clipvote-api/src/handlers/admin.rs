//! Admin handlers
//!
//! Remediation endpoints: review queue, voter listings, vote undo,
//! flag clearing, and subsystem stats. All require the admin claim.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use clipvote_core::Handle;
use clipvote_service::{
    AdminService, AdminStatsResponse, FlaggedVoterResponse, ListVotersQuery, UndoVotesResponse,
    VoterProfileResponse,
};

use crate::extractors::AdminAuth;
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

const DEFAULT_VOTER_LIST_LIMIT: i64 = 100;

/// Flagged voters awaiting review
///
/// GET /admin/flagged
pub async fn list_flagged(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> ApiResult<Json<Vec<FlaggedVoterResponse>>> {
    let service = AdminService::new(state.service_context());
    let flagged = service.list_flagged().await?;
    Ok(Json(flagged))
}

/// All tracked voters, most recently active first
///
/// GET /admin/voters?limit=100
pub async fn list_voters(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Query(query): Query<ListVotersQuery>,
) -> ApiResult<Json<Vec<VoterProfileResponse>>> {
    let service = AdminService::new(state.service_context());
    let voters = service
        .list_all(query.limit.unwrap_or(DEFAULT_VOTER_LIST_LIMIT))
        .await?;
    Ok(Json(voters))
}

/// Undo every vote a voter has cast
///
/// POST /admin/voters/{voter}/undo
pub async fn undo_votes(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(voter): Path<String>,
) -> ApiResult<Json<UndoVotesResponse>> {
    let voter =
        Handle::parse(&voter).map_err(|_| ApiError::invalid_path("Invalid voter handle format"))?;

    let service = AdminService::new(state.service_context());
    let response = service.undo_votes(&voter).await?;
    Ok(Json(response))
}

/// Clear a voter's abuse flag and mark them reviewed
///
/// POST /admin/voters/{voter}/clear-flag
pub async fn clear_flag(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(voter): Path<String>,
) -> ApiResult<NoContent> {
    let voter =
        Handle::parse(&voter).map_err(|_| ApiError::invalid_path("Invalid voter handle format"))?;

    let service = AdminService::new(state.service_context());
    service.clear_flag(&voter).await?;
    Ok(NoContent)
}

/// Subsystem counters for the admin dashboard
///
/// GET /admin/stats
pub async fn stats(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> ApiResult<Json<AdminStatsResponse>> {
    let service = AdminService::new(state.service_context());
    let stats = service.stats().await?;
    Ok(Json(stats))
}
