//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{admin, health, votes};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new().merge(vote_routes()).merge(admin_routes())
}

/// Vote routes
fn vote_routes() -> Router<AppState> {
    Router::new()
        .route("/channels/:channel/clips/:clip/vote", post(votes::submit_vote))
        .route("/channels/:channel/votes", get(votes::get_votes))
}

/// Admin routes (all require the admin claim)
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/flagged", get(admin::list_flagged))
        .route("/admin/voters", get(admin::list_voters))
        .route("/admin/voters/:voter/undo", post(admin::undo_votes))
        .route("/admin/voters/:voter/clear-flag", post(admin::clear_flag))
        .route("/admin/stats", get(admin::stats))
}
