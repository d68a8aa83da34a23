//! End-to-end API tests
//!
//! Run the full Axum application over the in-memory backend and
//! exercise the vote, query, admin and health endpoints over HTTP.

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;

use clipvote_core::traits::VoterProfileRepository;
use clipvote_core::Handle;
use clipvote_db::{StaticSettingsProvider, UnavailableSettingsProvider};
use integration_tests::{
    assert_json, assert_status, test_app_config, tight_vote_limits, trigger_happy_heuristic,
    TestServer,
};

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() -> Result<()> {
    let server = TestServer::start().await?;

    let body: Value = assert_json(server.get("/health").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "healthy");

    let body: Value = assert_json(server.get("/health/ready").await?, StatusCode::OK).await?;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"], "healthy");

    Ok(())
}

// ============================================================================
// Vote submission
// ============================================================================

#[tokio::test]
async fn test_vote_lifecycle() -> Result<()> {
    let server = TestServer::start().await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("viewer1")?;

    // First vote
    let body: Value = assert_json(
        server.vote(&token, "streamer", "1", "like").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["action"], "recorded");
    assert_eq!(body["likes"], 1);
    assert_eq!(body["dislikes"], 0);
    assert_eq!(body["user_vote"], "up");

    // Same vote again is a no-op
    let body: Value = assert_json(
        server.vote(&token, "streamer", "1", "like").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["action"], "unchanged");
    assert_eq!(body["likes"], 1);

    // Switch direction
    let body: Value = assert_json(
        server.vote(&token, "streamer", "1", "dislike").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["action"], "changed");
    assert_eq!(body["likes"], 0);
    assert_eq!(body["dislikes"], 1);
    assert_eq!(body["user_vote"], "down");

    // Clear
    let body: Value = assert_json(
        server.vote(&token, "streamer", "1", "clear").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["action"], "cleared");
    assert_eq!(body["likes"], 0);
    assert_eq!(body["dislikes"], 0);
    assert_eq!(body["user_vote"], Value::Null);

    // Clearing again stays a no-op
    let body: Value = assert_json(
        server.vote(&token, "streamer", "1", "clear").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["action"], "cleared");
    assert_eq!(body["likes"], 0);

    Ok(())
}

#[tokio::test]
async fn test_vote_resolves_by_external_id() -> Result<()> {
    let server = TestServer::start().await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("viewer1")?;

    let body: Value = assert_json(
        server.vote(&token, "streamer", "AbcDef", "like").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["action"], "recorded");

    Ok(())
}

#[tokio::test]
async fn test_vote_unknown_clip_is_404() -> Result<()> {
    let server = TestServer::start().await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("viewer1")?;

    let body: Value = assert_json(
        server.vote(&token, "streamer", "99", "like").await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    assert_eq!(body["error"]["code"], "UNKNOWN_CLIP");

    Ok(())
}

#[tokio::test]
async fn test_vote_invalid_type_is_400() -> Result<()> {
    let server = TestServer::start().await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("viewer1")?;

    assert_status(
        server.vote(&token, "streamer", "1", "banana").await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_vote_requires_auth() -> Result<()> {
    let server = TestServer::start().await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;

    // No token
    let response = server
        .client
        .post(format!(
            "{}/api/v1/channels/streamer/clips/1/vote",
            server.base_url()
        ))
        .json(&serde_json::json!({ "vote": "like" }))
        .send()
        .await?;
    assert_status(response, StatusCode::UNAUTHORIZED).await?;

    // Garbage token
    assert_status(
        server.vote("not-a-jwt", "streamer", "1", "like").await?,
        StatusCode::UNAUTHORIZED,
    )
    .await?;

    Ok(())
}

#[tokio::test]
async fn test_concurrent_votes_count_once() -> Result<()> {
    let server = Arc::new(TestServer::start().await?);
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("viewer1")?;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let server = server.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            server.vote(&token, "streamer", "1", "like").await
        }));
    }
    for handle in handles {
        assert!(handle.await?.is_ok());
    }

    let body: Value = assert_json(
        server
            .get_auth("/api/v1/channels/streamer/votes?clips=1", &token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["clips"][0]["likes"], 1);
    assert_eq!(body["clips"][0]["dislikes"], 0);

    Ok(())
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_vote_rate_limit() -> Result<()> {
    let mut config = test_app_config();
    config.vote_limits = tight_vote_limits(3);
    let server = TestServer::start_with_config(config).await?;
    for seq in 1..=4 {
        server
            .seed_clip("streamer", &format!("Clip{seq}"), seq)
            .await?;
    }
    let token = server.voter_token("viewer1")?;

    for seq in 1..=3 {
        assert_status(
            server
                .vote(&token, "streamer", &seq.to_string(), "like")
                .await?,
            StatusCode::OK,
        )
        .await?;
    }

    let response = server.vote(&token, "streamer", "4", "like").await?;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: i64 = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .expect("Retry-After header missing");
    assert!(retry_after >= 1 && retry_after <= 300);

    let body: Value = response.json().await?;
    assert_eq!(body["error"]["code"], "RATE_LIMITED");
    assert_eq!(body["error"]["retry_after_secs"], retry_after);

    // Another voter is unaffected
    let other = server.voter_token("viewer2")?;
    assert_status(
        server.vote(&other, "streamer", "4", "like").await?,
        StatusCode::OK,
    )
    .await?;

    Ok(())
}

// ============================================================================
// Abuse heuristic and suspension
// ============================================================================

#[tokio::test]
async fn test_flagged_voter_is_suspended_until_reviewed() -> Result<()> {
    let mut config = test_app_config();
    config.heuristic = trigger_happy_heuristic();
    let server = TestServer::start_with_config(config).await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    server.seed_clip("streamer", "GhiJkl", 2).await?;
    let token = server.voter_token("brigader")?;

    // The first downvote trips the ratio rule
    assert_status(
        server.vote(&token, "streamer", "1", "dislike").await?,
        StatusCode::OK,
    )
    .await?;

    let voter = Handle::parse("brigader")?;
    let profile = server.profile_repo().find(&voter).await?.expect("profile");
    assert!(profile.flagged);
    assert!(profile.flag_reason.is_some());

    // Suspended voters are rejected before any further state changes
    let body: Value = assert_json(
        server.vote(&token, "streamer", "2", "like").await?,
        StatusCode::FORBIDDEN,
    )
    .await?;
    assert_eq!(body["error"]["code"], "VOTER_SUSPENDED");

    // Admin review lifts the suspension
    let admin = server.admin_token("moderator")?;
    assert_status(
        server
            .post_auth_empty("/api/v1/admin/voters/brigader/clear-flag", &admin)
            .await?,
        StatusCode::NO_CONTENT,
    )
    .await?;

    // Reviewed voters stay unflagged even if the heuristic still fires
    assert_status(
        server.vote(&token, "streamer", "2", "dislike").await?,
        StatusCode::OK,
    )
    .await?;
    let profile = server.profile_repo().find(&voter).await?.expect("profile");
    assert!(!profile.flagged);
    assert!(profile.reviewed);

    Ok(())
}

// ============================================================================
// Vote queries
// ============================================================================

#[tokio::test]
async fn test_get_votes_batch() -> Result<()> {
    let server = TestServer::start().await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    server.seed_clip("streamer", "GhiJkl", 2).await?;
    let token = server.voter_token("viewer1")?;

    server.vote(&token, "streamer", "1", "dislike").await?;

    // Anonymous read
    let body: Value = assert_json(
        server.get("/api/v1/channels/streamer/votes?clips=1,2,99").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["channel"], "streamer");
    let clips = body["clips"].as_array().expect("clips array");
    assert_eq!(clips.len(), 2); // unknown ref 99 skipped
    assert_eq!(clips[0]["dislikes"], 1);
    assert_eq!(clips[0]["user_vote"], Value::Null);
    assert_eq!(clips[1]["likes"], 0);
    assert_eq!(body["viewer_known"], false);

    // Authenticated read folds in the viewer's own vote
    let body: Value = assert_json(
        server
            .get_auth("/api/v1/channels/streamer/votes?clips=1,2", &token)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["clips"][0]["user_vote"], "down");
    assert_eq!(body["viewer_known"], true);

    Ok(())
}

#[tokio::test]
async fn test_get_votes_empty_clip_list_is_400() -> Result<()> {
    let server = TestServer::start().await?;

    assert_status(
        server.get("/api/v1/channels/streamer/votes?clips=,,").await?,
        StatusCode::BAD_REQUEST,
    )
    .await?;

    Ok(())
}

// ============================================================================
// Admin
// ============================================================================

#[tokio::test]
async fn test_admin_requires_admin_claim() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.voter_token("viewer1")?;

    let body: Value = assert_json(
        server.get_auth("/api/v1/admin/stats", &token).await?,
        StatusCode::FORBIDDEN,
    )
    .await?;
    assert_eq!(body["error"]["code"], "MISSING_PRIVILEGES");

    Ok(())
}

#[tokio::test]
async fn test_admin_undo_votes() -> Result<()> {
    let server = TestServer::start().await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    server.seed_clip("streamer", "GhiJkl", 2).await?;
    let token = server.voter_token("viewer1")?;
    let bystander = server.voter_token("viewer2")?;
    let admin = server.admin_token("moderator")?;

    server.vote(&token, "streamer", "1", "like").await?;
    server.vote(&token, "streamer", "2", "dislike").await?;
    server.vote(&bystander, "streamer", "1", "like").await?;

    let body: Value = assert_json(
        server
            .post_auth_empty("/api/v1/admin/voters/viewer1/undo", &admin)
            .await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["voter"], "viewer1");
    assert_eq!(body["votes_undone"], 2);
    assert_eq!(body["complete"], true);

    // The bystander's vote survives
    let body: Value = assert_json(
        server.get("/api/v1/channels/streamer/votes?clips=1,2").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["clips"][0]["likes"], 1);
    assert_eq!(body["clips"][1]["dislikes"], 0);

    Ok(())
}

#[tokio::test]
async fn test_admin_clear_flag_unknown_voter_is_404() -> Result<()> {
    let server = TestServer::start().await?;
    let admin = server.admin_token("moderator")?;

    let body: Value = assert_json(
        server
            .post_auth_empty("/api/v1/admin/voters/ghost/clear-flag", &admin)
            .await?,
        StatusCode::NOT_FOUND,
    )
    .await?;
    assert_eq!(body["error"]["code"], "UNKNOWN_VOTER");

    Ok(())
}

#[tokio::test]
async fn test_admin_flagged_listing_and_stats() -> Result<()> {
    let mut config = test_app_config();
    config.heuristic = trigger_happy_heuristic();
    let server = TestServer::start_with_config(config).await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("brigader")?;
    let admin = server.admin_token("moderator")?;

    server.vote(&token, "streamer", "1", "dislike").await?;

    let flagged: Value = assert_json(
        server.get_auth("/api/v1/admin/flagged", &admin).await?,
        StatusCode::OK,
    )
    .await?;
    let flagged = flagged.as_array().expect("array");
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0]["voter"], "brigader");
    assert!(flagged[0]["flag_reason"].is_string());

    let stats: Value = assert_json(
        server.get_auth("/api/v1/admin/stats", &admin).await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(stats["tracked_voters"], 1);
    assert_eq!(stats["flagged_unreviewed"], 1);
    assert_eq!(stats["distinct_ledger_voters"], 1);
    assert_eq!(stats["votes_last_24h"], 1);

    let voters: Value = assert_json(
        server.get_auth("/api/v1/admin/voters?limit=10", &admin).await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(voters.as_array().expect("array").len(), 1);

    Ok(())
}

// ============================================================================
// Channel settings
// ============================================================================

#[tokio::test]
async fn test_votes_disabled_channel_rejects() -> Result<()> {
    let server = TestServer::start_with_settings(
        test_app_config(),
        Arc::new(StaticSettingsProvider::disabled()),
    )
    .await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("viewer1")?;

    let body: Value = assert_json(
        server.vote(&token, "streamer", "1", "like").await?,
        StatusCode::FORBIDDEN,
    )
    .await?;
    assert_eq!(body["error"]["code"], "VOTES_DISABLED");

    Ok(())
}

#[tokio::test]
async fn test_settings_outage_fails_open() -> Result<()> {
    let server = TestServer::start_with_settings(
        test_app_config(),
        Arc::new(UnavailableSettingsProvider),
    )
    .await?;
    server.seed_clip("streamer", "AbcDef", 1).await?;
    let token = server.voter_token("viewer1")?;

    // An unreachable settings backend must not take voting down
    let body: Value = assert_json(
        server.vote(&token, "streamer", "1", "like").await?,
        StatusCode::OK,
    )
    .await?;
    assert_eq!(body["action"], "recorded");

    Ok(())
}
