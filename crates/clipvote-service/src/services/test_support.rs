//! Shared fixtures for service tests, built on the in-memory backend

use std::sync::Arc;

use clipvote_common::auth::JwtService;
use clipvote_common::config::{HeuristicConfig, SettingsCacheConfig, VoteLimitsConfig};
use clipvote_core::entities::Clip;
use clipvote_core::traits::SettingsProvider;
use clipvote_core::Handle;
use clipvote_db::{
    MemClipRepository, MemRateLimitRepository, MemVoteStore, MemVoterProfileRepository,
    StaticSettingsProvider,
};

use super::context::ServiceContext;

/// Context over fresh in-memory repositories with voting enabled
pub(crate) fn test_context(
    vote_limits: VoteLimitsConfig,
    heuristic: HeuristicConfig,
) -> ServiceContext {
    test_context_with_settings(
        vote_limits,
        heuristic,
        Arc::new(StaticSettingsProvider::enabled()),
    )
}

pub(crate) fn test_context_with_settings(
    vote_limits: VoteLimitsConfig,
    heuristic: HeuristicConfig,
    settings: Arc<dyn SettingsProvider>,
) -> ServiceContext {
    ServiceContext::new(
        Arc::new(MemClipRepository::new()),
        Arc::new(MemVoteStore::new()),
        Arc::new(MemVoterProfileRepository::new()),
        Arc::new(MemRateLimitRepository::new()),
        settings,
        Arc::new(JwtService::new("test-secret-key-for-unit-tests", 3600)),
        vote_limits,
        heuristic,
        SettingsCacheConfig { ttl_secs: 60 },
    )
}

/// Seed one votable clip and return its channel handle
pub(crate) async fn seed_clip(ctx: &ServiceContext, clip_id: &str, seq: i64) -> Handle {
    let channel = Handle::parse("streamer").unwrap();
    let clip = Clip::new(channel.clone(), clip_id.to_string(), seq, format!("Clip {seq}"));
    ctx.clip_repo().create(&clip).await.unwrap();
    channel
}

pub(crate) fn handle(s: &str) -> Handle {
    Handle::parse(s).unwrap()
}
