//! Service context - dependency container for services
//!
//! Holds the repositories, configuration, JWT service, the per-key
//! vote locks and the cached settings lookup shared by all services.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use clipvote_common::auth::JwtService;
use clipvote_common::config::{HeuristicConfig, SettingsCacheConfig, VoteLimitsConfig};
use clipvote_core::entities::VoteKey;
use clipvote_core::traits::{
    ClipRepository, RateLimitRepository, SettingsProvider, VoteStore, VoterProfileRepository,
};

use super::settings::CachedSettings;

/// Service context containing all dependencies
///
/// Passed by reference to every service. Provides access to:
/// - Repositories (clip, vote store, voter profile, rate limit)
/// - The cached channel settings lookup
/// - JWT service for token issuance and validation
/// - Abuse tuning configuration (already range-clamped on load)
#[derive(Clone)]
pub struct ServiceContext {
    clip_repo: Arc<dyn ClipRepository>,
    vote_store: Arc<dyn VoteStore>,
    profile_repo: Arc<dyn VoterProfileRepository>,
    rate_limit_repo: Arc<dyn RateLimitRepository>,

    settings: Arc<CachedSettings>,
    jwt_service: Arc<JwtService>,

    vote_limits: VoteLimitsConfig,
    heuristic: HeuristicConfig,

    // One async mutex per (channel, clip, voter); serializes the
    // read-decide-apply sequence for that key. Entries are tiny and
    // keyed by active voters, so the map is left to grow.
    vote_locks: Arc<DashMap<VoteKey, Arc<Mutex<()>>>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        clip_repo: Arc<dyn ClipRepository>,
        vote_store: Arc<dyn VoteStore>,
        profile_repo: Arc<dyn VoterProfileRepository>,
        rate_limit_repo: Arc<dyn RateLimitRepository>,
        settings_provider: Arc<dyn SettingsProvider>,
        jwt_service: Arc<JwtService>,
        vote_limits: VoteLimitsConfig,
        heuristic: HeuristicConfig,
        settings_cache: SettingsCacheConfig,
    ) -> Self {
        Self {
            clip_repo,
            vote_store,
            profile_repo,
            rate_limit_repo,
            settings: Arc::new(CachedSettings::new(settings_provider, settings_cache)),
            jwt_service,
            vote_limits: vote_limits.clamped(),
            heuristic: heuristic.clamped(),
            vote_locks: Arc::new(DashMap::new()),
        }
    }

    /// Get the clip repository
    pub fn clip_repo(&self) -> &dyn ClipRepository {
        self.clip_repo.as_ref()
    }

    /// Get the vote store (ledger + aggregates)
    pub fn vote_store(&self) -> &dyn VoteStore {
        self.vote_store.as_ref()
    }

    /// Get the voter profile repository
    pub fn profile_repo(&self) -> &dyn VoterProfileRepository {
        self.profile_repo.as_ref()
    }

    /// Get the rate limit repository
    pub fn rate_limit_repo(&self) -> &dyn RateLimitRepository {
        self.rate_limit_repo.as_ref()
    }

    /// Get the cached channel settings lookup
    pub fn settings(&self) -> &CachedSettings {
        self.settings.as_ref()
    }

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the vote rate limit configuration
    pub fn vote_limits(&self) -> VoteLimitsConfig {
        self.vote_limits
    }

    /// Get the heuristic threshold configuration
    pub fn heuristic(&self) -> HeuristicConfig {
        self.heuristic
    }

    /// Acquire the serialization lock for one vote key, held for the
    /// duration of the returned guard
    pub async fn vote_lock(&self, key: &VoteKey) -> OwnedMutexGuard<()> {
        let lock = self
            .vote_locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("vote_limits", &self.vote_limits)
            .field("heuristic", &self.heuristic)
            .field("vote_locks", &self.vote_locks.len())
            .finish_non_exhaustive()
    }
}
