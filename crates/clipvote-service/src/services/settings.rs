//! Cached channel settings lookup
//!
//! Wraps the external settings collaborator in a TTL cache. The policy
//! when the provider is unreachable is explicit and has a name so tests
//! can assert it directly rather than relying on incidental behavior.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use clipvote_common::cache::TtlCache;
use clipvote_common::config::SettingsCacheConfig;
use clipvote_core::traits::SettingsProvider;
use clipvote_core::Handle;

/// When the settings provider fails and no cached value exists, voting
/// stays enabled. A settings outage must not silently kill voting.
pub const FAIL_OPEN_VOTES_ENABLED: bool = true;

/// TTL-cached front for the per-channel settings provider
pub struct CachedSettings {
    provider: Arc<dyn SettingsProvider>,
    cache: TtlCache<Handle, bool>,
}

impl CachedSettings {
    /// Create a cached lookup with the configured TTL
    pub fn new(provider: Arc<dyn SettingsProvider>, config: SettingsCacheConfig) -> Self {
        Self {
            provider,
            cache: TtlCache::new(Duration::from_secs(config.ttl_secs)),
        }
    }

    /// Whether voting is enabled for a channel.
    ///
    /// Fresh cache hits are served directly. On miss or stale, the
    /// provider is consulted; if it fails, a stale value wins over the
    /// fail-open default.
    pub async fn votes_enabled(&self, channel: &Handle) -> bool {
        if let Some((enabled, true)) = self.cache.get(channel) {
            return enabled;
        }

        match self.provider.votes_enabled(channel).await {
            Ok(enabled) => {
                self.cache.insert(channel.clone(), enabled);
                enabled
            }
            Err(e) => {
                warn!(channel = %channel, error = %e, "Settings lookup failed, applying fail-open policy");
                match self.cache.get(channel) {
                    Some((stale, _)) => stale,
                    None => FAIL_OPEN_VOTES_ENABLED,
                }
            }
        }
    }

    /// Drop the cached value for one channel
    pub fn invalidate(&self, channel: &Handle) {
        self.cache.invalidate(channel);
    }
}

impl std::fmt::Debug for CachedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSettings").finish_non_exhaustive()
    }
}
