//! Test doubles for the channel settings collaborator

use async_trait::async_trait;

use clipvote_core::traits::SettingsProvider;
use clipvote_core::{DomainError, Handle};

/// Settings provider that answers the same for every channel
pub struct StaticSettingsProvider {
    enabled: bool,
}

impl StaticSettingsProvider {
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }
}

#[async_trait]
impl SettingsProvider for StaticSettingsProvider {
    async fn votes_enabled(&self, _channel: &Handle) -> Result<bool, DomainError> {
        Ok(self.enabled)
    }
}

/// Settings provider that always fails, for exercising the fail-open
/// policy of the cached wrapper
#[derive(Default)]
pub struct UnavailableSettingsProvider;

#[async_trait]
impl SettingsProvider for UnavailableSettingsProvider {
    async fn votes_enabled(&self, _channel: &Handle) -> Result<bool, DomainError> {
        Err(DomainError::DatabaseError(
            "settings backend unavailable".to_string(),
        ))
    }
}
