//! In-memory implementation of VoterProfileRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use clipvote_core::entities::VoterProfile;
use clipvote_core::traits::{RepoResult, VoterProfileRepository};
use clipvote_core::Handle;

/// In-memory implementation of VoterProfileRepository
#[derive(Default)]
pub struct MemVoterProfileRepository {
    profiles: Mutex<HashMap<Handle, VoterProfile>>,
}

impl MemVoterProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoterProfileRepository for MemVoterProfileRepository {
    async fn find(&self, voter: &Handle) -> RepoResult<Option<VoterProfile>> {
        Ok(self.profiles.lock().get(voter).cloned())
    }

    async fn upsert(&self, profile: &VoterProfile) -> RepoResult<()> {
        self.profiles
            .lock()
            .insert(profile.voter.clone(), profile.clone());
        Ok(())
    }

    async fn list_flagged(&self) -> RepoResult<Vec<VoterProfile>> {
        let profiles = self.profiles.lock();
        let mut flagged: Vec<VoterProfile> = profiles
            .values()
            .filter(|p| p.flagged && !p.reviewed)
            .cloned()
            .collect();
        flagged.sort_by(|a, b| b.flagged_at.cmp(&a.flagged_at));
        Ok(flagged)
    }

    async fn list_all(&self, limit: i64) -> RepoResult<Vec<VoterProfile>> {
        let profiles = self.profiles.lock();
        let mut all: Vec<VoterProfile> = profiles.values().cloned().collect();
        all.sort_by(|a, b| b.last_vote_at.cmp(&a.last_vote_at));
        all.truncate(limit.clamp(1, 1000) as usize);
        Ok(all)
    }

    async fn clear_flag(&self, voter: &Handle, at: DateTime<Utc>) -> RepoResult<bool> {
        let mut profiles = self.profiles.lock();
        match profiles.get_mut(voter) {
            Some(profile) => {
                profile.flagged = false;
                profile.reviewed = true;
                profile.reviewed_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn reset(&self, voter: &Handle, at: DateTime<Utc>) -> RepoResult<()> {
        let mut profiles = self.profiles.lock();
        let profile = profiles
            .entry(voter.clone())
            .or_insert_with(|| VoterProfile::new(voter.clone()));
        profile.total_votes = 0;
        profile.votes_last_hour = 0;
        profile.votes_last_day = 0;
        profile.downvote_ratio = 0.0;
        profile.flagged = false;
        profile.flag_reason = None;
        profile.flagged_at = None;
        profile.reviewed = true;
        profile.reviewed_at = Some(at);
        Ok(())
    }

    async fn tracked_count(&self) -> RepoResult<i64> {
        Ok(self.profiles.lock().len() as i64)
    }

    async fn flagged_unreviewed_count(&self) -> RepoResult<i64> {
        Ok(self
            .profiles
            .lock()
            .values()
            .filter(|p| p.flagged && !p.reviewed)
            .count() as i64)
    }
}
