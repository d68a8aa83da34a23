//! In-memory implementation of ClipRepository

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use clipvote_core::entities::Clip;
use clipvote_core::traits::{ClipRepository, RepoResult};
use clipvote_core::{ClipRef, Handle};

/// In-memory implementation of ClipRepository
#[derive(Default)]
pub struct MemClipRepository {
    clips: Mutex<HashMap<(Handle, String), Clip>>,
}

impl MemClipRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClipRepository for MemClipRepository {
    async fn resolve(&self, channel: &Handle, clip_ref: &ClipRef) -> RepoResult<Option<Clip>> {
        let clips = self.clips.lock();
        let found = match clip_ref {
            ClipRef::Seq(seq) => clips
                .values()
                .find(|c| c.channel_login == *channel && c.seq == *seq),
            ClipRef::Id(id) => clips.get(&(channel.clone(), id.clone())),
        };
        Ok(found.cloned())
    }

    async fn create(&self, clip: &Clip) -> RepoResult<()> {
        let mut clips = self.clips.lock();
        clips
            .entry((clip.channel_login.clone(), clip.clip_id.clone()))
            .or_insert_with(|| clip.clone());
        Ok(())
    }

    async fn set_blocked(&self, channel: &Handle, clip_id: &str, blocked: bool) -> RepoResult<()> {
        let mut clips = self.clips.lock();
        if let Some(clip) = clips.get_mut(&(channel.clone(), clip_id.to_string())) {
            clip.blocked = blocked;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel() -> Handle {
        Handle::parse("streamer").unwrap()
    }

    #[tokio::test]
    async fn test_resolve_by_seq_and_id() {
        let repo = MemClipRepository::new();
        let clip = Clip::new(channel(), "AbcDef".to_string(), 7, "Clutch".to_string());
        repo.create(&clip).await.unwrap();

        let by_seq = repo.resolve(&channel(), &ClipRef::Seq(7)).await.unwrap();
        assert_eq!(by_seq.as_ref().map(|c| c.clip_id.as_str()), Some("AbcDef"));

        let by_id = repo
            .resolve(&channel(), &ClipRef::Id("AbcDef".to_string()))
            .await
            .unwrap();
        assert_eq!(by_id.map(|c| c.seq), Some(7));
    }

    #[tokio::test]
    async fn test_resolve_missing() {
        let repo = MemClipRepository::new();
        let found = repo.resolve(&channel(), &ClipRef::Seq(99)).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let repo = MemClipRepository::new();
        let clip = Clip::new(channel(), "AbcDef".to_string(), 7, "Clutch".to_string());
        repo.create(&clip).await.unwrap();

        let mut renamed = clip.clone();
        renamed.title = "Other title".to_string();
        repo.create(&renamed).await.unwrap();

        let found = repo
            .resolve(&channel(), &ClipRef::Id("AbcDef".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "Clutch");
    }

    #[tokio::test]
    async fn test_set_blocked() {
        let repo = MemClipRepository::new();
        let clip = Clip::new(channel(), "AbcDef".to_string(), 7, "Clutch".to_string());
        repo.create(&clip).await.unwrap();
        repo.set_blocked(&channel(), "AbcDef", true).await.unwrap();

        let found = repo
            .resolve(&channel(), &ClipRef::Id("AbcDef".to_string()))
            .await
            .unwrap()
            .unwrap();
        assert!(!found.is_votable());
    }
}
