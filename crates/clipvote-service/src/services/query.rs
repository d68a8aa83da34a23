//! Vote query service
//!
//! Read side: batch counts for a channel's clips, with the requesting
//! viewer's own vote folded in when they are authenticated.

use tracing::instrument;

use clipvote_core::entities::VoteKey;
use clipvote_core::{ClipRef, Handle};

use crate::dto::{ClipVoteCounts, ClipVotesResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Vote query service
pub struct QueryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QueryService<'a> {
    /// Create a new QueryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Batch vote counts for clips in one channel.
    ///
    /// Unresolvable references are skipped rather than failing the
    /// batch. A clip nobody has voted on reads as zeros; `user_vote`
    /// is null without an authenticated viewer.
    #[instrument(skip(self, refs))]
    pub async fn get_clip_votes(
        &self,
        channel: &Handle,
        refs: &[ClipRef],
        viewer: Option<&Handle>,
    ) -> ServiceResult<ClipVotesResponse> {
        let mut clips = Vec::with_capacity(refs.len());

        for clip_ref in refs {
            let Some(clip) = self.ctx.clip_repo().resolve(channel, clip_ref).await? else {
                continue;
            };

            let counts = self
                .ctx
                .vote_store()
                .counts_for_clip(channel, &clip.clip_id)
                .await?;

            let user_vote = match viewer {
                Some(viewer) => {
                    let key = VoteKey::new(channel.clone(), clip.clip_id.clone(), viewer.clone());
                    self.ctx
                        .vote_store()
                        .find_entry(&key)
                        .await?
                        .map(|entry| entry.direction)
                }
                None => None,
            };

            clips.push(ClipVoteCounts {
                clip_id: clip.clip_id,
                seq: clip.seq,
                likes: counts.as_ref().map_or(0, |c| c.up_votes),
                dislikes: counts.as_ref().map_or(0, |c| c.down_votes),
                user_vote,
            });
        }

        let viewer_known = match viewer {
            Some(viewer) => self.ctx.profile_repo().find(viewer).await?.is_some(),
            None => false,
        };

        Ok(ClipVotesResponse {
            channel: channel.to_string(),
            clips,
            viewer_known,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{handle, seed_clip, test_context};
    use crate::services::vote::VoteService;
    use clipvote_core::{RequestedVote, VoteDirection};

    fn ctx() -> ServiceContext {
        test_context(Default::default(), Default::default())
    }

    #[tokio::test]
    async fn test_unvoted_clip_reads_as_zeros() {
        let ctx = ctx();
        let channel = seed_clip(&ctx, "AbcDef", 1).await;

        let response = QueryService::new(&ctx)
            .get_clip_votes(&channel, &[ClipRef::Seq(1)], None)
            .await
            .unwrap();

        assert_eq!(response.clips.len(), 1);
        assert_eq!(response.clips[0].likes, 0);
        assert_eq!(response.clips[0].dislikes, 0);
        assert_eq!(response.clips[0].user_vote, None);
        assert!(!response.viewer_known);
    }

    #[tokio::test]
    async fn test_viewer_vote_included() {
        let ctx = ctx();
        let channel = seed_clip(&ctx, "AbcDef", 1).await;
        let viewer = handle("viewer");

        VoteService::new(&ctx)
            .submit_vote(&channel, &ClipRef::Seq(1), &viewer, RequestedVote::Dislike)
            .await
            .unwrap();

        let response = QueryService::new(&ctx)
            .get_clip_votes(&channel, &[ClipRef::Seq(1)], Some(&viewer))
            .await
            .unwrap();

        assert_eq!(response.clips[0].dislikes, 1);
        assert_eq!(response.clips[0].user_vote, Some(VoteDirection::Down));
        assert!(response.viewer_known);
    }

    #[tokio::test]
    async fn test_unknown_refs_skipped() {
        let ctx = ctx();
        let channel = seed_clip(&ctx, "AbcDef", 1).await;

        let response = QueryService::new(&ctx)
            .get_clip_votes(
                &channel,
                &[ClipRef::Seq(1), ClipRef::Seq(42), ClipRef::Id("nope".to_string())],
                None,
            )
            .await
            .unwrap();

        assert_eq!(response.clips.len(), 1);
        assert_eq!(response.clips[0].seq, 1);
    }
}
