//! Clip model <-> entity mapper

use clipvote_core::entities::Clip;
use clipvote_core::{DomainError, Handle};

use crate::models::ClipModel;

impl TryFrom<ClipModel> for Clip {
    type Error = DomainError;

    fn try_from(model: ClipModel) -> Result<Self, Self::Error> {
        Ok(Clip {
            channel_login: Handle::parse(&model.channel_login)?,
            clip_id: model.clip_id,
            seq: model.seq,
            title: model.title,
            blocked: model.blocked,
        })
    }
}
