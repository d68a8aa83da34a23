//! Rate limit model <-> entity mapper

use clipvote_core::entities::RateLimitWindow;
use clipvote_core::{DomainError, Handle};

use crate::models::RateLimitModel;

impl TryFrom<RateLimitModel> for RateLimitWindow {
    type Error = DomainError;

    fn try_from(model: RateLimitModel) -> Result<Self, Self::Error> {
        Ok(RateLimitWindow {
            voter: Handle::parse(&model.voter)?,
            vote_count: model.vote_count,
            window_start: model.window_start,
        })
    }
}
