//! Voter profile model <-> entity mapper

use clipvote_core::entities::VoterProfile;
use clipvote_core::{DomainError, Handle};

use crate::models::VoterProfileModel;

impl TryFrom<VoterProfileModel> for VoterProfile {
    type Error = DomainError;

    fn try_from(model: VoterProfileModel) -> Result<Self, Self::Error> {
        Ok(VoterProfile {
            voter: Handle::parse(&model.voter)?,
            total_votes: model.total_votes,
            votes_last_hour: model.votes_last_hour,
            votes_last_day: model.votes_last_day,
            downvote_ratio: model.downvote_ratio,
            first_vote_at: model.first_vote_at,
            last_vote_at: model.last_vote_at,
            flagged: model.flagged,
            flag_reason: model.flag_reason,
            flagged_at: model.flagged_at,
            reviewed: model.reviewed,
            reviewed_at: model.reviewed_at,
        })
    }
}
