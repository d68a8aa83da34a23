//! Vote ledger and aggregate model <-> entity mappers

use clipvote_core::entities::{AggregateCount, VoteLedgerEntry, VoterStats};
use clipvote_core::{DomainError, Handle};

use crate::models::{AggregateModel, VoteModel, VoterStatsModel};

impl TryFrom<VoteModel> for VoteLedgerEntry {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        Ok(VoteLedgerEntry {
            channel_login: Handle::parse(&model.channel_login)?,
            clip_id: model.clip_id,
            voter: Handle::parse(&model.voter)?,
            direction: model.direction.parse()?,
            voted_at: model.voted_at,
        })
    }
}

impl TryFrom<AggregateModel> for AggregateCount {
    type Error = DomainError;

    fn try_from(model: AggregateModel) -> Result<Self, Self::Error> {
        Ok(AggregateCount {
            channel_login: Handle::parse(&model.channel_login)?,
            clip_id: model.clip_id,
            up_votes: model.up_votes,
            down_votes: model.down_votes,
            updated_at: model.updated_at,
        })
    }
}

impl From<VoterStatsModel> for VoterStats {
    fn from(model: VoterStatsModel) -> Self {
        VoterStats {
            total: model.total,
            downvotes: model.downvotes,
            last_hour: model.last_hour,
            last_day: model.last_day,
            first_vote_at: model.first_vote_at,
        }
    }
}
