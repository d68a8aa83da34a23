//! Database models (SQLx `FromRow` types)

mod clip;
mod rate_limit;
mod vote;
mod voter_profile;

pub use clip::ClipModel;
pub use rate_limit::RateLimitModel;
pub use vote::{AggregateModel, VoteModel, VoterStatsModel};
pub use voter_profile::VoterProfileModel;
