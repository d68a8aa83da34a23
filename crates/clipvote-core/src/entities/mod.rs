//! Domain entities

mod aggregate;
mod clip;
mod rate_limit;
mod vote;
mod voter_profile;

pub use aggregate::AggregateCount;
pub use clip::Clip;
pub use rate_limit::{RateLimitDecision, RateLimitWindow};
pub use vote::{VoteKey, VoteLedgerEntry};
pub use voter_profile::{VoterProfile, VoterStats};
