//! Repository traits (ports)

mod repositories;

pub use repositories::{
    ClipRepository, RateLimitRepository, RepoResult, SettingsProvider, VoteStore,
    VoteTransition, VoterProfileRepository,
};
