//! PostgreSQL repository implementations

mod clip;
mod error;
pub(crate) mod rate_limit;
mod settings;
mod vote;
mod voter_profile;

pub use clip::PgClipRepository;
pub use error::map_db_error;
pub use rate_limit::PgRateLimitRepository;
pub use settings::PgSettingsRepository;
pub use vote::PgVoteStore;
pub use voter_profile::PgVoterProfileRepository;
