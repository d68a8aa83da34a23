//! In-memory implementations of the repository traits
//!
//! Backs tests and local development. Each store guards its state with
//! a single `parking_lot::Mutex`, which gives the same atomicity the
//! PostgreSQL backend gets from transactions: a vote transition or a
//! rate-limit consume is observed fully applied or not at all.

mod clip;
mod rate_limit;
mod settings;
mod vote;
mod voter_profile;

pub use clip::MemClipRepository;
pub use rate_limit::MemRateLimitRepository;
pub use settings::{StaticSettingsProvider, UnavailableSettingsProvider};
pub use vote::MemVoteStore;
pub use voter_profile::MemVoterProfileRepository;
