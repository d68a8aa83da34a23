//! # clipvote-db
//!
//! Storage layer implementing the `clipvote-core` repository traits.
//!
//! Two backends ship side by side:
//!
//! - PostgreSQL via SQLx (`Pg*` types) for deployment. The vote
//!   transition runs inside a database transaction and the rate-limit
//!   window is a single conditional upsert, so neither can be observed
//!   half-applied.
//! - In-memory (`Mem*` types) for tests and local development, with
//!   the same atomicity guarantees provided by a store-level lock.

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    MemClipRepository, MemRateLimitRepository, MemVoteStore, MemVoterProfileRepository,
    StaticSettingsProvider, UnavailableSettingsProvider,
};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgClipRepository, PgRateLimitRepository, PgSettingsRepository, PgVoteStore,
    PgVoterProfileRepository,
};
