//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` and implements one
//! slice of the vote subsystem.

pub mod admin;
pub mod context;
pub mod error;
pub mod heuristic;
pub mod query;
pub mod rate_limit;
pub mod settings;
pub mod vote;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use admin::AdminService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use heuristic::HeuristicService;
pub use query::QueryService;
pub use rate_limit::RateLimitService;
pub use settings::CachedSettings;
pub use vote::VoteService;
