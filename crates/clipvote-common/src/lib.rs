//! # clipvote-common
//!
//! Shared utilities including configuration, error handling,
//! authentication, caching, and telemetry.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use cache::TtlCache;
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    HeuristicConfig, HttpRateLimitConfig, JwtConfig, ServerConfig, SettingsCacheConfig,
    VoteLimitsConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
