//! Application configuration structs
//!
//! Loads configuration from environment variables. The abuse-tuning
//! sections (vote limits, heuristic thresholds) are validated and
//! range-clamped on load; nothing downstream re-checks them.

use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub vote_limits: VoteLimitsConfig,
    pub heuristic: HeuristicConfig,
    pub http_rate_limit: HttpRateLimitConfig,
    pub settings_cache: SettingsCacheConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_token_expiry")]
    pub token_expiry: i64,
}

/// Per-voter vote rate limiting (fixed window, persisted in the store)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VoteLimitsConfig {
    #[serde(default = "default_vote_window_secs")]
    pub window_secs: i64,
    #[serde(default = "default_vote_max")]
    pub max_votes: i64,
}

impl VoteLimitsConfig {
    /// Clamp both fields into sane operating ranges
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.window_secs = self.window_secs.clamp(1, 86_400);
        self.max_votes = self.max_votes.clamp(1, 10_000);
        self
    }
}

impl Default for VoteLimitsConfig {
    fn default() -> Self {
        Self {
            window_secs: default_vote_window_secs(),
            max_votes: default_vote_max(),
        }
    }
}

/// Abuse heuristic thresholds
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HeuristicConfig {
    /// Minimum vote count before the ratio and new-account rules apply
    #[serde(default = "default_heuristic_min_votes")]
    pub min_votes: i64,
    /// Downvote ratio at or above which a voter is flagged
    #[serde(default = "default_downvote_ratio")]
    pub downvote_ratio: f64,
    /// Votes in the trailing hour at or above which a voter is flagged
    #[serde(default = "default_velocity_per_hour")]
    pub velocity_per_hour: i64,
    /// Account age (seconds since first vote) under which rapid voting flags
    #[serde(default = "default_new_account_secs")]
    pub new_account_secs: i64,
}

impl HeuristicConfig {
    /// Clamp every threshold into its valid range
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.min_votes = self.min_votes.clamp(1, 1_000_000);
        self.downvote_ratio = self.downvote_ratio.clamp(0.0, 1.0);
        self.velocity_per_hour = self.velocity_per_hour.clamp(1, 1_000_000);
        self.new_account_secs = self.new_account_secs.clamp(0, 86_400 * 30);
        self
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            min_votes: default_heuristic_min_votes(),
            downvote_ratio: default_downvote_ratio(),
            velocity_per_hour: default_velocity_per_hour(),
            new_account_secs: default_new_account_secs(),
        }
    }
}

/// HTTP-layer rate limiting (global governor, in front of everything)
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HttpRateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for HttpRateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

/// TTL for the cached per-channel settings lookups
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SettingsCacheConfig {
    #[serde(default = "default_settings_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SettingsCacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_settings_ttl_secs(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "clipvote".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_vote_window_secs() -> i64 {
    300
}

fn default_vote_max() -> i64 {
    30
}

fn default_heuristic_min_votes() -> i64 {
    10
}

fn default_downvote_ratio() -> f64 {
    0.9
}

fn default_velocity_per_hour() -> i64 {
    50
}

fn default_new_account_secs() -> i64 {
    3600
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_settings_ttl_secs() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| default_host()),
                port: env::var("SERVER_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("SERVER_PORT"))?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?,
                token_expiry: env::var("JWT_TOKEN_EXPIRY")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_token_expiry),
            },
            vote_limits: VoteLimitsConfig {
                window_secs: env::var("VOTE_RATE_LIMIT_WINDOW_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_vote_window_secs),
                max_votes: env::var("VOTE_RATE_LIMIT_MAX_VOTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_vote_max),
            }
            .clamped(),
            heuristic: HeuristicConfig {
                min_votes: env::var("HEURISTIC_MIN_VOTES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_heuristic_min_votes),
                downvote_ratio: env::var("HEURISTIC_DOWNVOTE_RATIO")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_downvote_ratio),
                velocity_per_hour: env::var("HEURISTIC_VELOCITY_PER_HOUR")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_velocity_per_hour),
                new_account_secs: env::var("HEURISTIC_NEW_ACCOUNT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_new_account_secs),
            }
            .clamped(),
            http_rate_limit: HttpRateLimitConfig {
                requests_per_second: env::var("HTTP_RATE_LIMIT_REQUESTS_PER_SECOND")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_requests_per_second),
                burst: env::var("HTTP_RATE_LIMIT_BURST")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_burst),
            },
            settings_cache: SettingsCacheConfig {
                ttl_secs: env::var("SETTINGS_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_settings_ttl_secs),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| s.split(',').map(str::trim).map(String::from).collect())
                    .unwrap_or_default(),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
