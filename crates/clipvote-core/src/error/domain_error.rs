//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Clip not found: {channel}/{clip}")]
    ClipNotFound { channel: String, clip: String },

    #[error("Voter not tracked: {0}")]
    VoterNotFound(String),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid vote type: {0}")]
    InvalidVoteType(String),

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    // =========================================================================
    // Gate Rejections
    // =========================================================================
    /// Voter is flagged by the heuristic engine and not yet reviewed
    #[error("Voter is suspended pending review")]
    Suspended,

    /// Fixed-window cap hit; retry once the window rolls over
    #[error("Rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: i64 },

    #[error("Admin privileges required")]
    NotPrivileged,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::ClipNotFound { .. } => "UNKNOWN_CLIP",
            Self::VoterNotFound(_) => "UNKNOWN_VOTER",
            Self::InvalidVoteType(_) => "INVALID_VOTE_TYPE",
            Self::InvalidHandle(_) => "INVALID_HANDLE",
            Self::Suspended => "VOTER_SUSPENDED",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::NotPrivileged => "MISSING_PRIVILEGES",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ClipNotFound { .. } | Self::VoterNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidVoteType(_) | Self::InvalidHandle(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Suspended | Self::NotPrivileged)
    }

    /// Check if this is a rate-limit rejection
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Retry delay for rate-limit rejections, if any
    pub fn retry_after_secs(&self) -> Option<i64> {
        match self {
            Self::RateLimited { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }
}
