//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use clipvote_common::AppError;
use clipvote_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation (suspension, rate limit, unknown clip, ...)
    Domain(DomainError),

    /// Application error (auth, validation, etc.)
    App(AppError),

    /// Voting is switched off for the channel
    VotesDisabled,

    /// Validation error
    Validation(String),

    /// Internal error
    Internal(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::VotesDisabled => write!(f, "Voting is disabled for this channel"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => {
                if e.is_not_found() {
                    404
                } else if e.is_authorization() {
                    403
                } else if e.is_validation() {
                    400
                } else if e.is_rate_limited() {
                    429
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::VotesDisabled => 403,
            Self::Validation(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::VotesDisabled => "VOTES_DISABLED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Retry delay in seconds, present only for rate-limit errors
    pub fn retry_after_secs(&self) -> Option<i64> {
        match self {
            Self::Domain(e) => e.retry_after_secs(),
            Self::App(e) => e.retry_after_secs(),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::App(e) => e,
            ServiceError::VotesDisabled => AppError::InsufficientPermissions,
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Internal(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status() {
        let err = ServiceError::from(DomainError::Suspended);
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "VOTER_SUSPENDED");

        let err = ServiceError::from(DomainError::RateLimited {
            retry_after_secs: 45,
        });
        assert_eq!(err.status_code(), 429);
        assert_eq!(err.retry_after_secs(), Some(45));
    }

    #[test]
    fn test_votes_disabled() {
        let err = ServiceError::VotesDisabled;
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "VOTES_DISABLED");
        assert_eq!(err.retry_after_secs(), None);
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("clip list is empty");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_convert_to_app_error() {
        let service_err = ServiceError::from(DomainError::ClipNotFound {
            channel: "streamer".to_string(),
            clip: "#4".to_string(),
        });
        let app_err: AppError = service_err.into();
        assert_eq!(app_err.status_code(), 404);
    }
}
