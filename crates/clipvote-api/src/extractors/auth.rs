//! Authentication extractors
//!
//! Extracts and validates JWT tokens from the Authorization header.
//! `AuthVoter` is the base extractor; `AdminAuth` additionally requires
//! the `admin` claim.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use clipvote_common::AppError;
use clipvote_core::Handle;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated voter extracted from a JWT token
#[derive(Debug, Clone)]
pub struct AuthVoter {
    /// Voter handle from the token subject
    pub voter: Handle,
    /// Whether the token carries the admin claim
    pub admin: bool,
}

impl AuthVoter {
    /// Create a new AuthVoter
    pub fn new(voter: Handle, admin: bool) -> Self {
        Self { voter, admin }
    }
}

fn validate_bearer<S>(state: &S, token: &str) -> Result<AuthVoter, ApiError>
where
    AppState: FromRef<S>,
{
    let app_state = AppState::from_ref(state);

    let claims = app_state.jwt_service().validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Invalid access token");
        ApiError::InvalidAuthFormat
    })?;

    let voter = claims.voter().map_err(|e| {
        tracing::warn!(error = %e, "Invalid voter handle in token");
        ApiError::InvalidAuthFormat
    })?;

    Ok(AuthVoter::new(voter, claims.admin))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthVoter
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        validate_bearer(state, bearer.token())
    }
}

/// Optional authenticated voter
///
/// Returns None if no authorization header is present,
/// or an error if the token is invalid.
#[derive(Debug, Clone)]
pub struct OptionalAuthVoter(pub Option<AuthVoter>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthVoter
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_result =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await;

        match auth_result {
            Ok(TypedHeader(Authorization(bearer))) => {
                let voter = validate_bearer(state, bearer.token())?;
                Ok(OptionalAuthVoter(Some(voter)))
            }
            Err(_) => Ok(OptionalAuthVoter(None)),
        }
    }
}

/// Authenticated admin
///
/// Same as `AuthVoter` but rejects tokens without the admin claim.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// Admin's own voter handle
    pub voter: Handle,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthVoter::from_request_parts(parts, state).await?;

        if !auth.admin {
            return Err(ApiError::App(AppError::InsufficientPermissions));
        }

        Ok(AdminAuth { voter: auth.voter })
    }
}
