//! Authorization gate for protected routes
//!
//! A request gets through only if its `Authorization: Bearer <token>` header
//! carries a token that verifies AND names a user that still exists. Every
//! failure along the way is reported as `AuthError::Unauthenticated`. The
//! specific cause only goes to the log.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::core::auth::credentials::{CredentialError, CredentialStore};
use crate::core::auth::jwt::JwtService;
use crate::core::auth::service::AuthError;
use crate::core::db::models::User;

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively; the token is whatever follows
/// the first space, trimmed.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, rest) = header_value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }

    let token = rest.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolves an `Authorization` header to a live user
#[derive(Clone)]
pub struct AuthGate {
    jwt_service: JwtService,
    credentials: CredentialStore,
}

impl AuthGate {
    pub fn new(jwt_service: JwtService, credentials: CredentialStore) -> Self {
        Self {
            jwt_service,
            credentials,
        }
    }

    /// Authorize a request given its raw `Authorization` header, if any
    pub async fn authorize(&self, header_value: Option<&str>) -> Result<User, AuthError> {
        let Some(token) = header_value.and_then(bearer_token) else {
            tracing::debug!("Rejected request: missing or malformed Authorization header");
            return Err(AuthError::Unauthenticated);
        };

        let user_id = self.jwt_service.verify(token).map_err(|e| {
            tracing::debug!("Rejected request: {}", e);
            AuthError::Unauthenticated
        })?;

        self.credentials.find_by_id(user_id).await.map_err(|e| {
            match e {
                CredentialError::NotFound => {
                    tracing::debug!(%user_id, "Rejected request: token subject no longer exists");
                }
                e => tracing::error!(%user_id, "Rejected request: user lookup failed: {}", e),
            }
            AuthError::Unauthenticated
        })
    }
}

/// The user resolved by [`AuthGate`]. Taking this as a handler argument
/// guarantees the handler only runs for authenticated requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AuthGate: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = AuthGate::from_ref(state);
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        gate.authorize(header_value).await.map(CurrentUser)
    }
}
