//! Authentication service
//!
//! Registration and login on top of the credential store and the token
//! service. `AuthError` is the taxonomy every auth failure is reported in.

use uuid::Uuid;

use crate::core::auth::credentials::{CredentialError, CredentialStore};
use crate::core::auth::jwt::{JwtError, JwtService};
use crate::core::db::models::UserResponse;

/// Authentication error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password must be at most 71 bytes")]
    PasswordTooLong,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::DuplicateEmail => AuthError::DuplicateEmail,
            CredentialError::InvalidCredentials => AuthError::InvalidCredentials,
            CredentialError::NotFound => AuthError::Unauthenticated,
            CredentialError::PasswordTooLong => AuthError::PasswordTooLong,
            CredentialError::Internal(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired | JwtError::InvalidToken => AuthError::Unauthenticated,
            JwtError::Encoding(msg) => AuthError::Internal(msg),
        }
    }
}

/// Registration request data
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login request data
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: a session token plus the public user fields
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    credentials: CredentialStore,
    jwt_service: JwtService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(credentials: CredentialStore, jwt_service: JwtService) -> Self {
        Self {
            credentials,
            jwt_service,
        }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<Uuid, AuthError> {
        let user_id = self
            .credentials
            .create_user(&request.email, &request.password, &request.name)
            .await?;

        Ok(user_id)
    }

    /// Check credentials and issue a session token
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .credentials
            .verify_credentials(&request.email, &request.password)
            .await?;

        let token = self.jwt_service.issue(user.id)?;

        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }
}
