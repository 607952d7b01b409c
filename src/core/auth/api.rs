//! Auth API endpoints
//!
//! Provides REST API endpoints for authentication:
//! - POST /api/auth/register - Register a new user
//! - POST /api/auth/login - Login and get a session token
//! - GET /api/auth/me - Get current user info

use axum::{
    Json, Router,
    extract::{FromRef, FromRequest, Request, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;

use crate::core::auth::gate::{AuthGate, CurrentUser};
use crate::core::auth::service::{
    AuthError, AuthService, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::core::db::models::UserResponse;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
    pub code: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Convert AuthError to API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::DuplicateEmail => (StatusCode::BAD_REQUEST, "EMAIL_EXISTS"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            AuthError::PasswordTooLong => (StatusCode::BAD_REQUEST, "PASSWORD_TOO_LONG"),
            AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            AuthError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let message = match &self {
            AuthError::Internal(cause) => {
                tracing::error!("Internal auth error: {}", cause);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ApiError::new(message, code))).into_response()
    }
}

/// JSON request body whose rejections use the `{message, code}` error shape.
///
/// Status codes are axum's: 415 for a missing content type, 400 for
/// malformed JSON and 422 for a body that does not fit `T`.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                let error = ApiError::new(rejection.body_text(), "INVALID_REQUEST");
                Err((rejection.status(), Json(error)).into_response())
            }
        }
    }
}

/// Plain message response
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create the auth API router
pub fn auth_api_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    AuthService: FromRef<S>,
    AuthGate: FromRef<S>,
{
    Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/me", get(me_handler))
}

/// POST /api/auth/register
/// Register a new user
async fn register_handler(
    State(auth_service): State<AuthService>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    tracing::info!("Registration attempt for email: {}", request.email);

    let user_id = auth_service.register(request).await?;

    tracing::info!(%user_id, "User registered successfully");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// POST /api/auth/login
/// Login and get a session token
async fn login_handler(
    State(auth_service): State<AuthService>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::info!("Login attempt for email: {}", request.email);

    let response = auth_service.login(request).await.inspect_err(|e| {
        tracing::debug!("Login failed: {}", e);
    })?;

    tracing::info!(user_id = %response.user.id, "User logged in successfully");

    Ok(Json(response))
}

/// GET /api/auth/me
/// Get current user info from the session token
async fn me_handler(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
