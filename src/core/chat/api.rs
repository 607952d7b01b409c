//! Chat API endpoints
//!
//! Both routes require a session token:
//! - POST /api/chat - Send a message, get the assistant's reply
//! - GET /api/chat/history - Last 50 exchanges, newest first

use axum::{
    Json, Router,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::core::auth::api::{ApiError, JsonBody};
use crate::core::auth::gate::{AuthGate, CurrentUser};
use crate::core::chat::service::{ChatError, ChatService};
use crate::core::db::models::ChatEntry;

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        tracing::error!("Chat request failed: {}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new("Internal server error", "INTERNAL_ERROR")),
        )
            .into_response()
    }
}

/// Request body for POST /api/chat
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Response body for POST /api/chat
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Create the chat API router
pub fn chat_api_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    ChatService: FromRef<S>,
    AuthGate: FromRef<S>,
{
    Router::new()
        .route("/api/chat", post(send_handler))
        .route("/api/chat/history", get(history_handler))
}

/// POST /api/chat
async fn send_handler(
    CurrentUser(user): CurrentUser,
    State(chat_service): State<ChatService>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Json<ChatResponse>, ChatError> {
    tracing::debug!(user_id = %user.id, "Chat message received");

    let response = chat_service.send(&user, &request.message).await?;

    Ok(Json(ChatResponse { response }))
}

/// GET /api/chat/history
async fn history_handler(
    CurrentUser(user): CurrentUser,
    State(chat_service): State<ChatService>,
) -> Result<Json<Vec<ChatEntry>>, ChatError> {
    let history = chat_service.history(&user).await?;

    Ok(Json(history))
}
