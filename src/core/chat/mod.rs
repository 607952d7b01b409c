//! Chat assistant scoped to the authenticated user

pub mod api;
pub mod responder;
pub mod service;

pub use api::chat_api_router;
pub use responder::{KeywordResponder, Responder};
pub use service::{ChatError, ChatService, HISTORY_LIMIT};
