//! Chat service
//!
//! Every operation takes the owning [`User`] resolved by the authorization
//! gate, so one user's transcript is never reachable from another's session.

use std::sync::Arc;

use crate::core::chat::responder::Responder;
use crate::core::clock::Clock;
use crate::core::db::models::{ChatEntry, NewChatEntry, User};
use crate::core::db::store::{ChatStore, StoreError};

/// Most entries returned by a history read
pub const HISTORY_LIMIT: usize = 50;

/// Chat service error types
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Chat storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Per-user chat exchange and transcript
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn ChatStore>,
    responder: Arc<dyn Responder>,
    clock: Arc<dyn Clock>,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn ChatStore>,
        responder: Arc<dyn Responder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            responder,
            clock,
        }
    }

    /// Answer `message` and record the exchange under `user`
    pub async fn send(&self, user: &User, message: &str) -> Result<String, ChatError> {
        let response = self.responder.respond(message);

        self.store
            .append(NewChatEntry {
                user_id: user.id,
                message: message.to_string(),
                response: response.clone(),
                timestamp: self.clock.now(),
            })
            .await?;

        Ok(response)
    }

    /// The user's most recent exchanges, newest first
    pub async fn history(&self, user: &User) -> Result<Vec<ChatEntry>, ChatError> {
        Ok(self.store.recent_for_user(user.id, HISTORY_LIMIT).await?)
    }
}
