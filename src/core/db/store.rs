//! Persistence boundaries
//!
//! Services talk to storage through these traits. PostgreSQL implementations
//! live in `repositories`, in-memory ones in `memory`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::db::models::{
    ChatEntry, NewChatEntry, NewProduct, NewUser, Product, User,
};

/// Storage error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// User records with a uniqueness constraint on email
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `DuplicateEmail` when the constraint rejects the row.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;
}

/// Append-only chat transcript
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn append(&self, entry: NewChatEntry) -> Result<ChatEntry, StoreError>;

    /// Entries owned by `user_id`, newest first, at most `limit`
    async fn recent_for_user(&self, user_id: Uuid, limit: usize)
    -> Result<Vec<ChatEntry>, StoreError>;
}

/// Product catalog
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Products whose name or description contains `query`, ignoring case
    async fn search(&self, query: &str) -> Result<Vec<Product>, StoreError>;

    /// Remove every product and insert `products`; returns the inserted count
    async fn replace_all(&self, products: Vec<NewProduct>) -> Result<usize, StoreError>;
}
