//! Database module for the storefront
//!
//! This module provides the persistence traits, their PostgreSQL and
//! in-memory implementations, models, and pool management.

pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod store;

// Re-export commonly used items
pub use memory::{MemoryChatStore, MemoryProductStore, MemoryUserStore};
pub use models::*;
pub use pool::{DbConfig, DbError, connect};
pub use repositories::{ChatRepository, ProductRepository, UserRepository};
pub use store::{ChatStore, ProductStore, StoreError, UserStore};

// Re-export sqlx types that might be needed
pub use sqlx::PgPool;
