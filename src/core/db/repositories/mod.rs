//! Database repositories for the storefront
//!
//! PostgreSQL implementations of the store traits in `core::db::store`.

pub mod chat;
pub mod product;
pub mod user;

pub use chat::ChatRepository;
pub use product::ProductRepository;
pub use user::UserRepository;
