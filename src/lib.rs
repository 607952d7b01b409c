//! Storefront - product catalog, accounts and a per-user chat assistant
//!
//! An axum backend with bcrypt credentials, HS256 session tokens and an
//! authorization gate in front of every user-scoped route.

pub mod app;
pub mod core;
