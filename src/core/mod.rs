//! Core domain logic: authentication, chat, catalog and persistence

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod clock;
pub mod config;
pub mod db;
