//! Authentication module for the storefront
//!
//! This module provides authentication functionality including:
//! - Password hashing and the credential store
//! - Session token issuance and verification
//! - The authorization gate guarding protected routes
//! - REST API endpoints for auth operations

pub mod api;
pub mod credentials;
pub mod gate;
pub mod jwt;
pub mod password;
pub mod service;

pub use api::{ApiError, auth_api_router};
pub use credentials::{CredentialError, CredentialStore};
pub use gate::{AuthGate, CurrentUser};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use password::PasswordHasher;
pub use service::{AuthError, AuthService, LoginRequest, LoginResponse, RegisterRequest};
