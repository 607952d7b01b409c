//! Database models for the storefront
//!
//! This module defines the entity structs that map to PostgreSQL tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// User Model
// ============================================================================

/// User entity representing a registered account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// User data for creation (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// User without sensitive data (for API responses)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

// ============================================================================
// Chat Model
// ============================================================================

/// One exchange between a user and the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChatEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Chat entry data for creation
#[derive(Debug, Clone)]
pub struct NewChatEntry {
    pub user_id: Uuid,
    pub message: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Product Model
// ============================================================================

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub image: String,
}

/// Product data for creation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub image: String,
}

impl Product {
    /// Case-insensitive substring match on name or description
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "ann@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            name: "Ann".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_serialization_skips_password_hash() {
        let json = serde_json::to_string(&sample_user()).unwrap();

        assert!(json.contains("ann@example.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("$2b$04$hash"));
    }

    #[test]
    fn test_user_response_from_user() {
        let user = sample_user();
        let id = user.id;
        let response: UserResponse = user.into();

        assert_eq!(response.id, id);
        assert_eq!(response.email, "ann@example.com");
        assert_eq!(response.name, "Ann");
    }

    #[test]
    fn test_product_matches_name_or_description() {
        let product = Product {
            id: Uuid::new_v4(),
            name: "Laptop Pro".to_string(),
            description: "High-performance laptop for professionals".to_string(),
            price: 1499.99,
            category: "Electronics".to_string(),
            stock: 30,
            image: String::new(),
        };

        assert!(product.matches("laptop"));
        assert!(product.matches("PROFESSIONALS"));
        assert!(product.matches(""));
        assert!(!product.matches("garden"));
    }
}
