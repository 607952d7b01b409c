//! JWT utilities for token generation and validation
//!
//! Session tokens are HS256-signed and carry `{user_id, iat, exp}`. They are
//! never stored server-side; expiry is the only way a token stops working.
//! Expiry is checked against the injected [`Clock`] rather than the system
//! time inside `jsonwebtoken`, so it can be pinned in tests.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::clock::Clock;

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// The only accepted signing algorithm
const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in hours
    pub token_ttl_hours: i64,
}

impl JwtConfig {
    /// Create a new JWT configuration
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }

    /// Set token lifetime
    pub fn token_ttl(mut self, hours: i64) -> Self {
        self.token_ttl_hours = hours;
        self
    }
}

/// JWT errors
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    Encoding(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::InvalidToken,
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject user id
    pub user_id: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get user ID as UUID
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.user_id).map_err(|_| JwtError::InvalidToken)
    }
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtService {
    /// Create a new JWT service
    pub fn new(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Token lifetime in hours
    pub fn token_ttl_hours(&self) -> i64 {
        self.config.token_ttl_hours
    }

    /// Issue a token for `user_id`, valid for the configured lifetime
    pub fn issue(&self, user_id: Uuid) -> Result<String, JwtError> {
        let now = self.clock.now();
        let exp = now + Duration::hours(self.config.token_ttl_hours);

        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Encoding(e.to_string()))
    }

    /// Verify signature, algorithm and expiry, then return the subject
    pub fn verify(&self, token: &str) -> Result<Uuid, JwtError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = token_data.claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(JwtError::Expired);
        }

        claims.user_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::{TimeZone, Utc};

    const TEST_SECRET: &str = "test_secret_key_for_testing_only_32bytes!";

    fn create_test_service() -> (Arc<FixedClock>, JwtService) {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let service = JwtService::new(JwtConfig::new(TEST_SECRET), clock.clone());
        (clock, service)
    }

    // ========================================================================
    // JwtConfig Tests
    // ========================================================================

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new("my_secret");

        assert_eq!(config.secret, "my_secret");
        assert_eq!(config.token_ttl_hours, DEFAULT_TOKEN_TTL_HOURS);
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("secret").token_ttl(2);
        assert_eq!(config.token_ttl_hours, 2);
    }

    // ========================================================================
    // Issue / Verify
    // ========================================================================

    #[test]
    fn test_issue_and_verify() {
        let (_, service) = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();

        assert_eq!(token.split('.').count(), 3);
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_claims_shape() {
        let (clock, service) = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue(user_id).unwrap();
        let data = decode::<Claims>(&token, &service.decoding_key, &service.validation).unwrap();

        assert_eq!(data.header.alg, Algorithm::HS256);
        assert_eq!(data.claims.user_id, user_id.to_string());
        assert_eq!(data.claims.iat, clock.now().timestamp());
        assert_eq!(data.claims.exp - data.claims.iat, 24 * 3600);
    }

    #[test]
    fn test_valid_until_just_before_expiry() {
        let (clock, service) = create_test_service();
        let user_id = Uuid::new_v4();
        let token = service.issue(user_id).unwrap();

        clock.advance(Duration::hours(24) - Duration::seconds(1));
        assert_eq!(service.verify(&token).unwrap(), user_id);
    }

    #[test]
    fn test_expired_at_exact_expiry() {
        let (clock, service) = create_test_service();
        let token = service.issue(Uuid::new_v4()).unwrap();

        clock.advance(Duration::hours(24));
        assert!(matches!(service.verify(&token), Err(JwtError::Expired)));

        clock.advance(Duration::days(30));
        assert!(matches!(service.verify(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_custom_ttl() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::new(start));
        let service = JwtService::new(JwtConfig::new(TEST_SECRET).token_ttl(1), clock.clone());
        let token = service.issue(Uuid::new_v4()).unwrap();

        clock.set(start + Duration::minutes(59));
        assert!(service.verify(&token).is_ok());

        clock.set(start + Duration::hours(1));
        assert!(matches!(service.verify(&token), Err(JwtError::Expired)));
    }

    // ========================================================================
    // Rejection Tests
    // ========================================================================

    #[test]
    fn test_wrong_key_rejected() {
        let (clock, service) = create_test_service();
        let other = JwtService::new(JwtConfig::new("a_completely_different_secret_key!!"), clock);

        let token = other.issue(Uuid::new_v4()).unwrap();
        assert!(matches!(service.verify(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_modified_payload_rejected() {
        let (_, service) = create_test_service();
        let victim = service.issue(Uuid::new_v4()).unwrap();
        let attacker = service.issue(Uuid::new_v4()).unwrap();

        let victim_parts: Vec<&str> = victim.split('.').collect();
        let attacker_parts: Vec<&str> = attacker.split('.').collect();
        let forged = format!(
            "{}.{}.{}",
            victim_parts[0], attacker_parts[1], victim_parts[2]
        );

        assert!(matches!(service.verify(&forged), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let (clock, service) = create_test_service();
        let claims = Claims {
            user_id: Uuid::new_v4().to_string(),
            iat: clock.now().timestamp(),
            exp: clock.now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let (clock, service) = create_test_service();
        let claims = Claims {
            user_id: "not-a-uuid".to_string(),
            iat: clock.now().timestamp(),
            exp: clock.now().timestamp() + 3600,
        };
        let token = encode(&Header::new(ALGORITHM), &claims, &service.encoding_key).unwrap();

        assert!(matches!(service.verify(&token), Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_garbage_rejected() {
        let (_, service) = create_test_service();

        for token in ["", "invalid", "a.b.c", "Bearer x"] {
            assert!(
                matches!(service.verify(token), Err(JwtError::InvalidToken)),
                "accepted {token:?}"
            );
        }
    }
}
