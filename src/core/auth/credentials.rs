//! Credential store
//!
//! Owns user records and password verification. Raw passwords never leave
//! this module except as input to bcrypt, which runs on the blocking pool.

use std::sync::Arc;

use uuid::Uuid;

use crate::core::auth::password::PasswordHasher;
use crate::core::db::models::{NewUser, User};
use crate::core::db::store::{StoreError, UserStore};

/// Plaintext behind the decoy hash checked for unknown emails
const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

/// Credential store error types
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    NotFound,

    #[error("Password exceeds the bcrypt input limit")]
    PasswordTooLong,

    #[error("Credential store failure: {0}")]
    Internal(String),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => CredentialError::DuplicateEmail,
            StoreError::Database(e) => CredentialError::Internal(e.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for CredentialError {
    fn from(err: bcrypt::BcryptError) -> Self {
        match err {
            bcrypt::BcryptError::Truncation(_) => CredentialError::PasswordTooLong,
            e => CredentialError::Internal(e.to_string()),
        }
    }
}

/// Run CPU-bound work off the async executor
async fn run_blocking<T, F>(f: F) -> Result<T, CredentialError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CredentialError::Internal(format!("blocking task failed: {e}")))
}

/// User identity records plus password hashing
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    decoy_hash: Arc<str>,
}

impl CredentialStore {
    /// Create a credential store; hashes the decoy password at the configured cost
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher) -> Result<Self, CredentialError> {
        let decoy_hash = hasher.hash(DECOY_PASSWORD)?;

        Ok(Self {
            users,
            hasher,
            decoy_hash: decoy_hash.into(),
        })
    }

    /// Create a user. The store's uniqueness constraint decides duplicates.
    ///
    /// Passwords bcrypt would truncate are refused with `PasswordTooLong`.
    pub async fn create_user(
        &self,
        email: &str,
        raw_password: &str,
        name: &str,
    ) -> Result<Uuid, CredentialError> {
        let hasher = self.hasher;
        let password = raw_password.to_owned();
        let password_hash = run_blocking(move || hasher.hash(&password)).await??;

        let user = self
            .users
            .insert(NewUser {
                email: email.to_owned(),
                password_hash,
                name: name.to_owned(),
            })
            .await?;

        tracing::debug!(user_id = %user.id, "Created user record");
        Ok(user.id)
    }

    /// Check an email/password pair and return the matching user.
    ///
    /// Unknown email and wrong password both return `InvalidCredentials`, and
    /// both pay for one bcrypt verification. A password longer than bcrypt
    /// can read never matches.
    pub async fn verify_credentials(
        &self,
        email: &str,
        raw_password: &str,
    ) -> Result<User, CredentialError> {
        let user = self.users.find_by_email(email).await?;

        let hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.decoy_hash.to_string(),
        };

        let hasher = self.hasher;
        let password = raw_password.to_owned();
        let outcome = run_blocking(move || hasher.verify(&password, &hash)).await?;

        match (outcome, user) {
            (Ok(true), Some(user)) => Ok(user),
            (Ok(_), _) => Err(CredentialError::InvalidCredentials),
            (Err(bcrypt::BcryptError::Truncation(len)), _) => {
                tracing::debug!(len, "Rejected over-long password at login");
                Err(CredentialError::InvalidCredentials)
            }
            (Err(e), user) => {
                let user_id = user.map(|u| u.id);
                tracing::warn!(user_id = ?user_id, "Stored password hash rejected: {}", e);
                Err(CredentialError::InvalidCredentials)
            }
        }
    }

    /// Load a user by id
    pub async fn find_by_id(&self, id: Uuid) -> Result<User, CredentialError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(CredentialError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::db::memory::MemoryUserStore;

    fn create_test_store() -> (Arc<MemoryUserStore>, CredentialStore) {
        let users = Arc::new(MemoryUserStore::new());
        let store = CredentialStore::new(users.clone(), PasswordHasher::new(4)).unwrap();
        (users, store)
    }

    // ========================================================================
    // Registration
    // ========================================================================

    #[tokio::test]
    async fn test_create_user_stores_hash_not_password() {
        let (users, store) = create_test_store();

        let id = store.create_user("a@x.com", "pw1", "Ann").await.unwrap();
        let user = users.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.name, "Ann");
        assert_ne!(user.password_hash, "pw1");
        assert!(user.password_hash.starts_with("$2"));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (_, store) = create_test_store();

        store.create_user("a@x.com", "pw1", "Ann").await.unwrap();
        let result = store.create_user("a@x.com", "other", "Someone").await;

        assert!(matches!(result, Err(CredentialError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_email_match_is_case_sensitive() {
        let (_, store) = create_test_store();

        store.create_user("a@x.com", "pw1", "Ann").await.unwrap();
        assert!(store.create_user("A@x.com", "pw1", "Ann").await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_single_winner() {
        let (_, store) = create_test_store();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_user("race@x.com", &format!("pw{i}"), "Racer")
                        .await
                })
            })
            .collect();

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(CredentialError::DuplicateEmail) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 7);
    }

    #[tokio::test]
    async fn test_over_long_password_rejected_at_registration() {
        let (users, store) = create_test_store();

        let password = format!("{}RIGHT", "a".repeat(72));
        let result = store.create_user("long@x.com", &password, "Long").await;

        assert!(matches!(result, Err(CredentialError::PasswordTooLong)));
        assert!(users.find_by_email("long@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_at_bcrypt_limit_accepted() {
        let (_, store) = create_test_store();

        let password = "p".repeat(71);
        let id = store.create_user("edge@x.com", &password, "Edge").await.unwrap();

        let user = store.verify_credentials("edge@x.com", &password).await.unwrap();
        assert_eq!(user.id, id);
    }

    // ========================================================================
    // Verification
    // ========================================================================

    #[tokio::test]
    async fn test_verify_correct_password() {
        let (_, store) = create_test_store();

        let id = store.create_user("a@x.com", "pw1", "Ann").await.unwrap();
        let user = store.verify_credentials("a@x.com", "pw1").await.unwrap();

        assert_eq!(user.id, id);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.name, "Ann");
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let (_, store) = create_test_store();

        store.create_user("a@x.com", "pw1", "Ann").await.unwrap();
        let result = store.verify_credentials("a@x.com", "wrong").await;

        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_unknown_email() {
        let (_, store) = create_test_store();

        let result = store.verify_credentials("nobody@x.com", "pw1").await;
        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));

        // The decoy password must not open anything either
        let result = store
            .verify_credentials("nobody@x.com", DECOY_PASSWORD)
            .await;
        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_does_not_cross_accounts() {
        let (_, store) = create_test_store();

        store.create_user("a@x.com", "pw-a", "Ann").await.unwrap();
        store.create_user("b@x.com", "pw-b", "Bob").await.unwrap();

        let result = store.verify_credentials("a@x.com", "pw-b").await;
        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_ignores_suffix_beyond_bcrypt_limit() {
        let (_, store) = create_test_store();

        let prefix = "a".repeat(71);
        store.create_user("a@x.com", &prefix, "Ann").await.unwrap();

        for guess in [format!("{prefix}WRONG"), format!("{prefix}a")] {
            let result = store.verify_credentials("a@x.com", &guess).await;
            assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_malformed_stored_hash_is_invalid_credentials() {
        let (users, store) = create_test_store();

        users
            .insert(NewUser {
                email: "broken@x.com".to_string(),
                password_hash: "not-a-bcrypt-hash".to_string(),
                name: "Broken".to_string(),
            })
            .await
            .unwrap();

        let result = store.verify_credentials("broken@x.com", "anything").await;
        assert!(matches!(result, Err(CredentialError::InvalidCredentials)));
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    #[tokio::test]
    async fn test_find_by_id() {
        let (users, store) = create_test_store();

        let id = store.create_user("a@x.com", "pw1", "Ann").await.unwrap();
        assert_eq!(store.find_by_id(id).await.unwrap().email, "a@x.com");

        users.remove(id);
        assert!(matches!(
            store.find_by_id(id).await,
            Err(CredentialError::NotFound)
        ));
    }

    #[test]
    fn test_store_error_conversion() {
        let err: CredentialError = StoreError::DuplicateEmail.into();
        assert!(matches!(err, CredentialError::DuplicateEmail));

        let err: CredentialError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, CredentialError::Internal(_)));
    }

    #[test]
    fn test_bcrypt_error_conversion() {
        let err: CredentialError = bcrypt::BcryptError::Truncation(80).into();
        assert!(matches!(err, CredentialError::PasswordTooLong));

        let err: CredentialError = bcrypt::BcryptError::CostNotAllowed(99).into();
        assert!(matches!(err, CredentialError::Internal(_)));
    }
}
