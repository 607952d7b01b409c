//! Password hashing with bcrypt
//!
//! The work factor comes from configuration. Hashes embed their own salt and
//! cost, so verification works across cost changes.
//!
//! bcrypt reads at most 72 bytes, null terminator included. Both operations use the
//! non-truncating variants, so an over-long password fails with
//! `BcryptError::Truncation` instead of matching on its prefix.

use bcrypt::BcryptError;

/// Salted, adaptive one-way password hashing
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password with a fresh salt
    pub fn hash(&self, password: &str) -> Result<String, BcryptError> {
        bcrypt::non_truncating_hash(password, self.cost)
    }

    /// Check a password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, BcryptError> {
        bcrypt::non_truncating_verify(password, hash)
    }
}
