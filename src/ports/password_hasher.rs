//! Password hashing port.

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::foundation::DomainError;

/// One-way credential hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Secret<String>) -> Result<String, DomainError>;

    /// Returns false on mismatch and on malformed hashes.
    async fn verify(&self, password: &Secret<String>, hash: &str) -> bool;
}
