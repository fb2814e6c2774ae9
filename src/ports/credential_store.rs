//! Credential store port - persistent users and API tokens.

use async_trait::async_trait;

use crate::domain::account::StoredAccount;
use crate::domain::foundation::{Actor, DomainError, Role, UserId};

/// A user row about to be inserted; the password is already hashed.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Persistent identity lookups used by login, registration and the
/// auth resolver's fallback path.
///
/// # Contract
///
/// - API tokens are looked up by SHA-256 hex digest, never in clear
/// - `create_account` returns a `Conflict` error when the email or the
///   username is taken
/// - Storage failures are `DatabaseError`, never "not found"
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Finds the owner of an API token by digest.
    async fn find_by_api_token(&self, digest: &str) -> Result<Option<Actor>, DomainError>;

    /// Finds an account by email or username.
    async fn find_by_login(&self, identifier: &str) -> Result<Option<StoredAccount>, DomainError>;

    async fn create_account(&self, record: &AccountRecord) -> Result<Actor, DomainError>;

    /// Records a successful login.
    async fn touch_last_login(&self, user_id: UserId) -> Result<(), DomainError>;
}
