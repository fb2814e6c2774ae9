//! bcrypt-backed password hashing.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::PasswordHasher;

/// Hashes with a fixed bcrypt work factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &Secret<String>) -> Result<String, DomainError> {
        let plain = password.expose_secret().clone();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
            .await
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("failed to hash password: {}", e),
                )
            })
    }

    async fn verify(&self, password: &Secret<String>, hash: &str) -> bool {
        let plain = password.expose_secret().clone();
        let hash = hash.to_string();
        match tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash)).await {
            Ok(Ok(matched)) => matched,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            }
        }
    }
}
