//! Authentication types for the domain layer.
//!
//! `Actor` is the identity every protected operation runs as. It is
//! resolved once per request by the auth resolver and then travels through
//! request extensions as an immutable value.
//!
//! # Example
//!
//! ```ignore
//! // In HTTP middleware, after token resolution:
//! let actor = resolver.resolve(&credentials).await?;
//! request.extensions_mut().insert(actor);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::{ErrorCode, UserId, ValidationError};

/// Access role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// The authenticated user a request acts on behalf of.
///
/// Carries only what handlers need for attribution. Never contains the
/// credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl Actor {
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns true if the actor has administrative rights.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authentication errors that can occur during credential resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token was presented through any accepted channel.
    #[error("Missing authentication token")]
    MissingToken,

    /// A token was presented but matches no session or API token.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Login identifier or password did not match.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The credential store could not be reached.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::ServiceUnavailable(_) => ErrorCode::DatabaseError,
            _ => ErrorCode::Unauthenticated,
        }
    }
}
