//! AuthResolver - turns presented credentials into an actor.
//!
//! Lookup order:
//!
//! 1. Session store (in-memory, TTL-bounded)
//! 2. Persistent API tokens, by SHA-256 digest
//!
//! A hit on step 2 backfills the session store so the next call with the
//! same token stays in memory.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error};

use crate::domain::foundation::{Actor, AuthError};
use crate::domain::session::{Credentials, Session};
use crate::ports::{CredentialStore, SessionStore};

/// Settings the resolver needs from the auth configuration.
#[derive(Debug, Clone, Copy)]
pub struct ResolverSettings {
    /// TTL applied to sessions backfilled from API tokens.
    pub session_ttl: Duration,
    /// Whether `X-Auth-Token` and `?token=` are honoured.
    pub allow_fallback_token: bool,
}

pub struct AuthResolver {
    sessions: Arc<dyn SessionStore>,
    credentials: Arc<dyn CredentialStore>,
    settings: ResolverSettings,
}

impl AuthResolver {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        credentials: Arc<dyn CredentialStore>,
        settings: ResolverSettings,
    ) -> Self {
        Self {
            sessions,
            credentials,
            settings,
        }
    }

    /// Resolves the acting user.
    ///
    /// # Errors
    ///
    /// - `MissingToken` if no accepted channel carried a token
    /// - `InvalidToken` if the token matches no session or API token
    /// - `ServiceUnavailable` if the credential store failed
    pub async fn resolve(&self, credentials: &Credentials) -> Result<Actor, AuthError> {
        let token = credentials
            .token(self.settings.allow_fallback_token)
            .ok_or(AuthError::MissingToken)?;

        if let Some(session) = self.sessions.get(&token).await {
            return Ok(session.actor);
        }

        let actor = self
            .credentials
            .find_by_api_token(&token.digest())
            .await
            .map_err(|err| {
                error!(error = %err, "credential store lookup failed");
                AuthError::service_unavailable(err.message)
            })?
            .ok_or(AuthError::InvalidToken)?;

        debug!(user_id = %actor.id, "resolved actor from api token");
        let ttl = self.settings.session_ttl;
        self.sessions
            .put(Session::with_token(token, actor.clone(), ttl), ttl)
            .await;

        Ok(actor)
    }
}
