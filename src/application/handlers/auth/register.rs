//! RegisterHandler - Command handler for self-service registration.
//!
//! A successful registration logs the new user in.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::account::{RegistrationDraft, RegistrationError};
use crate::domain::session::Session;
use crate::ports::{AccountRecord, CredentialStore, PasswordHasher, SessionStore};

use super::LoginResult;

pub struct RegisterHandler {
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<dyn PasswordHasher>,
    session_ttl: Duration,
}

impl RegisterHandler {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        hasher: Arc<dyn PasswordHasher>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            sessions,
            hasher,
            session_ttl,
        }
    }

    pub async fn handle(&self, draft: RegistrationDraft) -> Result<LoginResult, RegistrationError> {
        // 1. Validate
        let account = draft.validate()?;

        // 2. Hash and insert
        let password_hash = self.hasher.hash(&account.password).await?;
        let actor = self
            .credentials
            .create_account(&AccountRecord {
                full_name: account.full_name,
                username: account.username,
                email: account.email,
                password_hash,
                role: account.role,
            })
            .await?;

        // 3. Log in
        let session = Session::issue(actor, self.session_ttl);
        self.sessions.put(session.clone(), self.session_ttl).await;

        info!(user_id = %session.actor.id, "user registered");
        Ok(LoginResult {
            session,
            ttl: self.session_ttl,
        })
    }
}
