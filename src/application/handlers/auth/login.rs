//! LoginHandler - Command handler for password login.

use std::sync::Arc;
use std::time::Duration;

use secrecy::Secret;
use tracing::{info, warn};

use crate::domain::foundation::AuthError;
use crate::domain::session::Session;
use crate::ports::{CredentialStore, PasswordHasher, SessionStore};

/// Command to log in with an email or username.
#[derive(Debug)]
pub struct LoginCommand {
    pub identifier: String,
    pub password: Secret<String>,
}

/// A freshly issued session.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub session: Session,
    pub ttl: Duration,
}

pub struct LoginHandler {
    credentials: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    hasher: Arc<dyn PasswordHasher>,
    session_ttl: Duration,
}

impl LoginHandler {
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

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        // 1. Find the account
        let account = self
            .credentials
            .find_by_login(&cmd.identifier)
            .await
            .map_err(|err| AuthError::service_unavailable(err.message))?
            .ok_or(AuthError::InvalidCredentials)?;

        // 2. Check the password
        if !self.hasher.verify(&cmd.password, &account.password_hash).await {
            return Err(AuthError::InvalidCredentials);
        }

        // 3. Issue a session
        let session = Session::issue(account.actor, self.session_ttl);
        self.sessions.put(session.clone(), self.session_ttl).await;

        if let Err(err) = self.credentials.touch_last_login(session.actor.id).await {
            warn!(user_id = %session.actor.id, error = %err, "failed to record last login");
        }

        info!(user_id = %session.actor.id, "user logged in");
        Ok(LoginResult {
            session,
            ttl: self.session_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::BcryptHasher;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::adapters::session::InMemorySessionStore;
    use crate::domain::foundation::Role;

    const TEST_COST: u32 = 4;

    const TTL: Duration = Duration::from_secs(600);

    async fn setup() -> (LoginHandler, Arc<InMemorySessionStore>) {
        let db = Arc::new(InMemoryDatabase::new());
        let hasher = Arc::new(BcryptHasher::new(TEST_COST));
        let hash = hasher
            .hash(&Secret::new("correct horse".to_string()))
            .await
            .unwrap();
        db.seed_user("rosalind", "rf@lab.test", &hash, Role::User).await;
        let sessions = Arc::new(InMemorySessionStore::new());
        let handler = LoginHandler::new(db, sessions.clone(), hasher, TTL);
        (handler, sessions)
    }

    fn cmd(identifier: &str, password: &str) -> LoginCommand {
        LoginCommand {
            identifier: identifier.to_string(),
            password: Secret::new(password.to_string()),
        }
    }

    #[tokio::test]
    async fn login_by_username_or_email_issues_session() {
        let (handler, sessions) = setup().await;

        for identifier in ["rosalind", "rf@lab.test"] {
            let result = handler.handle(cmd(identifier, "correct horse")).await.unwrap();
            assert_eq!(result.session.actor.username, "rosalind");
            assert!(sessions.get(&result.session.token).await.is_some());
        }
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (handler, _) = setup().await;
        let err = handler.handle(cmd("rosalind", "wrong")).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn unknown_user_is_invalid_credentials() {
        let (handler, _) = setup().await;
        let err = handler.handle(cmd("nobody", "correct horse")).await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
    }
}
