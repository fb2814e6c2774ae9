//! LogoutHandler - ends the presented session.

use std::sync::Arc;

use tracing::info;

use crate::domain::session::SessionToken;
use crate::ports::SessionStore;

pub struct LogoutHandler {
    sessions: Arc<dyn SessionStore>,
}

impl LogoutHandler {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }

    /// Deletes the session if a token was presented. Always succeeds.
    pub async fn handle(&self, token: Option<SessionToken>) {
        if let Some(token) = token {
            if let Some(session) = self.sessions.get(&token).await {
                info!(user_id = %session.actor.id, "user logged out");
            }
            self.sessions.delete(&token).await;
        }
    }
}
