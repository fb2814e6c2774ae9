//! Authenticated session value.

use crate::domain::foundation::{Actor, Timestamp};

use super::SessionToken;

/// A live login, keyed by its token.
///
/// Sessions are owned by the session store; callers work with clones.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: SessionToken,
    pub actor: Actor,
    pub expires_at: Timestamp,
}

impl Session {
    /// Starts a session for `actor` with a fresh token.
    pub fn issue(actor: Actor, ttl: std::time::Duration) -> Self {
        Self::with_token(SessionToken::generate(), actor, ttl)
    }

    /// Binds an existing token to `actor`, used when backfilling from an
    /// API token.
    pub fn with_token(token: SessionToken, actor: Actor, ttl: std::time::Duration) -> Self {
        Self {
            token,
            actor,
            expires_at: Timestamp::now().plus(ttl),
        }
    }

    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};
    use std::time::Duration;

    fn actor() -> Actor {
        Actor::new(UserId::from_raw(1), "ann", "Ann", "ann@lab.test", Role::User)
    }

    #[test]
    fn issue_sets_expiry_after_now() {
        let session = Session::issue(actor(), Duration::from_secs(3600));
        assert!(!session.is_expired_at(&Timestamp::now()));
        let later = Timestamp::now().plus(Duration::from_secs(7200));
        assert!(session.is_expired_at(&later));
    }

    #[test]
    fn with_token_keeps_presented_token() {
        let token = SessionToken::parse("api-token-1").unwrap();
        let session = Session::with_token(token.clone(), actor(), Duration::from_secs(60));
        assert_eq!(session.token, token);
    }
}
