//! Session store port - TTL-bounded token cache.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::session::{Session, SessionToken};

/// Maps opaque tokens to live sessions.
///
/// # Contract
///
/// - `get` never returns an entry past its TTL, swept or not
/// - Implementations are internally synchronized
/// - Losing the store's contents is tolerated: callers fall back to the
///   credential store
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn put(&self, session: Session, ttl: Duration);

    async fn get(&self, token: &SessionToken) -> Option<Session>;

    async fn delete(&self, token: &SessionToken);

    /// Removes expired entries and returns how many were dropped.
    async fn purge_expired(&self) -> usize;
}
