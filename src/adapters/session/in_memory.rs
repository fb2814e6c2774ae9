//! In-memory session store with TTL expiry and a background sweeper.
//!
//! Expiry is tracked with `tokio::time::Instant`, so tests can drive it
//! with a paused clock.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::domain::session::{Session, SessionToken};
use crate::ports::SessionStore;

/// Process-local session cache.
///
/// Entries are keyed by the raw token. Contents are lost on restart;
/// API-token holders are transparently re-resolved by the auth resolver.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<String, (Session, Instant)>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Runs `purge_expired` every `every` until `shutdown` flips to true
    /// or its sender is dropped.
    pub fn spawn_sweeper(
        store: Arc<dyn SessionStore>,
        every: Duration,
        mut shutdown: watch::Receiver<bool>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = time::interval(every);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            tracing::debug!("session sweeper stopping");
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        let purged = store.purge_expired().await;
                        if purged > 0 {
                            tracing::debug!(purged, "expired sessions purged");
                        }
                    }
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, session: Session, ttl: Duration) {
        let deadline = Instant::now() + ttl;
        self.entries
            .write()
            .await
            .insert(session.token.as_str().to_string(), (session, deadline));
    }

    async fn get(&self, token: &SessionToken) -> Option<Session> {
        let entries = self.entries.read().await;
        match entries.get(token.as_str()) {
            Some((session, deadline)) if Instant::now() < *deadline => Some(session.clone()),
            _ => None,
        }
    }

    async fn delete(&self, token: &SessionToken) {
        self.entries.write().await.remove(token.as_str());
    }

    async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (_, deadline)| now < *deadline);
        before - entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Actor, Role, UserId};

    fn session() -> Session {
        let actor = Actor::new(UserId::from_raw(1), "ana", "Ana", "ana@lab.test", Role::User);
        Session::issue(actor, Duration::from_secs(60))
    }

    #[tokio::test(start_paused = true)]
    async fn get_hides_expired_entries_before_sweep() {
        let store = InMemorySessionStore::new();
        let s = session();
        store.put(s.clone(), Duration::from_secs(60)).await;
        assert_eq!(store.get(&s.token).await, Some(s.clone()));

        time::advance(Duration::from_secs(61)).await;
        assert_eq!(store.get(&s.token).await, None);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn purge_removes_only_expired() {
        let store = InMemorySessionStore::new();
        let short = session();
        let long = session();
        store.put(short.clone(), Duration::from_secs(10)).await;
        store.put(long.clone(), Duration::from_secs(100)).await;

        time::advance(Duration::from_secs(11)).await;
        assert_eq!(store.purge_expired().await, 1);
        assert!(store.get(&long.token).await.is_some());
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let store = InMemorySessionStore::new();
        let s = session();
        store.put(s.clone(), Duration::from_secs(60)).await;
        store.delete(&s.token).await;
        assert!(store.get(&s.token).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_purges_and_stops_on_shutdown() {
        let store = InMemorySessionStore::new();
        store.put(session(), Duration::from_secs(5)).await;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = InMemorySessionStore::spawn_sweeper(
            Arc::new(store.clone()),
            Duration::from_secs(10),
            shutdown_rx,
        );

        time::sleep(Duration::from_secs(11)).await;
        assert!(store.is_empty().await);

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();
    }
}
