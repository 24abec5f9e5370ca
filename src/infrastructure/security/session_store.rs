use crate::application::ApplicationResult;
use crate::application::ports::{session::SessionStore, time::Clock};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Process-local session store. Expiry is evaluated against the injected
/// clock; expired entries are dropped when next seen and swept whenever a new
/// session is opened.
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, DateTime<Utc>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut guard = self.sessions.lock();
        let before = guard.len();
        guard.retain(|_, expires_at| *expires_at > now);
        before - guard.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn open(&self) -> ApplicationResult<String> {
        let purged = self.purge_expired();
        if purged > 0 {
            tracing::debug!(purged, "expired sessions dropped");
        }
        let id = Uuid::new_v4().to_string();
        let expires_at = self.clock.now() + self.ttl;
        self.sessions.lock().insert(id.clone(), expires_at);
        tracing::debug!(%expires_at, "session opened");
        Ok(id)
    }

    async fn is_authenticated(&self, session_id: &str) -> ApplicationResult<bool> {
        let now = self.clock.now();
        let mut guard = self.sessions.lock();
        match guard.get(session_id) {
            Some(expires_at) if *expires_at > now => Ok(true),
            Some(_) => {
                guard.remove(session_id);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn revoke(&self, session_id: &str) -> ApplicationResult<()> {
        self.sessions.lock().remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn advance(&self, by: Duration) {
            *self.0.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock()
        }
    }

    fn store_with_clock() -> (InMemorySessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock(Mutex::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )));
        let store = InMemorySessionStore::new(Duration::minutes(30), clock.clone());
        (store, clock)
    }

    #[tokio::test]
    async fn opened_session_is_authenticated_until_revoked() {
        let (store, _) = store_with_clock();
        let id = store.open().await.unwrap();
        assert!(store.is_authenticated(&id).await.unwrap());

        store.revoke(&id).await.unwrap();
        assert!(!store.is_authenticated(&id).await.unwrap());
    }

    #[tokio::test]
    async fn sessions_expire_after_ttl() {
        let (store, clock) = store_with_clock();
        let id = store.open().await.unwrap();

        clock.advance(Duration::minutes(29));
        assert!(store.is_authenticated(&id).await.unwrap());

        clock.advance(Duration::minutes(2));
        assert!(!store.is_authenticated(&id).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_ids_are_rejected_and_revoking_them_is_harmless() {
        let (store, _) = store_with_clock();
        assert!(!store.is_authenticated("nope").await.unwrap());
        store.revoke("nope").await.unwrap();
    }

    #[tokio::test]
    async fn purge_removes_only_expired_sessions() {
        let (store, clock) = store_with_clock();
        store.open().await.unwrap();
        clock.advance(Duration::minutes(20));
        let fresh = store.open().await.unwrap();
        clock.advance(Duration::minutes(15));

        assert_eq!(store.purge_expired(), 1);
        assert!(store.is_authenticated(&fresh).await.unwrap());
    }

    #[tokio::test]
    async fn opening_a_session_sweeps_abandoned_ones() {
        let (store, clock) = store_with_clock();
        for _ in 0..5 {
            store.open().await.unwrap();
        }
        clock.advance(Duration::minutes(31));

        let live = store.open().await.unwrap();
        assert_eq!(store.sessions.lock().len(), 1);
        assert!(store.is_authenticated(&live).await.unwrap());
    }
}
