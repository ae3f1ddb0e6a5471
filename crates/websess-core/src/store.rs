use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cookie::CookieJar;
use crate::error::SessionError;

/// TTL applied uniformly to every session in a store.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// One server-side session record. Owned by the store; `get` hands out a
/// clone so nothing outlives the lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub created_at: Instant,
    pub cookie: CookieJar,
}

impl Session {
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Thread-safe session storage: one coarse mutex around the map, held only
/// for the duration of the map operation. Explicitly constructed and shared
/// as `Arc<SessionStore>`; never a global, so tests build independent
/// stores with their own TTLs.
///
/// Reads never enforce expiry (lazy eviction): a session past its TTL is
/// still returned until the reaper removes it, so "is this session still
/// good" is eventually consistent within one poll interval.
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Insert a session for `id`, stamped with the current instant. An
    /// existing record for the same id is overwritten: the session clock
    /// starts once, at creation, and repeated logins restart it.
    pub fn create(&self, id: &str, cookie: CookieJar) {
        let session = Session {
            id: id.to_string(),
            created_at: Instant::now(),
            cookie,
        };
        self.sessions.lock().insert(id.to_string(), session);
        debug!("Created session {}", id);
    }

    /// Clone of the record for `id`. Does not check expiry; only the
    /// reaper removes sessions.
    pub fn get(&self, id: &str) -> Result<Session, SessionError> {
        let session = self
            .sessions
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::SessionNotFound(id.to_string()))?;
        debug!(
            "Retrieved session {} (age: {:?})",
            id,
            session.created_at.elapsed()
        );
        Ok(session)
    }

    /// Idempotent; removing an absent id is a no-op.
    pub fn remove(&self, id: &str) {
        if self.sessions.lock().remove(id).is_some() {
            debug!("Removed session {}", id);
        }
    }

    /// Point-in-time snapshot of all session ids, copied under the lock
    /// and iterated without it. Callers must tolerate a slightly stale
    /// view.
    pub fn ids(&self) -> Vec<String> {
        self.sessions.lock().keys().cloned().collect()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn create_get_remove() {
        let store = SessionStore::new(DEFAULT_TTL);
        store.create("u1", CookieJar::new());
        assert_eq!(store.len(), 1);

        let session = store.get("u1").unwrap();
        assert_eq!(session.id, "u1");

        store.remove("u1");
        assert!(store.is_empty());
    }

    #[test]
    fn get_absent_id_is_session_not_found() {
        let store = SessionStore::new(DEFAULT_TTL);
        assert_eq!(
            store.get("ghost"),
            Err(SessionError::SessionNotFound("ghost".to_string()))
        );

        store.create("u1", CookieJar::new());
        store.remove("u1");
        assert_eq!(
            store.get("u1"),
            Err(SessionError::SessionNotFound("u1".to_string()))
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let store = SessionStore::new(DEFAULT_TTL);
        store.create("u1", CookieJar::new());
        store.create("u2", CookieJar::new());
        store.remove("u1");
        store.remove("u1");
        assert_eq!(store.len(), 1);
        assert!(store.get("u2").is_ok());
    }

    #[test]
    fn create_overwrites_existing_id() {
        let store = SessionStore::new(DEFAULT_TTL);
        let mut jar = CookieJar::new();
        jar.insert("sessionId", "u1");
        store.create("u1", jar.clone());
        let first = store.get("u1").unwrap();

        jar.insert("extra", "yes");
        store.create("u1", jar);
        let second = store.get("u1").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(second.cookie.len(), 2);
        assert!(second.created_at >= first.created_at);
    }

    #[test]
    fn ids_snapshot_is_detached_from_later_writes() {
        let store = SessionStore::new(DEFAULT_TTL);
        store.create("u1", CookieJar::new());
        store.create("u2", CookieJar::new());

        let snapshot = store.ids();
        store.create("u3", CookieJar::new());
        store.remove("u1");

        assert_eq!(snapshot.len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn concurrent_creates_and_gets_lose_nothing() {
        let store = Arc::new(SessionStore::new(DEFAULT_TTL));

        let writers: Vec<_> = (0..100)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let id = format!("user-{i}");
                    let mut jar = CookieJar::new();
                    jar.insert("sessionId", id.as_str());
                    store.create(&id, jar);
                })
            })
            .collect();
        for handle in writers {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 100);

        let readers: Vec<_> = (0..100)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let id = format!("user-{i}");
                    let session = store.get(&id).unwrap();
                    assert_eq!(session.id, id);
                    assert_eq!(session.cookie.value("sessionId").unwrap(), id);
                })
            })
            .collect();
        for handle in readers {
            handle.join().unwrap();
        }
    }
}
