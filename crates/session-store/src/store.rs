//! In-memory session store with expiry.

use crate::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info, instrument};

/// Expiry settings for the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle time after which an unregistered session is dropped
    pub pending_ttl: Duration,
    /// Idle time after which a registered session is dropped
    pub idle_ttl: Duration,
    /// How often the background sweep runs
    pub cleanup_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pending_ttl: Duration::from_secs(30 * 60),
            idle_ttl: Duration::from_secs(30 * 24 * 60 * 60),
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

/// Sessions keyed by chat identifier.
///
/// Each session sits behind its own mutex: handling one session never waits
/// on another, and updates to the same session are serialized.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<Session>>>>>,
    config: SessionConfig,
}

impl SessionStore {
    /// Create a new session store.
    ///
    /// Spawns a background task to periodically evict expired sessions.
    pub fn new(config: SessionConfig) -> Self {
        let store = Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        };

        let cleanup_store = store.clone();
        tokio::spawn(async move {
            cleanup_store.cleanup_loop().await;
        });

        info!(
            "Session store initialized (pending_ttl={:?}, idle_ttl={:?})",
            store.config.pending_ttl, store.config.idle_ttl
        );

        store
    }

    async fn cleanup_loop(&self) {
        loop {
            tokio::time::sleep(self.config.cleanup_interval).await;

            let removed = self.evict_expired().await;
            if removed > 0 {
                debug!("Evicted {} expired sessions", removed);
            }
        }
    }

    fn is_expired(&self, session: &Session, now: Instant) -> bool {
        let ttl = if session.is_registered() {
            self.config.idle_ttl
        } else {
            self.config.pending_ttl
        };
        now.saturating_duration_since(session.last_active()) >= ttl
    }

    /// Lock a session for exclusive use, creating it on first contact.
    ///
    /// An expired session holding a pending code is marked lapsed; any other
    /// expired session is replaced by a fresh one.
    #[instrument(skip(self))]
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<Session> {
        let existing = self.sessions.read().await.get(session_id).cloned();

        let entry = match existing {
            Some(entry) => entry,
            None => {
                let mut sessions = self.sessions.write().await;
                sessions
                    .entry(session_id.to_string())
                    .or_insert_with(|| {
                        debug!("New session");
                        Arc::new(Mutex::new(Session::new(session_id)))
                    })
                    .clone()
            }
        };

        let mut session = entry.lock_owned().await;
        let now = Instant::now();
        if self.is_expired(&session, now) {
            if session.lapse() {
                info!("Pending code lapsed");
            } else {
                info!("Session expired, starting over");
                *session = Session::new(session_id);
            }
        }
        session.touch(now);
        session
    }

    /// Snapshot of a live session.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        let entry = self.sessions.read().await.get(session_id).cloned()?;
        let session = entry.lock().await;

        if self.is_expired(&session, Instant::now()) {
            None
        } else {
            Some(session.clone())
        }
    }

    /// Drop a session.
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Remove expired sessions that nobody is using. Returns how many were removed.
    ///
    /// An expired session with a pending code is kept one more period as
    /// lapsed instead.
    pub async fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, entry| {
            // Someone holds or is waiting for this session.
            if Arc::strong_count(entry) > 1 {
                return true;
            }
            match entry.try_lock() {
                Ok(mut session) => {
                    if !self.is_expired(&session, now) {
                        return true;
                    }
                    if session.lapse() {
                        session.touch(now);
                        return true;
                    }
                    false
                }
                Err(_) => true,
            }
        });

        before - sessions.len()
    }

    /// Number of tracked sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
