//! In-memory session store keyed by session id. Nothing outlives the process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::interview::models::{InterviewSession, SessionId};

/// One session, locked for the whole of each user action (LLM call included).
pub type SessionHandle = Arc<Mutex<InterviewSession>>;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Creates an `Empty` session, evicting idle ones first.
    pub fn create(&self) -> (SessionId, SessionHandle) {
        self.evict_idle();

        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(InterviewSession::new(id)));
        self.sessions.write().insert(id, handle.clone());
        info!("created interview session (session_id={id})");
        (id, handle)
    }

    pub fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.read().get(&id).cloned()
    }

    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            info!("ended interview session (session_id={id})");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Drops sessions idle longer than the TTL. Sessions busy with an action are kept.
    pub fn evict_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|id, handle| match handle.try_lock() {
            Ok(session) if session.is_idle(now, self.ttl) => {
                info!("evicted idle interview session (session_id={id})");
                false
            }
            _ => true,
        });
        before - sessions.len()
    }
}
