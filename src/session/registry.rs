use super::session::Session;
use anyhow::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-wide map of active sessions (session_id -> session).
///
/// This is the sole source of truth for in-flight sessions. It is created at
/// startup and deliberately not persisted: a restart drops all live sessions.
/// `remove` is the serialization point for finalization — the explicit-end
/// handler and the timeout callback both go through it, and only the caller
/// that gets the session back may produce the call record.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a newly created session. Ids are uuid-derived, so a
    /// collision indicates a bug and is rejected rather than overwritten.
    pub async fn insert(&self, session: Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.session_id) {
            anyhow::bail!("session {} already registered", session.session_id);
        }
        sessions.insert(session.session_id.clone(), session);
        Ok(())
    }

    /// Snapshot of a live session, if present.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().await.get(session_id).cloned()
    }

    /// Apply a mutation to a live session. Returns false if it is absent.
    pub async fn update<F>(&self, session_id: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut Session),
    {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(session_id) {
            Some(session) => {
                mutate(session);
                true
            }
            None => false,
        }
    }

    /// Remove a session and return its final state. Idempotent: a second
    /// remove for the same id observes `None` and must treat the session
    /// as already finalized.
    pub async fn remove(&self, session_id: &str) -> Option<Session> {
        self.sessions.write().await.remove(session_id)
    }

    /// Number of currently active sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
