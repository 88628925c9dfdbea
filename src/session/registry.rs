//! Session registry
//!
//! In-memory map of independent editing sessions, keyed by session id.
//! Each session sits behind its own mutex: a mutation and the re-render it
//! triggers happen under one lock, so readers never see a half-applied
//! change.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::RwLock;

use super::instance::{Session, SessionId, SessionSummary};

/// Shared handle to one session
pub type SessionHandle = Arc<Mutex<Session>>;

/// Errors raised by the registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("session limit of {0} reached")]
    Full(usize),
}

/// Thread-safe session registry
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
    max_sessions: usize,
}

impl SessionRegistry {
    /// Create an empty registry holding at most `max_sessions` sessions
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    /// Register a session and return its handle
    pub async fn insert(&self, session: Session) -> Result<SessionHandle, RegistryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            tracing::warn!("Rejecting session {}: limit {} reached", session.id(), self.max_sessions);
            return Err(RegistryError::Full(self.max_sessions));
        }

        let id = session.id().to_string();
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id.clone(), handle.clone());
        tracing::info!("Created session {} ({} active)", id, sessions.len());
        Ok(handle)
    }

    pub async fn get(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Summaries of all sessions, most recently updated first
    pub async fn list(&self) -> Vec<SessionSummary> {
        let handles: Vec<SessionHandle> = self.sessions.read().await.values().cloned().collect();
        let mut summaries: Vec<SessionSummary> =
            handles.iter().map(|handle| handle.lock().summary()).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.id.cmp(&b.id)));
        summaries
    }

    /// Drop a session; returns whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!("Closed session {}", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(1024)
    }
}
