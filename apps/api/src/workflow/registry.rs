//! Live workflow sessions, addressed by session id.
//!
//! The registry lock only guards the map and is released before any await
//! on a session; all waiting happens on the per-session mutex, so one
//! session's slow LLM call never blocks another session's events. A session
//! has a single writer by design — two clients driving the same id
//! serialize on the session mutex, last write wins.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::workflow::machine::WorkflowSession;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<WorkflowSession>>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh DRAFT session and returns a handle to it.
    pub async fn create(&self) -> Arc<Mutex<WorkflowSession>> {
        let session = WorkflowSession::new();
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<WorkflowSession>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Drops the session object. The persisted workflow record, if any,
    /// stays behind as history.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::workflow::WorkflowStatus;

    #[tokio::test]
    async fn test_created_sessions_start_in_draft() {
        let registry = SessionRegistry::new();
        let handle = registry.create().await;
        let session = handle.lock().await;

        assert_eq!(session.status, WorkflowStatus::Draft);
        assert!(registry.get(session.id).await.is_some());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let registry = SessionRegistry::new();
        let first = registry.create().await;
        let second = registry.create().await;

        first.lock().await.set_input("Thema A".to_string());
        second.lock().await.set_input("Thema B".to_string());

        assert_eq!(first.lock().await.input_content, "Thema A");
        assert_eq!(second.lock().await.input_content, "Thema B");
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn test_remove_drops_the_session() {
        let registry = SessionRegistry::new();
        let handle = registry.create().await;
        let id = handle.lock().await.id;

        assert!(registry.remove(id).await);
        assert!(registry.get(id).await.is_none());
        assert!(!registry.remove(id).await);
    }

    #[tokio::test]
    async fn test_handles_share_one_session() {
        let registry = SessionRegistry::new();
        let handle = registry.create().await;
        let id = handle.lock().await.id;

        let other = registry.get(id).await.unwrap();
        other.lock().await.set_edited("Geänderte Fassung".to_string());

        assert_eq!(handle.lock().await.edited_post, "Geänderte Fassung");
    }
}
