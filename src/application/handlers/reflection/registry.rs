//! In-memory registry of live dialogue sessions.
//!
//! Each engine sits behind its own `tokio::sync::Mutex`, so turns on one
//! session are serialized while different sessions proceed independently.
//! The registry lock is only held long enough to clone the engine handle.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::domain::foundation::SessionId;
use crate::domain::reflection::DialogueEngine;

/// Shared handle to one session's engine.
pub type SharedEngine = Arc<Mutex<DialogueEngine>>;

/// Live sessions keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SharedEngine>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an engine under its session id and returns the shared handle.
    pub async fn insert(&self, engine: DialogueEngine) -> SharedEngine {
        let id = *engine.session().session_id();
        let shared = Arc::new(Mutex::new(engine));
        self.sessions.write().await.insert(id, Arc::clone(&shared));
        debug!(session_id = %id, "session registered");
        shared
    }

    pub async fn get(&self, id: &SessionId) -> Option<SharedEngine> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Abandons a session. Returns false if it was not registered.
    pub async fn discard(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!(session_id = %id, "session discarded");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ScriptedRandomSource;
    use crate::domain::reflection::QuestionBank;

    fn engine() -> DialogueEngine {
        DialogueEngine::start(QuestionBank::shared(), Box::new(ScriptedRandomSource::first())).0
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_handle() {
        let registry = SessionRegistry::new();
        let engine = engine();
        let id = *engine.session().session_id();
        let inserted = registry.insert(engine).await;

        let found = registry.get(&id).await.unwrap();
        assert!(Arc::ptr_eq(&inserted, &found));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn discard_removes_session() {
        let registry = SessionRegistry::new();
        let engine = engine();
        let id = *engine.session().session_id();
        registry.insert(engine).await;

        assert!(registry.discard(&id).await);
        assert!(!registry.discard(&id).await);
        assert!(registry.get(&id).await.is_none());
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_session_is_absent() {
        let registry = SessionRegistry::new();
        assert!(registry.get(&SessionId::new()).await.is_none());
    }
}
