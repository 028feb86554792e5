//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `ReflectionService` wires the three session handlers around one registry.

pub mod handlers;

pub use handlers::{
    FinishSessionCommand, FinishSessionError, FinishSessionHandler, FinishSessionResult,
    RandomSourceFactory, SessionRegistry, SharedEngine, StartSessionCommand, StartSessionHandler,
    StartSessionResult, SubmitAnswerCommand, SubmitAnswerError, SubmitAnswerHandler,
    SubmitAnswerResult,
};

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::reflection::{DialoguePolicy, QuestionBank};
use crate::ports::InferenceDelay;

/// The session handlers sharing one registry.
#[derive(Debug, Clone)]
pub struct ReflectionService {
    registry: Arc<SessionRegistry>,
    pub start: StartSessionHandler,
    pub submit: SubmitAnswerHandler,
    pub finish: FinishSessionHandler,
}

impl ReflectionService {
    pub fn new(
        bank: Arc<QuestionBank>,
        policy: DialoguePolicy,
        random: RandomSourceFactory,
        delay: Arc<dyn InferenceDelay>,
    ) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        Self {
            start: StartSessionHandler::new(Arc::clone(&registry), bank, policy, random),
            submit: SubmitAnswerHandler::new(Arc::clone(&registry), Arc::clone(&delay)),
            finish: FinishSessionHandler::new(Arc::clone(&registry), delay),
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Abandons a session. Returns false if it was not registered.
    pub async fn discard(&self, session_id: &SessionId) -> bool {
        self.registry.discard(session_id).await
    }
}
