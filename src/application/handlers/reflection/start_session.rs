//! StartSessionHandler - Opens a new reflection session.

use std::fmt;
use std::sync::Arc;
use tracing::info;

use super::registry::SessionRegistry;
use crate::domain::foundation::SessionId;
use crate::domain::reflection::{
    CompanionMessage, DialogueEngine, DialoguePolicy, Question, QuestionBank, ResponseComposer,
};
use crate::ports::RandomSource;

/// Builds a fresh random source for each new session.
pub type RandomSourceFactory = Arc<dyn Fn() -> Box<dyn RandomSource> + Send + Sync>;

/// Command to open a session.
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand {
    /// Overrides the handler's policy for this session only.
    pub policy: Option<DialoguePolicy>,
}

/// Result of opening a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: SessionId,
    /// Greeting to show before the first question.
    pub welcome: CompanionMessage,
    pub first_question: Question,
}

/// Handler for opening sessions.
#[derive(Clone)]
pub struct StartSessionHandler {
    registry: Arc<SessionRegistry>,
    bank: Arc<QuestionBank>,
    policy: DialoguePolicy,
    random: RandomSourceFactory,
}

impl StartSessionHandler {
    pub fn new(
        registry: Arc<SessionRegistry>,
        bank: Arc<QuestionBank>,
        policy: DialoguePolicy,
        random: RandomSourceFactory,
    ) -> Self {
        Self {
            registry,
            bank,
            policy,
            random,
        }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> StartSessionResult {
        let policy = cmd.policy.unwrap_or(self.policy);
        let (engine, first_question) =
            DialogueEngine::start(Arc::clone(&self.bank), (self.random)());
        let engine = engine.with_policy(policy);
        let session_id = *engine.session().session_id();

        self.registry.insert(engine).await;
        info!(%session_id, identification = ?policy.identification, "session opened");

        StartSessionResult {
            session_id,
            welcome: ResponseComposer::new().welcome(),
            first_question,
        }
    }
}

impl fmt::Debug for StartSessionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartSessionHandler")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
