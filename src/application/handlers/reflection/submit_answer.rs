//! SubmitAnswer command handler.
//!
//! Answers the pending question of a live session. Only one turn per session
//! may be in flight: a submission that arrives while another is still being
//! analysed is rejected, not queued.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use super::registry::SessionRegistry;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::reflection::{CompanionMessage, DialogueState, Emotion, Question};
use crate::ports::InferenceDelay;

/// Command to answer the pending question.
#[derive(Debug, Clone)]
pub struct SubmitAnswerCommand {
    pub session_id: SessionId,
    /// Raw user utterance.
    pub utterance: String,
}

impl SubmitAnswerCommand {
    pub fn new(session_id: SessionId, utterance: impl Into<String>) -> Self {
        Self {
            session_id,
            utterance: utterance.into(),
        }
    }
}

/// Errors that can occur when submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitAnswerError {
    /// Utterance is empty or whitespace only.
    #[error("Validation error: answer cannot be empty")]
    EmptyUtterance,

    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    /// Another turn on this session is still being processed.
    #[error("Session {0} is busy with another answer")]
    SessionBusy(SessionId),

    /// No question is pending; the caller should finish the session.
    #[error("Session {0} has ended")]
    SessionEnded(SessionId),

    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for SubmitAnswerError {
    fn from(err: DomainError) -> Self {
        SubmitAnswerError::Domain(err.to_string())
    }
}

/// Result of an accepted turn.
#[derive(Debug, Clone)]
pub struct SubmitAnswerResult {
    /// Next question; `None` means the session ended with this turn.
    pub next_question: Option<Question>,
    pub message: CompanionMessage,
    pub emotion: Emotion,
    pub state: DialogueState,
}

impl SubmitAnswerResult {
    pub fn is_final(&self) -> bool {
        self.next_question.is_none()
    }
}

/// Handler for SubmitAnswer commands.
#[derive(Clone)]
pub struct SubmitAnswerHandler {
    registry: Arc<SessionRegistry>,
    delay: Arc<dyn InferenceDelay>,
}

impl SubmitAnswerHandler {
    pub fn new(registry: Arc<SessionRegistry>, delay: Arc<dyn InferenceDelay>) -> Self {
        Self { registry, delay }
    }

    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, SubmitAnswerError> {
        if cmd.utterance.trim().is_empty() {
            return Err(SubmitAnswerError::EmptyUtterance);
        }

        let shared = self
            .registry
            .get(&cmd.session_id)
            .await
            .ok_or(SubmitAnswerError::SessionNotFound(cmd.session_id))?;

        let mut engine = shared.try_lock().map_err(|_| {
            warn!(session_id = %cmd.session_id, "overlapping answer rejected");
            SubmitAnswerError::SessionBusy(cmd.session_id)
        })?;

        // The lock stays held across the emulated analysis.
        self.delay.before_turn().await;

        let outcome = engine.submit(&cmd.utterance).map_err(|err| match err.code {
            ErrorCode::SessionEnded => SubmitAnswerError::SessionEnded(cmd.session_id),
            _ => SubmitAnswerError::from(err),
        })?;

        Ok(SubmitAnswerResult {
            next_question: outcome.next_question,
            message: outcome.message,
            emotion: outcome.emotion,
            state: outcome.state,
        })
    }
}

impl fmt::Debug for SubmitAnswerHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitAnswerHandler").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{NoDelay, ScriptedRandomSource, SimulatedInferenceDelay};
    use crate::domain::reflection::{DialogueEngine, QuestionBank};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    /// Blocks inside `before_turn` until released.
    #[derive(Default)]
    struct GateDelay {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl InferenceDelay for GateDelay {
        async fn before_turn(&self) {
            self.entered.notify_one();
            self.release.notified().await;
        }

        async fn before_guidance(&self) {}
    }

    async fn registered(registry: &SessionRegistry) -> SessionId {
        let (engine, _) =
            DialogueEngine::start(QuestionBank::shared(), Box::new(ScriptedRandomSource::first()));
        let id = *engine.session().session_id();
        registry.insert(engine).await;
        id
    }

    fn handler(registry: Arc<SessionRegistry>) -> SubmitAnswerHandler {
        SubmitAnswerHandler::new(registry, Arc::new(NoDelay))
    }

    mod validation {
        use super::*;

        #[tokio::test]
        async fn rejects_blank_utterance_without_recording() {
            let registry = Arc::new(SessionRegistry::new());
            let id = registered(&registry).await;

            for blank in ["", "   ", "\n\t"] {
                let result = handler(Arc::clone(&registry))
                    .handle(SubmitAnswerCommand::new(id, blank))
                    .await;
                assert_eq!(result.unwrap_err(), SubmitAnswerError::EmptyUtterance);
            }

            let engine = registry.get(&id).await.unwrap();
            assert!(engine.lock().await.session().responses().is_empty());
        }

        #[tokio::test]
        async fn rejects_unknown_session() {
            let registry = Arc::new(SessionRegistry::new());
            let id = SessionId::new();
            let result = handler(registry)
                .handle(SubmitAnswerCommand::new(id, "我很好"))
                .await;
            assert_eq!(result.unwrap_err(), SubmitAnswerError::SessionNotFound(id));
        }
    }

    mod turns {
        use super::*;

        #[tokio::test]
        async fn first_answer_returns_second_question() {
            let registry = Arc::new(SessionRegistry::new());
            let id = registered(&registry).await;
            let result = handler(registry)
                .handle(SubmitAnswerCommand::new(id, "我很焦虑，压力很大"))
                .await
                .unwrap();

            assert_eq!(result.next_question.unwrap().id.as_str(), "e2");
            assert_eq!(result.emotion, Emotion::Anxiety);
            assert_eq!(result.state, DialogueState::Tier1);
        }

        #[tokio::test]
        async fn submit_after_end_maps_to_session_ended() {
            let registry = Arc::new(SessionRegistry::new());
            let id = registered(&registry).await;
            let handler = handler(Arc::clone(&registry));

            let mut last = None;
            for text in ["我好累", "好几天了，很累", "总是加班很累", "睡不好，很累", "好好睡一觉吧，累"] {
                last = Some(handler.handle(SubmitAnswerCommand::new(id, text)).await.unwrap());
            }
            assert!(last.unwrap().is_final());

            let result = handler.handle(SubmitAnswerCommand::new(id, "还在吗")).await;
            assert_eq!(result.unwrap_err(), SubmitAnswerError::SessionEnded(id));
        }

        #[tokio::test(start_paused = true)]
        async fn awaits_inference_delay_before_answering() {
            let registry = Arc::new(SessionRegistry::new());
            let id = registered(&registry).await;
            let delay = Arc::new(SimulatedInferenceDelay::new(
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(1000),
            ));
            let handler = SubmitAnswerHandler::new(registry, delay.clone());

            let started = tokio::time::Instant::now();
            handler
                .handle(SubmitAnswerCommand::new(id, "有些不安"))
                .await
                .unwrap();
            assert!(started.elapsed() >= Duration::from_millis(500));
            assert_eq!(delay.turn_count(), 1);
        }
    }

    mod concurrency {
        use super::*;

        #[tokio::test]
        async fn overlapping_submission_is_rejected_as_busy() {
            let registry = Arc::new(SessionRegistry::new());
            let id = registered(&registry).await;
            let gate = Arc::new(GateDelay::default());
            let handler = SubmitAnswerHandler::new(Arc::clone(&registry), gate.clone());

            let first = {
                let handler = handler.clone();
                tokio::spawn(async move {
                    handler
                        .handle(SubmitAnswerCommand::new(id, "有些不安"))
                        .await
                })
            };
            gate.entered.notified().await;

            let second = handler
                .handle(SubmitAnswerCommand::new(id, "还是很紧张"))
                .await;
            assert_eq!(second.unwrap_err(), SubmitAnswerError::SessionBusy(id));

            gate.release.notify_one();
            let first = first.await.unwrap().unwrap();
            assert_eq!(first.next_question.unwrap().id.as_str(), "e2");

            let engine = registry.get(&id).await.unwrap();
            assert_eq!(engine.lock().await.session().responses().len(), 1);
        }

        #[tokio::test]
        async fn different_sessions_do_not_block_each_other() {
            let registry = Arc::new(SessionRegistry::new());
            let a = registered(&registry).await;
            let b = registered(&registry).await;
            let gate = Arc::new(GateDelay::default());
            let gated = SubmitAnswerHandler::new(Arc::clone(&registry), gate.clone());

            let pending = tokio::spawn(async move {
                gated.handle(SubmitAnswerCommand::new(a, "有些不安")).await
            });
            gate.entered.notified().await;

            let other = handler(Arc::clone(&registry))
                .handle(SubmitAnswerCommand::new(b, "有些难过"))
                .await
                .unwrap();
            assert_eq!(other.emotion, Emotion::Sadness);

            gate.release.notify_one();
            assert!(pending.await.unwrap().is_ok());
        }
    }
}
