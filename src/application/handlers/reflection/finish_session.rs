//! FinishSession command handler.
//!
//! Produces the closing guidance once a session has run out of questions.
//! Repeated calls return the stored guidance without waiting again.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::registry::SessionRegistry;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::reflection::{Emotion, TherapySession};
use crate::ports::InferenceDelay;

/// Command to close a session.
#[derive(Debug, Clone)]
pub struct FinishSessionCommand {
    pub session_id: SessionId,
}

/// Errors that can occur when finishing a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinishSessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Session {0} is busy with another answer")]
    SessionBusy(SessionId),

    /// A question is still awaiting an answer.
    #[error("Session {0} has not ended yet")]
    SessionNotEnded(SessionId),

    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for FinishSessionError {
    fn from(err: DomainError) -> Self {
        FinishSessionError::Domain(err.to_string())
    }
}

/// Result of closing a session.
#[derive(Debug, Clone)]
pub struct FinishSessionResult {
    pub guidance: String,
    /// Emotion the guidance was chosen for.
    pub emotion: Emotion,
    /// Snapshot of the completed session, for the caller to keep if it wants.
    pub session: TherapySession,
}

/// Handler for FinishSession commands.
#[derive(Clone)]
pub struct FinishSessionHandler {
    registry: Arc<SessionRegistry>,
    delay: Arc<dyn InferenceDelay>,
}

impl FinishSessionHandler {
    pub fn new(registry: Arc<SessionRegistry>, delay: Arc<dyn InferenceDelay>) -> Self {
        Self { registry, delay }
    }

    pub async fn handle(
        &self,
        cmd: FinishSessionCommand,
    ) -> Result<FinishSessionResult, FinishSessionError> {
        let shared = self
            .registry
            .get(&cmd.session_id)
            .await
            .ok_or(FinishSessionError::SessionNotFound(cmd.session_id))?;

        let mut engine = shared
            .try_lock()
            .map_err(|_| FinishSessionError::SessionBusy(cmd.session_id))?;

        if !engine.is_ended() {
            return Err(FinishSessionError::SessionNotEnded(cmd.session_id));
        }
        if engine.session().final_guidance().is_none() {
            self.delay.before_guidance().await;
        }

        let guidance = engine.finish().map_err(|err| match err.code {
            ErrorCode::SessionNotEnded => FinishSessionError::SessionNotEnded(cmd.session_id),
            _ => FinishSessionError::from(err),
        })?;

        Ok(FinishSessionResult {
            guidance,
            emotion: engine.session().detected_emotion(),
            session: engine.session().clone(),
        })
    }
}

impl fmt::Debug for FinishSessionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinishSessionHandler").finish_non_exhaustive()
    }
}
