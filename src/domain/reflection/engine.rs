//! Dialogue engine.
//!
//! Drives one session: classifies each answer, records it, and decides the
//! next question from the current [`DialogueState`]. A turn may fall through
//! several tiers before settling, e.g. a long exploration answer goes straight
//! to coping, and an exhausted coping list ends the session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::companion::{CompanionMessage, ResponseComposer};
use super::emotion::{Emotion, EmotionClassifier};
use super::guidance::GuidanceGenerator;
use super::question::{Question, QuestionResponse, Tier};
use super::question_bank::QuestionBank;
use super::session::TherapySession;
use super::state::DialogueState;
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, SessionId, StateMachine};
use crate::ports::RandomSource;

/// When tier 1 hands over to tier 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentificationPolicy {
    /// Move to exploration in the same turn once every identification
    /// question has an answer.
    #[default]
    AdvanceAfterAll,
    /// Ask the second identification question on every tier-1 turn. The
    /// dialogue only leaves tier 1 if a caller resumes it at a deeper tier.
    RepeatSecond,
}

/// Tunable thresholds of the tier policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialoguePolicy {
    pub identification: IdentificationPolicy,
    /// Exploration answers after which the dialogue moves to coping.
    pub exploration_limit: usize,
    /// Answers longer than this (in characters) skip the rest of exploration.
    pub long_answer_chars: usize,
}

impl Default for DialoguePolicy {
    fn default() -> Self {
        Self {
            identification: IdentificationPolicy::default(),
            exploration_limit: 2,
            long_answer_chars: 50,
        }
    }
}

/// Result of one accepted turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Question to ask next; `None` once the session has ended.
    pub next_question: Option<Question>,
    pub message: CompanionMessage,
    /// Emotion detected in the submitted answer.
    pub emotion: Emotion,
    /// State the dialogue settled in.
    pub state: DialogueState,
}

impl TurnOutcome {
    /// Returns true when this turn ended the session.
    pub fn is_final(&self) -> bool {
        self.next_question.is_none()
    }
}

struct Step {
    state: DialogueState,
    question: Option<Question>,
    message: CompanionMessage,
}

/// Owns one [`TherapySession`] and the state machine around it.
pub struct DialogueEngine {
    bank: Arc<QuestionBank>,
    classifier: EmotionClassifier,
    composer: ResponseComposer,
    guidance: GuidanceGenerator,
    random: Box<dyn RandomSource>,
    policy: DialoguePolicy,
    session: TherapySession,
    state: DialogueState,
    pending: Option<QuestionId>,
}

impl DialogueEngine {
    /// Opens a new session and returns the entry question, which is pending
    /// from this point on.
    pub fn start(bank: Arc<QuestionBank>, random: Box<dyn RandomSource>) -> (Self, Question) {
        let opening = bank.opening_question().clone();
        let session = TherapySession::new(SessionId::new());
        info!(session_id = %session.session_id(), "reflection session started");

        let engine = Self {
            bank,
            classifier: EmotionClassifier::default(),
            composer: ResponseComposer::new(),
            guidance: GuidanceGenerator::new(),
            random,
            policy: DialoguePolicy::default(),
            session,
            state: DialogueState::Tier1,
            pending: Some(opening.id.clone()),
        };
        (engine, opening)
    }

    /// Rebuilds an engine around a caller-held session.
    ///
    /// The state follows `session.current_tier()`; a level outside 1-3 is
    /// treated as ended, so the next answer only receives a farewell. With no
    /// pending question, or with guidance already recorded, the dialogue is
    /// ended.
    ///
    /// # Errors
    ///
    /// `QuestionNotFound` if `pending` does not resolve in `bank`.
    pub fn resume(
        bank: Arc<QuestionBank>,
        random: Box<dyn RandomSource>,
        session: TherapySession,
        pending: Option<QuestionId>,
    ) -> Result<Self, DomainError> {
        if let Some(id) = &pending {
            if bank.find(id).is_none() {
                return Err(DomainError::new(ErrorCode::QuestionNotFound, "Pending question is not in the bank")
                    .with_detail("question_id", id.to_string()));
            }
        }

        let pending = if session.final_guidance().is_some() { None } else { pending };
        let state = if pending.is_none() {
            DialogueState::Ended
        } else {
            DialogueState::from_tier_level(session.current_tier())
        };
        debug!(session_id = %session.session_id(), ?state, "reflection session resumed");

        Ok(Self {
            bank,
            classifier: EmotionClassifier::default(),
            composer: ResponseComposer::new(),
            guidance: GuidanceGenerator::new(),
            random,
            policy: DialoguePolicy::default(),
            session,
            state,
            pending,
        })
    }

    /// Replaces the tier policy.
    pub fn with_policy(mut self, policy: DialoguePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the emotion classifier.
    pub fn with_classifier(mut self, classifier: EmotionClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session(&self) -> &TherapySession {
        &self.session
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn policy(&self) -> &DialoguePolicy {
        &self.policy
    }

    pub fn bank(&self) -> &Arc<QuestionBank> {
        &self.bank
    }

    /// Question currently awaiting an answer.
    pub fn pending_question(&self) -> Option<&Question> {
        self.pending.as_ref().and_then(|id| self.bank.find(id))
    }

    /// Returns true once no question is pending.
    pub fn is_ended(&self) -> bool {
        self.pending.is_none()
    }

    /// Releases the session record.
    pub fn into_session(self) -> TherapySession {
        self.session
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Turns
    // ─────────────────────────────────────────────────────────────────────────

    /// Answers the pending question with `utterance`.
    ///
    /// Blank input is not rejected here; front ends filter it.
    ///
    /// # Errors
    ///
    /// `SessionEnded` if no question is pending.
    pub fn submit(&mut self, utterance: &str) -> Result<TurnOutcome, DomainError> {
        let Some(answered) = self.pending.clone() else {
            warn!(session_id = %self.session.session_id(), "answer submitted after session ended");
            return Err(DomainError::new(
                ErrorCode::SessionEnded,
                "Session has ended; no question is awaiting an answer",
            )
            .with_detail("session_id", self.session.session_id().to_string()));
        };

        let emotion = self.classifier.classify(utterance);
        self.session.set_detected_emotion(emotion);
        self.session.record_response(QuestionResponse::new(answered.clone(), utterance));
        debug!(
            session_id = %self.session.session_id(),
            question_id = %answered,
            %emotion,
            state = ?self.state,
            "answer recorded"
        );

        let step = self.dispatch(emotion, utterance.chars().count());

        if self.state.is_active() {
            self.state.transition_to(step.state).map_err(|e| {
                DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
            })?;
        }
        self.state = step.state;
        if let Some(tier) = step.state.tier() {
            self.session.advance_to(tier);
        }
        self.pending = step.question.as_ref().map(|q| q.id.clone());

        if self.pending.is_none() {
            info!(
                session_id = %self.session.session_id(),
                turns = self.session.responses().len(),
                %emotion,
                "reflection session reached closing"
            );
        }

        Ok(TurnOutcome {
            next_question: step.question,
            message: step.message,
            emotion,
            state: self.state,
        })
    }

    /// Produces the closing guidance for an ended session.
    ///
    /// Guidance is generated once; later calls return the stored text.
    ///
    /// # Errors
    ///
    /// `SessionNotEnded` while a question is still pending.
    pub fn finish(&mut self) -> Result<String, DomainError> {
        if let Some(existing) = self.session.final_guidance() {
            return Ok(existing.to_string());
        }
        if self.pending.is_some() {
            return Err(DomainError::new(
                ErrorCode::SessionNotEnded,
                "Session still has a question awaiting an answer",
            )
            .with_detail("session_id", self.session.session_id().to_string()));
        }

        let guidance = self
            .guidance
            .generate(self.session.detected_emotion(), self.session.responses());
        self.session.set_final_guidance(guidance.clone())?;
        info!(session_id = %self.session.session_id(), "final guidance issued");
        Ok(guidance)
    }

    fn dispatch(&mut self, emotion: Emotion, utterance_chars: usize) -> Step {
        match self.state {
            DialogueState::Tier1 => self.identify(emotion, utterance_chars),
            DialogueState::Tier2 => self.explore(emotion, utterance_chars),
            DialogueState::Tier3 => self.cope(emotion),
            DialogueState::Ended => self.close(),
        }
    }

    fn identify(&mut self, emotion: Emotion, utterance_chars: usize) -> Step {
        if self.policy.identification == IdentificationPolicy::AdvanceAfterAll {
            let identified = self.session.answers_in_tier(&self.bank, Tier::Identification);
            if identified >= self.bank.identification().len() {
                debug!(identified, "identification complete");
                return self.explore(emotion, utterance_chars);
            }
        }

        Step {
            state: DialogueState::Tier1,
            question: Some(self.bank.second_identification().clone()),
            message: self
                .composer
                .pick(Tier::Identification, emotion, self.random.as_mut()),
        }
    }

    fn explore(&mut self, emotion: Emotion, utterance_chars: usize) -> Step {
        let explored = self.session.answers_in_tier(&self.bank, Tier::Exploration);
        if explored >= self.policy.exploration_limit || utterance_chars > self.policy.long_answer_chars {
            debug!(explored, utterance_chars, "moving on to coping");
            return self.cope(emotion);
        }

        let answered = self.session.answered_ids();
        let question = self
            .bank
            .next_tier2(emotion, &answered, self.random.as_mut())
            .clone();
        Step {
            state: DialogueState::Tier2,
            question: Some(question),
            message: self.composer.pick(Tier::Exploration, emotion, self.random.as_mut()),
        }
    }

    fn cope(&mut self, emotion: Emotion) -> Step {
        let answered = self.session.answered_ids();
        match self.bank.next_tier3(emotion, &answered).cloned() {
            Some(question) => Step {
                state: DialogueState::Tier3,
                question: Some(question),
                message: self.composer.pick(Tier::Coping, emotion, self.random.as_mut()),
            },
            None => self.close(),
        }
    }

    fn close(&mut self) -> Step {
        Step {
            state: DialogueState::Ended,
            question: None,
            message: self.composer.closing(self.random.as_mut()),
        }
    }
}

impl fmt::Debug for DialogueEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogueEngine")
            .field("session_id", self.session.session_id())
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
