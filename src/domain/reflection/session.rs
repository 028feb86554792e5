//! Therapy session aggregate.
//!
//! One session is owned by one `DialogueEngine` for its whole lifetime. It is
//! created when the dialogue starts and dropped when the caller tears it down;
//! nothing here is persisted by the engine.
//!
//! # Invariants
//!
//! - `responses` is append-only and in turn order
//! - `current_tier` never decreases
//! - `final_guidance` is written at most once

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::emotion::Emotion;
use super::question::{QuestionResponse, Tier};
use super::question_bank::QuestionBank;
use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, SessionId, Timestamp};

/// Session record for one guided conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapySession {
    session_id: SessionId,
    start_time: Timestamp,
    responses: Vec<QuestionResponse>,
    /// Numeric tier level, 1-3 while the session is healthy.
    current_tier: u8,
    detected_emotion: Emotion,
    final_guidance: Option<String>,
}

impl TherapySession {
    /// Starts a new session at tier 1.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            start_time: Timestamp::now(),
            responses: Vec::new(),
            current_tier: Tier::Identification.level(),
            detected_emotion: Emotion::default(),
            final_guidance: None,
        }
    }

    /// Reconstitutes a session from a caller-held snapshot (no validation).
    pub fn reconstitute(
        session_id: SessionId,
        start_time: Timestamp,
        responses: Vec<QuestionResponse>,
        current_tier: u8,
        detected_emotion: Emotion,
        final_guidance: Option<String>,
    ) -> Self {
        Self {
            session_id,
            start_time,
            responses,
            current_tier,
            detected_emotion,
            final_guidance,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn start_time(&self) -> &Timestamp {
        &self.start_time
    }

    /// Returns all responses in turn order.
    pub fn responses(&self) -> &[QuestionResponse] {
        &self.responses
    }

    pub fn current_tier(&self) -> u8 {
        self.current_tier
    }

    /// Emotion detected in the most recent answer.
    pub fn detected_emotion(&self) -> Emotion {
        self.detected_emotion
    }

    pub fn final_guidance(&self) -> Option<&str> {
        self.final_guidance.as_deref()
    }

    /// Ids of every question answered so far.
    pub fn answered_ids(&self) -> HashSet<QuestionId> {
        self.responses.iter().map(|r| r.question_id.clone()).collect()
    }

    /// Counts responses whose question belongs to `tier`.
    ///
    /// Responses referencing ids unknown to `bank` are not counted.
    pub fn answers_in_tier(&self, bank: &QuestionBank, tier: Tier) -> usize {
        self.responses
            .iter()
            .filter_map(|r| bank.find(&r.question_id))
            .filter(|q| q.tier == tier)
            .count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations (driven by the engine)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn record_response(&mut self, response: QuestionResponse) {
        self.responses.push(response);
    }

    pub(crate) fn set_detected_emotion(&mut self, emotion: Emotion) {
        self.detected_emotion = emotion;
    }

    /// Moves to `tier`; a shallower tier is ignored.
    pub(crate) fn advance_to(&mut self, tier: Tier) {
        self.current_tier = self.current_tier.max(tier.level());
    }

    /// Stores the closing guidance.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` if guidance was already stored.
    pub(crate) fn set_final_guidance(&mut self, guidance: String) -> Result<(), DomainError> {
        if self.final_guidance.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Final guidance has already been recorded",
            )
            .with_detail("session_id", self.session_id.to_string()));
        }
        self.final_guidance = Some(guidance);
        Ok(())
    }
}
