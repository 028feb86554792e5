//! Question catalog entries and the per-turn response record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::foundation::{QuestionId, Timestamp, ValidationError};

/// Depth of the guided conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Identify the current emotion.
    Identification,
    /// Explore what caused it.
    Exploration,
    /// Offer a coping strategy.
    Coping,
}

impl Tier {
    /// Returns the numeric level (1-3).
    pub fn level(&self) -> u8 {
        match self {
            Tier::Identification => 1,
            Tier::Exploration => 2,
            Tier::Coping => 3,
        }
    }

    /// Parses a numeric level.
    pub fn from_level(level: u8) -> Result<Self, ValidationError> {
        match level {
            1 => Ok(Tier::Identification),
            2 => Ok(Tier::Exploration),
            3 => Ok(Tier::Coping),
            other => Err(ValidationError::out_of_range("tier", 1, 3, i32::from(other))),
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = ValidationError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Tier::from_level(level)
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.level()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.level())
    }
}

/// A single catalog question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Free-form grouping label, e.g. "情绪识别".
    pub category: String,
    pub tier: Tier,
    pub text: String,
    /// Answer choices for closed-form questions.
    pub options: Option<Vec<String>>,
    pub is_open_ended: bool,
    pub tags: BTreeSet<String>,
}

impl Question {
    /// Creates a free-text question.
    pub fn open(
        id: QuestionId,
        category: impl Into<String>,
        tier: Tier,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            tier,
            text: text.into(),
            options: None,
            is_open_ended: true,
            tags: BTreeSet::new(),
        }
    }

    /// Creates a closed-form question with ordered answer choices.
    pub fn closed<I, S>(
        id: QuestionId,
        category: impl Into<String>,
        tier: Tier,
        text: impl Into<String>,
        options: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            category: category.into(),
            tier,
            text: text.into(),
            options: Some(options.into_iter().map(Into::into).collect()),
            is_open_ended: false,
            tags: BTreeSet::new(),
        }
    }

    /// Adds tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Returns the answer choices, empty for free-text questions.
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// One user answer, recorded once per accepted turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    /// The question this answers (a catalog reference).
    pub question_id: QuestionId,
    pub answer_text: String,
    pub timestamp: Timestamp,
}

impl QuestionResponse {
    /// Records an answer at the current time.
    pub fn new(question_id: QuestionId, answer_text: impl Into<String>) -> Self {
        Self {
            question_id,
            answer_text: answer_text.into(),
            timestamp: Timestamp::now(),
        }
    }
}
