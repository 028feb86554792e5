//! Dialogue policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::reflection::{DialoguePolicy, IdentificationPolicy};

/// Tier thresholds used by every new dialogue.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DialogueConfig {
    /// When tier 1 hands over to exploration
    #[serde(default)]
    pub identification_policy: IdentificationPolicy,

    /// Exploration answers before moving to coping
    #[serde(default = "default_exploration_limit")]
    pub exploration_limit: usize,

    /// Answers longer than this many characters skip ahead to coping
    #[serde(default = "default_long_answer_chars")]
    pub long_answer_chars: usize,
}

impl DialogueConfig {
    /// Builds the engine policy.
    pub fn policy(&self) -> DialoguePolicy {
        DialoguePolicy {
            identification: self.identification_policy,
            exploration_limit: self.exploration_limit,
            long_answer_chars: self.long_answer_chars,
        }
    }

    /// Validate dialogue configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.exploration_limit == 0 {
            return Err(ValidationError::ZeroExplorationLimit);
        }
        if self.long_answer_chars == 0 {
            return Err(ValidationError::ZeroLongAnswerChars);
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            identification_policy: IdentificationPolicy::default(),
            exploration_limit: default_exploration_limit(),
            long_answer_chars: default_long_answer_chars(),
        }
    }
}

fn default_exploration_limit() -> usize {
    2
}

fn default_long_answer_chars() -> usize {
    50
}
