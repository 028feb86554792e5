//! Dialogue state machine.
//!
//! Tracks which tier the conversation is in. A single turn may pass through
//! several tiers (an identification answer that completes tier 1 and is long
//! enough to skip exploration, for instance), so transitions are validated on
//! the state a turn starts in and the state it settles in.

use serde::{Deserialize, Serialize};

use super::question::Tier;
use crate::domain::foundation::StateMachine;

/// The tier a dialogue is currently in.
///
/// - `Tier1`: identifying the emotion
/// - `Tier2`: exploring the cause
/// - `Tier3`: offering coping strategies
/// - `Ended`: no further questions; guidance may be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    #[default]
    Tier1,
    Tier2,
    Tier3,
    Ended,
}

impl DialogueState {
    /// State for a numeric tier level. Levels outside 1-3 are treated as ended.
    pub fn from_tier_level(level: u8) -> Self {
        match Tier::from_level(level) {
            Ok(tier) => Self::from(tier),
            Err(_) => DialogueState::Ended,
        }
    }

    /// Returns the tier for active states.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            DialogueState::Tier1 => Some(Tier::Identification),
            DialogueState::Tier2 => Some(Tier::Exploration),
            DialogueState::Tier3 => Some(Tier::Coping),
            DialogueState::Ended => None,
        }
    }

    /// Returns true while questions are still being asked.
    pub fn is_active(&self) -> bool {
        !matches!(self, DialogueState::Ended)
    }
}

impl From<Tier> for DialogueState {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Identification => DialogueState::Tier1,
            Tier::Exploration => DialogueState::Tier2,
            Tier::Coping => DialogueState::Tier3,
        }
    }
}

impl StateMachine for DialogueState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use DialogueState::*;
        matches!(
            (self, target),
            // Same-tier repeat
            (Tier1, Tier1) | (Tier2, Tier2) | (Tier3, Tier3) |
            // Deepening, possibly several tiers in one turn
            (Tier1, Tier2) | (Tier1, Tier3) | (Tier2, Tier3) |
            // Question supply exhausted
            (Tier1, Ended) | (Tier2, Ended) | (Tier3, Ended)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use DialogueState::*;
        match self {
            Tier1 => vec![Tier1, Tier2, Tier3, Ended],
            Tier2 => vec![Tier2, Tier3, Ended],
            Tier3 => vec![Tier3, Ended],
            Ended => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [DialogueState; 4] = [
        DialogueState::Tier1,
        DialogueState::Tier2,
        DialogueState::Tier3,
        DialogueState::Ended,
    ];

    #[test]
    fn default_state_is_tier1() {
        assert_eq!(DialogueState::default(), DialogueState::Tier1);
    }

    #[test]
    fn tier_levels_map_to_states() {
        assert_eq!(DialogueState::from_tier_level(1), DialogueState::Tier1);
        assert_eq!(DialogueState::from_tier_level(2), DialogueState::Tier2);
        assert_eq!(DialogueState::from_tier_level(3), DialogueState::Tier3);
    }

    #[test]
    fn out_of_range_levels_are_ended() {
        assert_eq!(DialogueState::from_tier_level(0), DialogueState::Ended);
        assert_eq!(DialogueState::from_tier_level(4), DialogueState::Ended);
        assert_eq!(DialogueState::from_tier_level(u8::MAX), DialogueState::Ended);
    }

    #[test]
    fn never_moves_to_a_shallower_tier() {
        for from in ALL {
            for to in ALL {
                if let (Some(a), Some(b)) = (from.tier(), to.tier()) {
                    if b < a {
                        assert!(!from.can_transition_to(&to), "{from:?} -> {to:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn ended_is_terminal() {
        assert!(DialogueState::Ended.is_terminal());
        assert!(!DialogueState::Ended.is_active());
        assert!(DialogueState::Ended.tier().is_none());
    }

    #[test]
    fn active_states_may_repeat() {
        for state in [DialogueState::Tier1, DialogueState::Tier2, DialogueState::Tier3] {
            assert_eq!(state.transition_to(state), Ok(state));
        }
    }

    #[test]
    fn ended_rejects_any_transition() {
        for target in ALL {
            assert!(DialogueState::Ended.transition_to(target).is_err());
        }
    }

    #[test]
    fn valid_transitions_matches_can_transition_to() {
        for state in ALL {
            for target in ALL {
                assert_eq!(
                    state.valid_transitions().contains(&target),
                    state.can_transition_to(&target),
                    "{state:?} -> {target:?}"
                );
            }
        }
    }

    #[test]
    fn serializes_to_snake_case() {
        assert_eq!(serde_json::to_string(&DialogueState::Tier2).unwrap(), "\"tier2\"");
    }
}
