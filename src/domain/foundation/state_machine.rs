//! State machine trait for status enums.
//!
//! Gives every lifecycle enum the same validated-transition interface.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors define valid state transitions and get validated
/// transition methods for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for DialogueState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Tier1, Tier2) | (Tier2, Tier3) /* ... */)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Tier1 => vec![Tier1, Tier2, Tier3, Ended],
///             // ... etc
///         }
///     }
/// }
///
/// let next = current.transition_to(DialogueState::Tier3)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kettle {
        Cold,
        Heating,
        Boiled,
    }

    impl StateMachine for Kettle {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Kettle::*;
            matches!((self, target), (Cold, Heating) | (Heating, Boiled) | (Heating, Cold))
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Kettle::*;
            match self {
                Cold => vec![Heating],
                Heating => vec![Boiled, Cold],
                Boiled => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Kettle::Cold.transition_to(Kettle::Heating), Ok(Kettle::Heating));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Kettle::Cold.transition_to(Kettle::Boiled).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Cold to Boiled"));
    }

    #[test]
    fn state_without_outgoing_edges_is_terminal() {
        assert!(Kettle::Boiled.is_terminal());
        assert!(!Kettle::Heating.is_terminal());
    }
}
