//! State machine trait for stage enums.
//!
//! Gives stage enums (onboarding today) one way to validate and perform
//! transitions.

use super::ValidationError;

/// Trait for enums that model a finite state machine.
///
/// Implementors list their edges; `transition_to` and `is_terminal` come for free.
///
/// ```ignore
/// let next = OnboardingStage::NoProfile.transition_to(OnboardingStage::AwaitingName)?;
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
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Kettle::Cold => vec![Kettle::Heating],
                Kettle::Heating => vec![Kettle::Boiled],
                Kettle::Boiled => vec![],
            }
        }
    }

    #[test]
    fn forward_edge_is_accepted() {
        assert_eq!(Kettle::Cold.transition_to(Kettle::Heating), Ok(Kettle::Heating));
    }

    #[test]
    fn skipping_a_stage_is_rejected_with_state_transition_field() {
        let err = Kettle::Cold.transition_to(Kettle::Boiled).unwrap_err();
        match err {
            ValidationError::InvalidFormat { field, reason } => {
                assert_eq!(field, "state_transition");
                assert!(reason.contains("Cold"));
                assert!(reason.contains("Boiled"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn only_the_last_stage_is_terminal() {
        assert!(!Kettle::Cold.is_terminal());
        assert!(!Kettle::Heating.is_terminal());
        assert!(Kettle::Boiled.is_terminal());
    }
}
