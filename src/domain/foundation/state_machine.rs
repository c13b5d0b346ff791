//! State machine trait for step and status enums.
//!
//! Gives every lifecycle enum the same way to check and perform transitions,
//! so callers never assign a new state without validating it first.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define the allowed edges; validated transitions and
/// terminal-state detection come for free.
///
/// # Example
///
/// ```ignore
/// let next = WorkflowStep::Criteria.transition_to(WorkflowStep::Options)?;
/// assert_eq!(next, WorkflowStep::Options);
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
