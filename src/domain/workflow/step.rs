//! Workflow steps and their allowed transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Ordered steps of the decision wizard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    /// Describing the decision.
    #[default]
    Decision,
    /// Reviewing and weighting criteria.
    Criteria,
    /// Reviewing and editing candidate options.
    Options,
    /// Ranked results.
    Analysis,
}

impl WorkflowStep {
    /// All steps in wizard order.
    pub fn all() -> [WorkflowStep; 4] {
        [
            WorkflowStep::Decision,
            WorkflowStep::Criteria,
            WorkflowStep::Options,
            WorkflowStep::Analysis,
        ]
    }

    /// 1-based position for progress display.
    pub fn position(&self) -> usize {
        match self {
            WorkflowStep::Decision => 1,
            WorkflowStep::Criteria => 2,
            WorkflowStep::Options => 3,
            WorkflowStep::Analysis => 4,
        }
    }

    /// The last step of the wizard; results are shown here.
    pub fn is_final(&self) -> bool {
        *self == WorkflowStep::Analysis
    }
}

impl StateMachine for WorkflowStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WorkflowStep::*;
        matches!(
            (self, target),
            (Decision, Criteria)
                | (Criteria, Options)
                | (Options, Analysis)
                | (Options, Criteria)
                | (Analysis, Criteria)
                | (Analysis, Decision)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WorkflowStep::*;
        match self {
            Decision => vec![Criteria],
            Criteria => vec![Options],
            Options => vec![Analysis, Criteria],
            Analysis => vec![Criteria, Decision],
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStep::Decision => "decision",
            WorkflowStep::Criteria => "criteria",
            WorkflowStep::Options => "options",
            WorkflowStep::Analysis => "analysis",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_path_is_allowed() {
        let step = WorkflowStep::Decision
            .transition_to(WorkflowStep::Criteria)
            .and_then(|s| s.transition_to(WorkflowStep::Options))
            .and_then(|s| s.transition_to(WorkflowStep::Analysis));
        assert_eq!(step, Ok(WorkflowStep::Analysis));
    }

    #[test]
    fn skipping_steps_is_rejected() {
        assert!(WorkflowStep::Decision
            .transition_to(WorkflowStep::Analysis)
            .is_err());
        assert!(WorkflowStep::Criteria
            .transition_to(WorkflowStep::Analysis)
            .is_err());
    }

    #[test]
    fn back_to_criteria_from_options_and_analysis() {
        assert!(WorkflowStep::Options.can_transition_to(&WorkflowStep::Criteria));
        assert!(WorkflowStep::Analysis.can_transition_to(&WorkflowStep::Criteria));
        assert!(!WorkflowStep::Criteria.can_transition_to(&WorkflowStep::Criteria));
    }

    #[test]
    fn no_step_is_a_dead_end() {
        for step in WorkflowStep::all() {
            assert!(!step.is_terminal(), "{} should have an exit", step);
        }
        assert!(WorkflowStep::Analysis.is_final());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for step in WorkflowStep::all() {
            for target in WorkflowStep::all() {
                assert_eq!(
                    step.can_transition_to(&target),
                    step.valid_transitions().contains(&target),
                    "{} -> {}",
                    step,
                    target
                );
            }
        }
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&WorkflowStep::Analysis).unwrap(),
            "\"analysis\""
        );
        assert_eq!(WorkflowStep::Options.position(), 3);
    }
}
