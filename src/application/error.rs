//! Errors returned by workflow operations.
//!
//! Collaborator failures never show up here: they are absorbed and reported
//! as notices. Only input problems and failed reads propagate.

use thiserror::Error;

use crate::domain::foundation::{DecisionId, DomainError, ValidationError};
use crate::domain::workflow::WorkflowStep;

/// Error returned by a workflow operation. The state is left untouched.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("'{operation}' is not available in the {step} step")]
    InvalidStep {
        operation: &'static str,
        step: WorkflowStep,
    },

    #[error("Decision not found: {0}")]
    DecisionNotFound(DecisionId),

    #[error("No saved analysis for decision {0}")]
    AnalysisNotFound(DecisionId),

    #[error("Storage error: {0}")]
    Storage(#[from] DomainError),
}

impl WorkflowError {
    pub fn invalid_step(operation: &'static str, step: WorkflowStep) -> Self {
        WorkflowError::InvalidStep { operation, step }
    }

    /// True for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorkflowError::Validation(_) | WorkflowError::InvalidStep { .. }
        )
    }
}
