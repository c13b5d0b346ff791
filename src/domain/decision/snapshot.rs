//! Saved analysis snapshot (criteria, options and evaluations of a decision).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{Criterion, DecisionOption, Evaluation};

/// Everything below the decision record needed to restore an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub criteria: Vec<Criterion>,
    pub options: Vec<DecisionOption>,
    pub evaluations: Vec<Evaluation>,
    pub saved_at: Timestamp,
}

impl AnalysisSnapshot {
    pub fn new(
        criteria: Vec<Criterion>,
        options: Vec<DecisionOption>,
        evaluations: Vec<Evaluation>,
    ) -> Self {
        Self {
            criteria,
            options,
            evaluations,
            saved_at: Timestamp::now(),
        }
    }

    /// True if the snapshot has nothing worth restoring.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty() && self.options.is_empty()
    }
}
