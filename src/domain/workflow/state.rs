//! Serializable workflow state with reducer-style transitions.
//!
//! Every mutation keeps the evaluation set aligned with the current
//! Option × Criterion cross product. Methods that can fail validate before
//! touching anything.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{ScoredOption, WeightedScorer};
use crate::domain::decision::{
    AnalysisSnapshot, Criterion, Decision, DecisionOption, Evaluation, EvaluationSet,
};
use crate::domain::foundation::{DecisionId, OptionId, StateMachine, ValidationError};

use super::WorkflowStep;

/// `{step, decision, criteria, options, evaluations}` of one wizard run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    step: WorkflowStep,
    decision: Option<Decision>,
    criteria: Vec<Criterion>,
    options: Vec<DecisionOption>,
    evaluations: EvaluationSet,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an analysis-step state from a saved snapshot.
    pub fn restore(decision: Decision, snapshot: AnalysisSnapshot) -> Self {
        let mut state = Self {
            step: WorkflowStep::Analysis,
            decision: Some(decision),
            criteria: snapshot.criteria,
            options: snapshot.options,
            evaluations: EvaluationSet::from(snapshot.evaluations),
        };
        state.realign();
        state
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn decision(&self) -> Option<&Decision> {
        self.decision.as_ref()
    }

    pub fn decision_id(&self) -> Option<DecisionId> {
        self.decision.as_ref().and_then(Decision::id)
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn options(&self) -> &[DecisionOption] {
        &self.options
    }

    pub fn evaluations(&self) -> &EvaluationSet {
        &self.evaluations
    }

    /// Current ranking of the options, best first.
    pub fn ranking(&self) -> Vec<ScoredOption> {
        WeightedScorer::compute_ranking(&self.options, &self.criteria, self.evaluations.as_slice())
    }

    /// Criteria, options and evaluations for persistence.
    pub fn snapshot(&self) -> AnalysisSnapshot {
        AnalysisSnapshot::new(
            self.criteria.clone(),
            self.options.clone(),
            self.evaluations.as_slice().to_vec(),
        )
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Moves to `target` if the step graph allows it.
    pub fn advance_to(&mut self, target: WorkflowStep) -> Result<(), ValidationError> {
        self.step = self.step.transition_to(target)?;
        Ok(())
    }

    /// Installs (or replaces) the decision record.
    pub fn set_decision(&mut self, decision: Decision) {
        self.decision = Some(decision);
    }

    pub fn replace_criteria(&mut self, criteria: Vec<Criterion>) {
        self.criteria = criteria;
        self.realign();
    }

    pub fn replace_options(&mut self, options: Vec<DecisionOption>) {
        self.options = options;
        self.realign();
    }

    pub fn push_option(&mut self, option: DecisionOption) {
        self.options.push(option);
        self.realign();
    }

    /// Records a scored pair. Both ends must exist in the current state.
    pub fn record_evaluation(&mut self, evaluation: Evaluation) -> Result<(), ValidationError> {
        if !self.has_option(&evaluation.option_id) {
            return Err(ValidationError::invalid_format(
                "option_id",
                format!("unknown option {}", evaluation.option_id),
            ));
        }
        if !self.criteria.iter().any(|c| c.id == evaluation.criterion_id) {
            return Err(ValidationError::invalid_format(
                "criterion_id",
                format!("unknown criterion {}", evaluation.criterion_id),
            ));
        }
        self.evaluations.upsert(evaluation);
        Ok(())
    }

    /// Overwrites the decision's recommendation in memory.
    pub fn set_recommendation(&mut self, title: Option<String>) {
        if let Some(decision) = self.decision.as_mut() {
            decision.set_recommendation(title);
        }
    }

    /// Clears everything and returns to the first step.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn has_option(&self, id: &OptionId) -> bool {
        self.options.iter().any(|o| &o.id == id)
    }

    fn realign(&mut self) {
        self.evaluations.rebuild(&self.options, &self.criteria);
    }
}
