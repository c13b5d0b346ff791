//! Evaluations: how well one option satisfies one criterion.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::PlaceholderScorer;
use crate::domain::foundation::{CriterionId, OptionId, ValidationError};

use super::{Criterion, DecisionOption};

/// Lowest score a person can give manually.
pub const MIN_MANUAL_SCORE: u8 = 1;
/// Highest score a person can give manually.
pub const MAX_MANUAL_SCORE: u8 = 10;

/// Where an evaluation score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationSource {
    /// Derived from option title and criterion name by the placeholder scorer.
    #[default]
    Placeholder,
    /// Entered by the user.
    Manual,
}

/// Score of one option against one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub option_id: OptionId,
    pub criterion_id: CriterionId,
    pub score: f64,
    #[serde(default)]
    pub source: EvaluationSource,
}

impl Evaluation {
    /// Creates an evaluation with an explicit source.
    pub fn new(
        option_id: OptionId,
        criterion_id: CriterionId,
        score: f64,
        source: EvaluationSource,
    ) -> Self {
        Self {
            option_id,
            criterion_id,
            score,
            source,
        }
    }

    /// Placeholder evaluation for a pair, derived from their texts.
    pub fn placeholder(option: &DecisionOption, criterion: &Criterion) -> Self {
        Self::new(
            option.id,
            criterion.id,
            PlaceholderScorer::score(&option.title, &criterion.name) as f64,
            EvaluationSource::Placeholder,
        )
    }

    /// Manual evaluation; the score must be an integer in 1..=10.
    pub fn manual(
        option_id: OptionId,
        criterion_id: CriterionId,
        score: u8,
    ) -> Result<Self, ValidationError> {
        if !(MIN_MANUAL_SCORE..=MAX_MANUAL_SCORE).contains(&score) {
            return Err(ValidationError::out_of_range(
                "score",
                MIN_MANUAL_SCORE as i32,
                MAX_MANUAL_SCORE as i32,
                score as i32,
            ));
        }
        Ok(Self::new(
            option_id,
            criterion_id,
            score as f64,
            EvaluationSource::Manual,
        ))
    }

    fn key(&self) -> (OptionId, CriterionId) {
        (self.option_id, self.criterion_id)
    }
}

/// Evaluations with at most one entry per (option, criterion) pair.
///
/// Inserting a second evaluation for a pair replaces the first in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Evaluation>", into = "Vec<Evaluation>")]
pub struct EvaluationSet {
    entries: Vec<Evaluation>,
}

impl EvaluationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the evaluation for its pair.
    pub fn upsert(&mut self, evaluation: Evaluation) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.key() == evaluation.key())
        {
            Some(existing) => *existing = evaluation,
            None => self.entries.push(evaluation),
        }
    }

    /// Looks up the evaluation for a pair.
    pub fn get(&self, option_id: &OptionId, criterion_id: &CriterionId) -> Option<&Evaluation> {
        self.entries
            .iter()
            .find(|e| &e.option_id == option_id && &e.criterion_id == criterion_id)
    }

    pub fn as_slice(&self) -> &[Evaluation] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Evaluation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuilds the set for exactly the Option × Criterion cross product.
    ///
    /// Manual scores survive for pairs that still exist.
    /// Placeholder scores are recomputed (titles may have changed), missing
    /// pairs are filled and pairs referring to removed rows are dropped.
    pub fn rebuild(&mut self, options: &[DecisionOption], criteria: &[Criterion]) {
        let mut rebuilt = Vec::with_capacity(options.len() * criteria.len());

        for option in options {
            for criterion in criteria {
                let kept = self
                    .get(&option.id, &criterion.id)
                    .filter(|e| e.source != EvaluationSource::Placeholder)
                    .cloned();
                rebuilt.push(kept.unwrap_or_else(|| Evaluation::placeholder(option, criterion)));
            }
        }

        self.entries = rebuilt;
    }
}

impl From<Vec<Evaluation>> for EvaluationSet {
    fn from(evaluations: Vec<Evaluation>) -> Self {
        let mut set = Self::new();
        for evaluation in evaluations {
            set.upsert(evaluation);
        }
        set
    }
}

impl From<EvaluationSet> for Vec<Evaluation> {
    fn from(set: EvaluationSet) -> Self {
        set.entries
    }
}
