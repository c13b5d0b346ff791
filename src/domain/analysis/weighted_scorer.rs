//! Weighted Scorer - weighted-average scores and ranking of options.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::decision::{Criterion, DecisionOption, Evaluation};
use crate::domain::foundation::{CriterionId, OptionId};

/// Contribution of one criterion to an option's score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub criterion_id: CriterionId,
    pub criterion_name: String,
    /// Criterion weight, or 0 when the pair has no evaluation.
    pub weight: u8,
    /// Evaluation score, or 0 when the pair has no evaluation.
    pub score: f64,
    pub weighted_score: f64,
}

impl ScoreDetail {
    fn unevaluated(criterion: &Criterion) -> Self {
        Self {
            criterion_id: criterion.id,
            criterion_name: criterion.name.clone(),
            weight: 0,
            score: 0.0,
            weighted_score: 0.0,
        }
    }

    /// True if an evaluation existed for this criterion.
    pub fn is_evaluated(&self) -> bool {
        self.weight > 0
    }
}

/// An option with its computed weighted score. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOption {
    pub id: OptionId,
    pub title: String,
    pub description: String,
    /// Weighted average rounded to 2 decimals.
    pub score: f64,
    pub details: Vec<ScoreDetail>,
}

/// Weighted multi-criteria ranking functions.
pub struct WeightedScorer;

impl WeightedScorer {
    /// Scores every option and sorts them best first.
    ///
    /// # Algorithm
    /// For each option: score = Σ(score × weight) / Σ(weight) over the
    /// criteria that have an evaluation for this option, rounded to 2
    /// decimals (half away from zero).
    ///
    /// # Edge Cases
    /// - Empty options: Returns empty Vec
    /// - No criteria: Every option scores 0, input order kept
    /// - Missing evaluation: Criterion left out of numerator and denominator
    /// - Duplicate evaluations for a pair: Last one wins
    /// - Ties: Input order kept (stable sort)
    pub fn compute_ranking(
        options: &[DecisionOption],
        criteria: &[Criterion],
        evaluations: &[Evaluation],
    ) -> Vec<ScoredOption> {
        let lookup: HashMap<(OptionId, CriterionId), f64> = evaluations
            .iter()
            .map(|e| ((e.option_id, e.criterion_id), e.score))
            .collect();

        let mut ranked: Vec<ScoredOption> = options
            .iter()
            .map(|option| Self::score_option(option, criteria, &lookup))
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// The first entry of the ranking, if any.
    pub fn best_option(
        options: &[DecisionOption],
        criteria: &[Criterion],
        evaluations: &[Evaluation],
    ) -> Option<ScoredOption> {
        Self::compute_ranking(options, criteria, evaluations)
            .into_iter()
            .next()
    }

    /// Rounds to 2 decimals, ties away from zero.
    pub fn round_score(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    fn score_option(
        option: &DecisionOption,
        criteria: &[Criterion],
        lookup: &HashMap<(OptionId, CriterionId), f64>,
    ) -> ScoredOption {
        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut details = Vec::with_capacity(criteria.len());

        for criterion in criteria {
            match lookup.get(&(option.id, criterion.id)) {
                Some(&score) => {
                    let weight = criterion.weight.as_f64();
                    weighted_sum += score * weight;
                    weight_sum += weight;
                    details.push(ScoreDetail {
                        criterion_id: criterion.id,
                        criterion_name: criterion.name.clone(),
                        weight: criterion.weight.value(),
                        score,
                        weighted_score: score * weight,
                    });
                }
                None => details.push(ScoreDetail::unevaluated(criterion)),
            }
        }

        let score = if weight_sum > 0.0 {
            Self::round_score(weighted_sum / weight_sum)
        } else {
            0.0
        };

        ScoredOption {
            id: option.id,
            title: option.title.clone(),
            description: option.description.clone(),
            score,
            details,
        }
    }
}
