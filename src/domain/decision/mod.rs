//! Decision module - the decision aggregate and its child entities.
//!
//! # Components
//!
//! - `Decision` - root aggregate (title, description, deadline, recommendation)
//! - `Criterion` / `CriterionDraft` - weighted factors and their form rows
//! - `DecisionOption` / `OptionDraft` - candidate choices and their form rows
//! - `Evaluation` / `EvaluationSet` - option × criterion scores, one per pair
//! - `AnalysisSnapshot` - persisted criteria/options/evaluations

mod aggregate;
mod criterion;
mod evaluation;
mod option;
mod snapshot;
mod suggestion;

pub use aggregate::Decision;
pub use criterion::{Criterion, CriterionDraft};
pub use evaluation::{
    Evaluation, EvaluationSet, EvaluationSource, MAX_MANUAL_SCORE, MIN_MANUAL_SCORE,
};
pub use option::{DecisionOption, OptionDraft};
pub use snapshot::AnalysisSnapshot;
pub use suggestion::{CriterionSuggestion, DescriptionKind, OptionSuggestion};
