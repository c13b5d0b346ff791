//! Analysis Module - Pure domain services for decision analysis.
//!
//! # Components
//!
//! - `WeightedScorer` - Weighted-average scoring and ranking of options
//! - `PlaceholderScorer` - Reproducible pseudo-scores for unevaluated pairs
//!
//! All functions are pure and stateless: domain objects in, computed
//! results out. No ports or adapters involved.

mod placeholder_scorer;
mod weighted_scorer;

pub use placeholder_scorer::{PlaceholderScorer, PLACEHOLDER_MAX, PLACEHOLDER_MIN};
pub use weighted_scorer::{ScoreDetail, ScoredOption, WeightedScorer};
