//! Application layer - Orchestrates the decision workflow over the ports.
//!
//! - `DecisionWorkflow` - Step transitions with fail-soft collaborator calls
//! - `RecommendationUpdater` - Writes the top-ranked option back onto the decision
//! - `DescriptionBatch` - Bounded, order-preserving description generation

mod collaborator;
mod decision_workflow;
mod description_batch;
mod error;
mod recommendation_updater;

pub use collaborator::with_timeout;
pub use decision_workflow::{DecisionWorkflow, TransitionOutcome, WorkflowPorts};
pub use description_batch::DescriptionBatch;
pub use error::WorkflowError;
pub use recommendation_updater::{Recommendation, RecommendationUpdater};
