//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types that form the vocabulary of the decision domain.

mod auth;
mod errors;
mod ids;
mod state_machine;
mod timestamp;
mod weight;

pub use auth::SessionContext;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CriterionId, DecisionId, OptionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
pub use weight::Weight;
