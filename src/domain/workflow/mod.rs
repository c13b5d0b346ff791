//! Workflow module - the decision wizard as a state machine.
//!
//! `WorkflowState` is a plain serializable value; all I/O around it lives
//! in `application::DecisionWorkflow`.

mod fallbacks;
mod notice;
mod state;
mod step;

pub use fallbacks::{fallback_description, FALLBACK_CRITERIA, FALLBACK_OPTIONS};
pub use notice::{Notice, NoticeKind, NoticeLevel};
pub use state::WorkflowState;
pub use step::WorkflowStep;
