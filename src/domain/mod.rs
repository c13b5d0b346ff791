//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `decision` - Decision aggregate, criteria, options, evaluations
//! - `analysis` - Pure scoring services (weighted ranking, placeholder scores)
//! - `workflow` - Wizard steps and serializable workflow state

pub mod analysis;
pub mod decision;
pub mod foundation;
pub mod workflow;
