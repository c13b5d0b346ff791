//! Decision Compass - Weighted multi-criteria decision support.
//!
//! A decision is described, criteria and options are suggested (or fall
//! back to fixed defaults), every option is scored against every criterion
//! and the best-ranked option is stored as the decision's recommendation.
//!
//! - `domain` - Scoring, placeholder scores, decision entities, workflow state
//! - `ports` - Storage, AI and id generation interfaces
//! - `adapters` - In-memory, PostgreSQL and OpenAI implementations
//! - `application` - The workflow orchestrator and recommendation updater
//! - `config` - Environment-driven configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
