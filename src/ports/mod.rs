//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `DecisionRepository` - Decision records and their recommendation
//! - `AnalysisRepository` - Criteria/options/evaluations snapshots
//!
//! ## AI Ports
//!
//! - `AIProvider` - Raw chat completions
//! - `DecisionAssistant` - Criteria/option suggestions and descriptions
//!
//! ## Other
//!
//! - `IdGenerator` - Client-side ids for options and criteria

mod ai_provider;
mod analysis_repository;
mod decision_assistant;
mod decision_repository;
mod id_generator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use analysis_repository::AnalysisRepository;
pub use decision_assistant::DecisionAssistant;
pub use decision_repository::DecisionRepository;
pub use id_generator::IdGenerator;
