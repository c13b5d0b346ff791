//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat completion providers and the LLM-backed decision assistant
//! - `storage` - In-memory repositories
//! - `postgres` - PostgreSQL repositories
//! - `ids` - Id generators

pub mod ai;
pub mod ids;
pub mod postgres;
pub mod storage;

pub use ai::{
    DisabledAIProvider, LlmDecisionAssistant, MockAIProvider, OpenAIConfig, OpenAIProvider,
};
pub use ids::{SequentialIdGenerator, UuidIdGenerator};
pub use postgres::{PostgresAnalysisRepository, PostgresDecisionRepository};
pub use storage::{InMemoryAnalysisRepository, InMemoryDecisionRepository};
