//! AI Adapters.
//!
//! Implementations of the AIProvider and DecisionAssistant ports.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `DisabledAIProvider` - Always unavailable, used when AI is switched off
//! - `OpenAIProvider` - OpenAI-compatible chat completions
//! - `LlmDecisionAssistant` - Prompts and response parsing on top of any provider

mod disabled_provider;
mod llm_assistant;
mod mock_provider;
mod openai_provider;

pub use disabled_provider::DisabledAIProvider;
pub use llm_assistant::LlmDecisionAssistant;
pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
