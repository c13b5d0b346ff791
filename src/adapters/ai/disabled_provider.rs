//! Provider used when AI features are switched off.
//!
//! Every completion fails with `AIError::Unavailable` without any network
//! traffic, so the workflow substitutes its default suggestions.

use async_trait::async_trait;
use tracing::debug;

use crate::ports::{AIError, AIProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// An `AIProvider` that never answers.
#[derive(Debug, Clone)]
pub struct DisabledAIProvider {
    reason: String,
}

impl DisabledAIProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for DisabledAIProvider {
    fn default() -> Self {
        Self::new("AI features are disabled")
    }
}

#[async_trait]
impl AIProvider for DisabledAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        debug!(
            trace_id = %request.metadata.trace_id,
            reason = %self.reason,
            "Completion skipped"
        );
        Err(AIError::unavailable(self.reason.clone()))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("disabled", "none", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MessageRole, RequestMetadata};

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("trace-1"))
            .with_message(MessageRole::User, "Bonjour")
    }

    #[tokio::test]
    async fn every_completion_is_unavailable() {
        let provider = DisabledAIProvider::new("no API key");

        for _ in 0..2 {
            let err = provider.complete(request()).await.unwrap_err();
            assert_eq!(err, AIError::unavailable("no API key"));
        }
    }

    #[test]
    fn provider_info_names_itself() {
        let info = DisabledAIProvider::default().provider_info();
        assert_eq!(info.name, "disabled");
        assert_eq!(info.max_context_tokens, 0);
    }
}
