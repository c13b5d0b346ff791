//! Decision assistant port - suggestions and descriptions from a remote model.
//!
//! Every method may fail. Callers are expected to substitute fixed fallback
//! data on error instead of aborting.

use async_trait::async_trait;

use crate::domain::decision::{CriterionSuggestion, DescriptionKind, OptionSuggestion};

use super::AIError;

/// Port for the AI suggestion and description collaborator.
#[async_trait]
pub trait DecisionAssistant: Send + Sync {
    /// Propose weighted criteria for a decision.
    async fn suggest_criteria(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Vec<CriterionSuggestion>, AIError>;

    /// Propose candidate options for a decision.
    async fn suggest_options(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Vec<OptionSuggestion>, AIError>;

    /// Write a short description of an option or criterion.
    ///
    /// `context` is the decision the item belongs to.
    async fn generate_description(
        &self,
        title: &str,
        context: &str,
        kind: DescriptionKind,
    ) -> Result<String, AIError>;
}
