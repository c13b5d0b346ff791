//! AI-powered DecisionAssistant implementation.
//!
//! Builds French prompts, sends them through an `AIProvider` and parses the
//! JSON answers. Models often wrap JSON in markdown fences or add fields we
//! don't need; parsing tolerates both. Anything that does not yield at least
//! one usable item is reported as `AIError::Parse`.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::decision::{CriterionSuggestion, DescriptionKind, OptionSuggestion};
use crate::domain::foundation::{UserId, Weight};
use crate::ports::{
    AIError, AIProvider, CompletionRequest, DecisionAssistant, MessageRole, RequestMetadata,
};

const SYSTEM_PROMPT: &str = "Tu es un assistant d'aide à la décision. \
Réponds uniquement avec le JSON demandé, sans texte autour.";

/// Suggestions and descriptions generated by an LLM.
pub struct LlmDecisionAssistant {
    ai_provider: Arc<dyn AIProvider>,
    user_id: Option<UserId>,
}

impl LlmDecisionAssistant {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            user_id: None,
        }
    }

    /// Tags outgoing requests with the user they are made for.
    pub fn for_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    fn metadata(&self, purpose: &str) -> RequestMetadata {
        let metadata = RequestMetadata::new(format!("{}-{}", purpose, uuid::Uuid::new_v4()));
        match &self.user_id {
            Some(user_id) => metadata.with_user(user_id.clone()),
            None => metadata,
        }
    }

    async fn ask(&self, purpose: &str, prompt: String, temperature: f32) -> Result<String, AIError> {
        let request = CompletionRequest::new(self.metadata(purpose))
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, prompt)
            .with_temperature(temperature)
            .with_max_tokens(800);

        let response = self.ai_provider.complete(request).await?;
        Ok(response.content)
    }

    fn criteria_prompt(title: &str, description: &str) -> String {
        format!(
            r#"Décision : {}
Contexte : {}

Propose entre 3 et 6 critères pour évaluer les options de cette décision.
Réponds avec un tableau JSON :
[
  {{ "name": "nom court du critère", "weight": 1-5 }}
]
Le poids exprime l'importance du critère (5 = essentiel)."#,
            title,
            non_empty_or(description, "aucun")
        )
    }

    fn options_prompt(title: &str, description: &str) -> String {
        format!(
            r#"Décision : {}
Contexte : {}

Propose entre 3 et 5 options réalistes pour cette décision.
Réponds avec un tableau JSON :
[
  {{ "title": "titre court", "description": "une ou deux phrases" }}
]"#,
            title,
            non_empty_or(description, "aucun")
        )
    }

    fn description_prompt(title: &str, context: &str, kind: DescriptionKind) -> String {
        let what = match kind {
            DescriptionKind::Option => "l'option",
            DescriptionKind::Criterion => "le critère",
        };
        format!(
            r#"Décision : {}

Décris {} « {} » en une ou deux phrases.
Réponds avec un objet JSON : {{ "description": "..." }}"#,
            context, what, title
        )
    }

    /// Parses a criteria list; weights are clamped into 1..=5.
    fn parse_criteria(response: &str) -> Result<Vec<CriterionSuggestion>, AIError> {
        let raw: Vec<RawCriterion> = parse_json(response)?;

        let criteria: Vec<_> = raw
            .into_iter()
            .filter_map(|c| {
                let name = c.name.trim();
                if name.is_empty() {
                    return None;
                }
                let weight = c
                    .weight
                    .and_then(|w| w.rounded())
                    .map(Weight::clamped)
                    .unwrap_or_default();
                Some(CriterionSuggestion::new(name, weight))
            })
            .collect();

        if criteria.is_empty() {
            return Err(AIError::parse("no usable criteria in response"));
        }
        Ok(criteria)
    }

    fn parse_options(response: &str) -> Result<Vec<OptionSuggestion>, AIError> {
        let raw: Vec<RawOption> = parse_json(response)?;

        let options: Vec<_> = raw
            .into_iter()
            .filter(|o| !o.title.trim().is_empty())
            .map(|o| OptionSuggestion::new(o.title.trim(), o.description.trim()))
            .collect();

        if options.is_empty() {
            return Err(AIError::parse("no usable options in response"));
        }
        Ok(options)
    }

    /// Accepts `{"description": ".."}` or, failing that, bare prose.
    fn parse_description(response: &str) -> Result<String, AIError> {
        let text = match parse_json::<RawDescription>(response) {
            Ok(raw) => raw.description,
            Err(_) => strip_code_fence(response).to_string(),
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(AIError::parse("empty description"));
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl DecisionAssistant for LlmDecisionAssistant {
    async fn suggest_criteria(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Vec<CriterionSuggestion>, AIError> {
        let response = self
            .ask("suggest-criteria", Self::criteria_prompt(title, description), 0.4)
            .await?;
        Self::parse_criteria(&response)
    }

    async fn suggest_options(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Vec<OptionSuggestion>, AIError> {
        let response = self
            .ask("suggest-options", Self::options_prompt(title, description), 0.7)
            .await?;
        Self::parse_options(&response)
    }

    async fn generate_description(
        &self,
        title: &str,
        context: &str,
        kind: DescriptionKind,
    ) -> Result<String, AIError> {
        let response = self
            .ask(
                "generate-description",
                Self::description_prompt(title, context, kind),
                0.5,
            )
            .await?;
        Self::parse_description(&response)
    }
}

#[derive(Debug, Deserialize)]
struct RawCriterion {
    name: String,
    #[serde(default)]
    weight: Option<RawWeight>,
}

/// Models send weights as integers, decimals or quoted numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawWeight {
    Number(f64),
    Text(String),
}

impl RawWeight {
    /// Nearest integer, or `None` when the value is not a number.
    fn rounded(&self) -> Option<i64> {
        let value = match self {
            RawWeight::Number(n) => *n,
            RawWeight::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then(|| value.round() as i64)
    }
}

#[derive(Debug, Deserialize)]
struct RawOption {
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawDescription {
    description: String,
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.trim().is_empty() {
        default
    } else {
        value
    }
}

/// Removes a surrounding ```json ... ``` fence, if any.
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn parse_json<T: for<'de> Deserialize<'de>>(response: &str) -> Result<T, AIError> {
    serde_json::from_str(strip_code_fence(response))
        .map_err(|e| AIError::parse(format!("Failed to parse AI response: {}", e)))
}
