//! Decision aggregate root.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DecisionId, Timestamp, UserId, ValidationError};

/// The top-level user goal being analyzed.
///
/// Criteria and options hang off a decision during the workflow. The id is
/// only known once the decision store has accepted the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    id: Option<DecisionId>,
    user_id: UserId,
    title: String,
    description: String,
    deadline: Option<NaiveDate>,
    ai_recommendation: Option<String>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Decision {
    /// Creates a new, not yet persisted decision.
    ///
    /// # Errors
    ///
    /// `EmptyField` if the title is blank.
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        let title = validate_title(title.into())?;
        let now = Timestamp::now();

        Ok(Self {
            id: None,
            user_id,
            title,
            description: description.into().trim().to_string(),
            deadline,
            ai_recommendation: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitutes a decision from persisted data.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DecisionId,
        user_id: UserId,
        title: String,
        description: String,
        deadline: Option<NaiveDate>,
        ai_recommendation: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id: Some(id),
            user_id,
            title,
            description,
            deadline,
            ai_recommendation,
            created_at,
            updated_at,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> Option<DecisionId> {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Title of the top-ranked option, as last computed.
    pub fn ai_recommendation(&self) -> Option<&str> {
        self.ai_recommendation.as_deref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Title and description joined, used as context for generated text.
    pub fn context(&self) -> String {
        if self.description.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.description)
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Replaces the editable fields. Nothing changes if the title is blank.
    pub fn edit(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: Option<NaiveDate>,
    ) -> Result<(), ValidationError> {
        let title = validate_title(title.into())?;
        self.title = title;
        self.description = description.into().trim().to_string();
        self.deadline = deadline;
        self.touch();
        Ok(())
    }

    /// Records the id handed out by the decision store.
    pub fn assign_id(&mut self, id: DecisionId) {
        self.id = Some(id);
    }

    /// Overwrites the recommendation (last writer wins).
    pub fn set_recommendation(&mut self, title: Option<String>) {
        self.ai_recommendation = title;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(trimmed.to_string())
}
