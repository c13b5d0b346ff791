//! Candidate options and their editable drafts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{OptionId, ValidationError};

/// A candidate choice under consideration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: OptionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_ai_generated: bool,
}

impl DecisionOption {
    /// Creates a manually authored option.
    pub fn new(id: OptionId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_ai_generated: false,
        }
    }

    /// Marks the option as coming from a suggestion source.
    pub fn ai_generated(mut self) -> Self {
        self.is_ai_generated = true;
        self
    }

    /// True when no description has been written or generated yet.
    pub fn lacks_description(&self) -> bool {
        self.description.trim().is_empty()
    }
}

/// User-editable form of an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDraft {
    pub id: Option<OptionId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_ai_generated: bool,
}

impl OptionDraft {
    /// A new, manually added option row.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            is_ai_generated: false,
        }
    }

    /// Returns the trimmed title, rejecting blank ones.
    pub fn validated_title(&self) -> Result<String, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::empty_field("option.title"));
        }
        Ok(title.to_string())
    }
}

impl From<&DecisionOption> for OptionDraft {
    fn from(option: &DecisionOption) -> Self {
        Self {
            id: Some(option.id),
            title: option.title.clone(),
            description: option.description.clone(),
            is_ai_generated: option.is_ai_generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn lacks_description_ignores_whitespace() {
        let id = OptionId::from_uuid(Uuid::from_u128(1));
        assert!(DecisionOption::new(id, "Tesla", "  ").lacks_description());
        assert!(!DecisionOption::new(id, "Tesla", "Electric").lacks_description());
    }

    #[test]
    fn draft_round_trip_keeps_id() {
        let option = DecisionOption::new(OptionId::from_uuid(Uuid::from_u128(9)), "Honda", "")
            .ai_generated();
        let draft = OptionDraft::from(&option);

        assert_eq!(draft.id, Some(option.id));
        assert!(draft.is_ai_generated);
    }

    #[test]
    fn validated_title_rejects_blank() {
        let err = OptionDraft::new("", "desc").validated_title().unwrap_err();
        assert_eq!(err, ValidationError::empty_field("option.title"));
        assert_eq!(OptionDraft::new(" Vélo ", "").validated_title().unwrap(), "Vélo");
    }
}
