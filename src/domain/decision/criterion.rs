//! Weighted criteria and their editable drafts.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CriterionId, ValidationError, Weight};

/// A weighted factor used to judge options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: String,
    pub weight: Weight,
    #[serde(default)]
    pub is_ai_generated: bool,
}

impl Criterion {
    /// Creates a manually authored criterion.
    pub fn new(id: CriterionId, name: impl Into<String>, weight: Weight) -> Self {
        Self {
            id,
            name: name.into(),
            weight,
            is_ai_generated: false,
        }
    }

    /// Marks the criterion as coming from a suggestion source.
    pub fn ai_generated(mut self) -> Self {
        self.is_ai_generated = true;
        self
    }
}

/// User-editable form of a criterion.
///
/// Drafts carry raw input; `id` is `None` for rows added in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionDraft {
    pub id: Option<CriterionId>,
    pub name: String,
    pub weight: u8,
    #[serde(default)]
    pub is_ai_generated: bool,
}

impl CriterionDraft {
    /// A new, manually added criterion row.
    pub fn new(name: impl Into<String>, weight: u8) -> Self {
        Self {
            id: None,
            name: name.into(),
            weight,
            is_ai_generated: false,
        }
    }

    /// Checks the row and returns the trimmed name with a validated weight.
    pub fn validate(&self) -> Result<(String, Weight), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::empty_field("criterion.name"));
        }
        let weight = Weight::try_new(self.weight)?;
        Ok((name.to_string(), weight))
    }
}

impl From<&Criterion> for CriterionDraft {
    fn from(criterion: &Criterion) -> Self {
        Self {
            id: Some(criterion.id),
            name: criterion.name.clone(),
            weight: criterion.weight.value(),
            is_ai_generated: criterion.is_ai_generated,
        }
    }
}
