//! Suggestions proposed by an assistant, before they become entities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Weight;

/// A proposed criterion (name and importance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSuggestion {
    pub name: String,
    pub weight: Weight,
}

impl CriterionSuggestion {
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// A proposed option (title and description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSuggestion {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl OptionSuggestion {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What a generated description is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionKind {
    Option,
    Criterion,
}

impl DescriptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptionKind::Option => "option",
            DescriptionKind::Criterion => "criterion",
        }
    }
}
