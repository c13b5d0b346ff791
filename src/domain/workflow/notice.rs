//! User-visible, non-blocking notifications produced by transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How prominently a notice should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
}

/// What happened, for callers that react programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Suggested criteria unavailable; default criteria used.
    CriteriaFallback,
    /// Suggested options unavailable; placeholder options used.
    OptionsFallback,
    /// A description could not be generated.
    DescriptionFallback,
    /// The decision record could not be stored.
    DecisionNotSaved,
    /// The criteria/options snapshot could not be stored.
    AnalysisNotSaved,
    /// The recommendation could not be written back.
    RecommendationNotSaved,
}

/// A transient message describing a failure and the fallback applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn warning(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            kind,
            message: message.into(),
        }
    }

    pub fn info(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => write!(f, "{}", self.message),
            NoticeLevel::Warning => write!(f, "warning: {}", self.message),
        }
    }
}
