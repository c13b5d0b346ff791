//! Workflow tuning

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for concurrent description requests.
pub const MAX_DESCRIPTION_CONCURRENCY: usize = 16;

/// Workflow configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Description requests in flight at once; 1 means strictly sequential
    #[serde(default = "default_description_concurrency")]
    pub description_concurrency: usize,

    /// Per-call limit for AI collaborators; unset means wait indefinitely
    #[serde(default)]
    pub collaborator_timeout_secs: Option<u64>,
}

impl WorkflowConfig {
    pub fn collaborator_timeout(&self) -> Option<Duration> {
        self.collaborator_timeout_secs.map(Duration::from_secs)
    }

    pub fn with_description_concurrency(mut self, concurrency: usize) -> Self {
        self.description_concurrency = concurrency;
        self
    }

    pub fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    /// Validate workflow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=MAX_DESCRIPTION_CONCURRENCY).contains(&self.description_concurrency) {
            return Err(ValidationError::InvalidConcurrency {
                max: MAX_DESCRIPTION_CONCURRENCY,
                actual: self.description_concurrency,
            });
        }
        if self.collaborator_timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            description_concurrency: default_description_concurrency(),
            collaborator_timeout_secs: None,
        }
    }
}

fn default_description_concurrency() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sequential_without_timeout() {
        let config = WorkflowConfig::default();
        assert_eq!(config.description_concurrency, 1);
        assert!(config.collaborator_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_concurrency_bounds() {
        assert!(WorkflowConfig::default()
            .with_description_concurrency(0)
            .validate()
            .is_err());
        assert!(WorkflowConfig::default()
            .with_description_concurrency(MAX_DESCRIPTION_CONCURRENCY)
            .validate()
            .is_ok());
        assert!(WorkflowConfig::default()
            .with_description_concurrency(MAX_DESCRIPTION_CONCURRENCY + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = WorkflowConfig {
            collaborator_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_timeout_duration() {
        let config = WorkflowConfig::default().with_collaborator_timeout(Duration::from_secs(5));
        assert_eq!(config.collaborator_timeout(), Some(Duration::from_secs(5)));
    }
}
