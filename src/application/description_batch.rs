//! Bounded batch runner for description generation.
//!
//! Requests go out in input order with at most `concurrency` in flight and
//! results come back in input order. With the default concurrency of 1 each
//! request is awaited before the next one starts.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;

use crate::config::WorkflowConfig;
use crate::domain::decision::DescriptionKind;
use crate::ports::{AIError, DecisionAssistant};

use super::collaborator::with_timeout;

/// Generates descriptions for several titles of the same decision.
pub struct DescriptionBatch {
    assistant: Arc<dyn DecisionAssistant>,
    concurrency: usize,
    timeout: Option<Duration>,
}

impl DescriptionBatch {
    pub fn new(assistant: Arc<dyn DecisionAssistant>, concurrency: usize) -> Self {
        Self {
            assistant,
            concurrency: concurrency.max(1),
            timeout: None,
        }
    }

    pub fn from_config(assistant: Arc<dyn DecisionAssistant>, config: &WorkflowConfig) -> Self {
        Self {
            timeout: config.collaborator_timeout(),
            ..Self::new(assistant, config.description_concurrency)
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// One result per title, in the order given.
    pub async fn generate(
        &self,
        titles: &[String],
        context: &str,
        kind: DescriptionKind,
    ) -> Vec<Result<String, AIError>> {
        stream::iter(titles)
            .map(|title| {
                with_timeout(
                    self.timeout,
                    self.assistant.generate_description(title, context, kind),
                )
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{CriterionSuggestion, OptionSuggestion};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records call order and how many calls overlap.
    struct TrackingAssistant {
        started: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        fail_on: Option<String>,
    }

    impl TrackingAssistant {
        fn new() -> Self {
            Self {
                started: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(title: &str) -> Self {
            Self {
                fail_on: Some(title.to_string()),
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl DecisionAssistant for TrackingAssistant {
        async fn suggest_criteria(
            &self,
            _title: &str,
            _description: &str,
        ) -> Result<Vec<CriterionSuggestion>, AIError> {
            Ok(vec![])
        }

        async fn suggest_options(
            &self,
            _title: &str,
            _description: &str,
        ) -> Result<Vec<OptionSuggestion>, AIError> {
            Ok(vec![])
        }

        async fn generate_description(
            &self,
            title: &str,
            context: &str,
            _kind: DescriptionKind,
        ) -> Result<String, AIError> {
            self.started.lock().unwrap().push(title.to_string());
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on.as_deref() == Some(title) {
                return Err(AIError::unavailable("model overloaded"));
            }
            Ok(format!("{} ({})", title, context))
        }
    }

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn default_runs_one_request_at_a_time_in_order() {
        let assistant = Arc::new(TrackingAssistant::new());
        let batch = DescriptionBatch::new(assistant.clone(), 1);

        let results = batch
            .generate(&titles(&["A", "B", "C"]), "ctx", DescriptionKind::Option)
            .await;

        assert_eq!(
            results,
            vec![
                Ok("A (ctx)".to_string()),
                Ok("B (ctx)".to_string()),
                Ok("C (ctx)".to_string()),
            ]
        );
        assert_eq!(*assistant.started.lock().unwrap(), titles(&["A", "B", "C"]));
        assert_eq!(assistant.max_in_flight.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn bounded_concurrency_keeps_result_order() {
        let assistant = Arc::new(TrackingAssistant::new());
        let batch = DescriptionBatch::new(assistant.clone(), 2);

        let results = batch
            .generate(&titles(&["A", "B", "C", "D"]), "ctx", DescriptionKind::Option)
            .await;

        let texts: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(texts[0], "A (ctx)");
        assert_eq!(texts[3], "D (ctx)");
        assert!(assistant.max_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_the_others() {
        let assistant = Arc::new(TrackingAssistant::failing_on("B"));
        let batch = DescriptionBatch::new(assistant, 1);

        let results = batch
            .generate(&titles(&["A", "B", "C"]), "ctx", DescriptionKind::Option)
            .await;

        assert!(results[0].is_ok());
        assert_eq!(results[1], Err(AIError::unavailable("model overloaded")));
        assert!(results[2].is_ok());
    }

    #[tokio::test]
    async fn timeout_counts_as_failure() {
        let assistant = Arc::new(TrackingAssistant::new());
        let batch = DescriptionBatch::new(assistant, 1).with_timeout(Duration::from_millis(1));

        let results = batch
            .generate(&titles(&["A"]), "ctx", DescriptionKind::Option)
            .await;

        assert!(matches!(results[0], Err(AIError::Timeout { .. })));
    }

    #[test]
    fn zero_concurrency_is_raised_to_one() {
        let batch = DescriptionBatch::new(Arc::new(TrackingAssistant::new()), 0);
        assert_eq!(batch.concurrency(), 1);
    }

    #[test]
    fn from_config_reads_concurrency() {
        let config = WorkflowConfig::default().with_description_concurrency(3);
        let batch = DescriptionBatch::from_config(Arc::new(TrackingAssistant::new()), &config);
        assert_eq!(batch.concurrency(), 3);
    }
}
