//! RecommendationUpdater - keeps a decision's recommendation in step with
//! its ranking.
//!
//! After any change to options, criteria or evaluations the top-ranked
//! option's title is written back onto the decision. Persistence is
//! fire-and-forget: a failed write is logged, not retried, and the cached
//! value is still updated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::analysis::WeightedScorer;
use crate::domain::decision::{Criterion, DecisionOption, Evaluation};
use crate::domain::foundation::DecisionId;
use crate::ports::DecisionRepository;

/// What a recompute produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    /// Title of the top-ranked option.
    pub title: String,
    /// Whether the decision store accepted the write.
    pub persisted: bool,
}

/// Computes and stores the recommendation for a decision.
pub struct RecommendationUpdater {
    repository: Arc<dyn DecisionRepository>,
    cache: Mutex<HashMap<DecisionId, String>>,
}

impl RecommendationUpdater {
    pub fn new(repository: Arc<dyn DecisionRepository>) -> Self {
        Self {
            repository,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Recomputes the recommendation and returns the top title.
    ///
    /// Returns `None` without touching anything when the decision has no id
    /// or any of the inputs is empty.
    pub async fn update(
        &self,
        decision_id: Option<DecisionId>,
        options: &[DecisionOption],
        criteria: &[Criterion],
        evaluations: &[Evaluation],
    ) -> Option<String> {
        self.recompute(decision_id, options, criteria, evaluations)
            .await
            .map(|recommendation| recommendation.title)
    }

    /// Same as [`update`](Self::update), also reporting whether the write
    /// went through.
    pub async fn recompute(
        &self,
        decision_id: Option<DecisionId>,
        options: &[DecisionOption],
        criteria: &[Criterion],
        evaluations: &[Evaluation],
    ) -> Option<Recommendation> {
        let decision_id = decision_id?;
        if options.is_empty() || criteria.is_empty() || evaluations.is_empty() {
            return None;
        }

        let best = WeightedScorer::best_option(options, criteria, evaluations)?;
        let title = best.title;

        self.cache_lock().insert(decision_id, title.clone());

        let persisted = match self
            .repository
            .update_recommendation(&decision_id, &title)
            .await
        {
            Ok(()) => {
                debug!(decision_id = %decision_id, recommendation = %title, "Recommendation saved");
                true
            }
            Err(e) => {
                warn!(
                    decision_id = %decision_id,
                    error = %e,
                    "Failed to save recommendation, keeping it in memory only"
                );
                false
            }
        };

        Some(Recommendation { title, persisted })
    }

    /// Last recommendation computed for a decision, saved or not.
    pub fn cached(&self, decision_id: &DecisionId) -> Option<String> {
        self.cache_lock().get(decision_id).cloned()
    }

    fn cache_lock(&self) -> std::sync::MutexGuard<'_, HashMap<DecisionId, String>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{Decision, EvaluationSource};
    use crate::domain::foundation::{CriterionId, DomainError, ErrorCode, OptionId, UserId, Weight};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct MockDecisionRepository {
        writes: Mutex<Vec<(DecisionId, String)>>,
        fail: bool,
    }

    impl MockDecisionRepository {
        fn new() -> Self {
            Self {
                writes: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn writes(&self) -> Vec<(DecisionId, String)> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DecisionRepository for MockDecisionRepository {
        async fn create(&self, _decision: &Decision) -> Result<DecisionId, DomainError> {
            Ok(DecisionId::new())
        }

        async fn update(&self, _decision: &Decision) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &DecisionId) -> Result<Option<Decision>, DomainError> {
            Ok(None)
        }

        async fn find_by_user(&self, _user_id: &UserId) -> Result<Vec<Decision>, DomainError> {
            Ok(vec![])
        }

        async fn update_recommendation(
            &self,
            id: &DecisionId,
            recommendation: &str,
        ) -> Result<(), DomainError> {
            self.writes
                .lock()
                .unwrap()
                .push((*id, recommendation.to_string()));
            if self.fail {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated update failure",
                ));
            }
            Ok(())
        }
    }

    fn option(n: u128, title: &str) -> DecisionOption {
        DecisionOption::new(OptionId::from_uuid(Uuid::from_u128(n)), title, "")
    }

    fn criterion(n: u128, name: &str, weight: u8) -> Criterion {
        Criterion::new(
            CriterionId::from_uuid(Uuid::from_u128(100 + n)),
            name,
            Weight::try_new(weight).unwrap(),
        )
    }

    fn eval(o: &DecisionOption, c: &Criterion, score: f64) -> Evaluation {
        Evaluation::new(o.id, c.id, score, EvaluationSource::Manual)
    }

    fn car_fixture() -> (Vec<DecisionOption>, Vec<Criterion>, Vec<Evaluation>) {
        let tesla = option(1, "Tesla");
        let honda = option(2, "Honda");
        let cost = criterion(1, "Coût", 4);
        let quality = criterion(2, "Qualité", 2);
        let evaluations = vec![
            eval(&tesla, &cost, 8.0),
            eval(&tesla, &quality, 6.0),
            eval(&honda, &cost, 5.0),
            eval(&honda, &quality, 9.0),
        ];
        (vec![tesla, honda], vec![cost, quality], evaluations)
    }

    #[tokio::test]
    async fn writes_top_ranked_title() {
        let repo = Arc::new(MockDecisionRepository::new());
        let updater = RecommendationUpdater::new(repo.clone());
        let id = DecisionId::new();
        let (options, criteria, evaluations) = car_fixture();

        let title = updater
            .update(Some(id), &options, &criteria, &evaluations)
            .await;

        assert_eq!(title.as_deref(), Some("Tesla"));
        assert_eq!(repo.writes(), vec![(id, "Tesla".to_string())]);
        assert_eq!(updater.cached(&id).as_deref(), Some("Tesla"));
    }

    #[tokio::test]
    async fn missing_id_is_a_no_op() {
        let repo = Arc::new(MockDecisionRepository::new());
        let updater = RecommendationUpdater::new(repo.clone());
        let (options, criteria, evaluations) = car_fixture();

        let title = updater.update(None, &options, &criteria, &evaluations).await;

        assert!(title.is_none());
        assert!(repo.writes().is_empty());
    }

    #[tokio::test]
    async fn empty_inputs_are_a_no_op() {
        let repo = Arc::new(MockDecisionRepository::new());
        let updater = RecommendationUpdater::new(repo.clone());
        let id = DecisionId::new();
        let (options, criteria, evaluations) = car_fixture();

        assert!(updater.update(Some(id), &[], &criteria, &evaluations).await.is_none());
        assert!(updater.update(Some(id), &options, &[], &evaluations).await.is_none());
        assert!(updater.update(Some(id), &options, &criteria, &[]).await.is_none());
        assert!(repo.writes().is_empty());
        assert!(updater.cached(&id).is_none());
    }

    #[tokio::test]
    async fn failed_write_still_updates_cache_without_retry() {
        let repo = Arc::new(MockDecisionRepository::failing());
        let updater = RecommendationUpdater::new(repo.clone());
        let id = DecisionId::new();
        let (options, criteria, evaluations) = car_fixture();

        let recommendation = updater
            .recompute(Some(id), &options, &criteria, &evaluations)
            .await
            .unwrap();

        assert_eq!(recommendation.title, "Tesla");
        assert!(!recommendation.persisted);
        assert_eq!(repo.writes().len(), 1);
        assert_eq!(updater.cached(&id).as_deref(), Some("Tesla"));
    }

    #[tokio::test]
    async fn last_writer_wins() {
        let repo = Arc::new(MockDecisionRepository::new());
        let updater = RecommendationUpdater::new(repo.clone());
        let id = DecisionId::new();
        let (options, criteria, mut evaluations) = car_fixture();

        updater.update(Some(id), &options, &criteria, &evaluations).await;
        evaluations[0].score = 1.0;
        let title = updater.update(Some(id), &options, &criteria, &evaluations).await;

        assert_eq!(title.as_deref(), Some("Honda"));
        assert_eq!(updater.cached(&id).as_deref(), Some("Honda"));
        assert_eq!(repo.writes().len(), 2);
    }
}
