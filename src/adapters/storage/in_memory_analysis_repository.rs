//! In-Memory Analysis Repository
//!
//! Keeps one snapshot per decision. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::decision::AnalysisSnapshot;
use crate::domain::foundation::{DecisionId, DomainError};
use crate::ports::AnalysisRepository;

/// In-memory storage for analysis snapshots
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalysisRepository {
    snapshots: Arc<RwLock<HashMap<DecisionId, AnalysisSnapshot>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryAnalysisRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a database error (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored snapshots
    pub async fn count(&self) -> usize {
        self.snapshots.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("analysis store", "storage unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn save_snapshot(
        &self,
        decision_id: &DecisionId,
        snapshot: &AnalysisSnapshot,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        self.snapshots
            .write()
            .await
            .insert(*decision_id, snapshot.clone());
        Ok(())
    }

    async fn load_snapshot(
        &self,
        decision_id: &DecisionId,
    ) -> Result<Option<AnalysisSnapshot>, DomainError> {
        self.check_available()?;
        Ok(self.snapshots.read().await.get(decision_id).cloned())
    }

    async fn delete_snapshot(&self, decision_id: &DecisionId) -> Result<(), DomainError> {
        self.check_available()?;
        self.snapshots.write().await.remove(decision_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::decision::{Criterion, DecisionOption};
    use crate::domain::foundation::{CriterionId, OptionId, Weight};
    use uuid::Uuid;

    fn snapshot(option_title: &str) -> AnalysisSnapshot {
        AnalysisSnapshot::new(
            vec![Criterion::new(
                CriterionId::from_uuid(Uuid::from_u128(1)),
                "Coût",
                Weight::default(),
            )],
            vec![DecisionOption::new(
                OptionId::from_uuid(Uuid::from_u128(2)),
                option_title,
                "",
            )],
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let repo = InMemoryAnalysisRepository::new();
        let id = DecisionId::new();

        repo.save_snapshot(&id, &snapshot("Tesla")).await.unwrap();
        repo.save_snapshot(&id, &snapshot("Honda")).await.unwrap();

        let loaded = repo.load_snapshot(&id).await.unwrap().unwrap();
        assert_eq!(loaded.options[0].title, "Honda");
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn load_missing_returns_none_and_delete_is_idempotent() {
        let repo = InMemoryAnalysisRepository::new();
        let id = DecisionId::new();

        assert!(repo.load_snapshot(&id).await.unwrap().is_none());
        repo.delete_snapshot(&id).await.unwrap();

        repo.save_snapshot(&id, &snapshot("Tesla")).await.unwrap();
        repo.delete_snapshot(&id).await.unwrap();
        assert!(repo.load_snapshot(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unavailable_mode_fails_saves() {
        let repo = InMemoryAnalysisRepository::new();
        repo.set_unavailable(true);

        assert!(repo
            .save_snapshot(&DecisionId::new(), &snapshot("Tesla"))
            .await
            .is_err());
    }
}
