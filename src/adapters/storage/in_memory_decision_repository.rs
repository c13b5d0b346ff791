//! In-Memory Decision Repository
//!
//! Stores decisions in a map. Useful for testing, development and the demo
//! binary. Can be switched into an "unavailable" mode to exercise the
//! workflow's fail-soft paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, UserId};
use crate::ports::DecisionRepository;

/// In-memory storage for decisions
#[derive(Debug, Clone, Default)]
pub struct InMemoryDecisionRepository {
    decisions: Arc<RwLock<HashMap<DecisionId, Decision>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryDecisionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a database error (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored decisions
    pub async fn count(&self) -> usize {
        self.decisions.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.decisions.write().await.clear();
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database(
                "decision store",
                "storage unavailable",
            ));
        }
        Ok(())
    }
}

fn not_found(id: &DecisionId) -> DomainError {
    DomainError::new(ErrorCode::DecisionNotFound, format!("Decision not found: {}", id))
        .with_detail("decision_id", id.to_string())
}

#[async_trait]
impl DecisionRepository for InMemoryDecisionRepository {
    async fn create(&self, decision: &Decision) -> Result<DecisionId, DomainError> {
        self.check_available()?;

        let id = decision.id().unwrap_or_default();
        let mut stored = decision.clone();
        stored.assign_id(id);

        self.decisions.write().await.insert(id, stored);
        Ok(id)
    }

    async fn update(&self, decision: &Decision) -> Result<(), DomainError> {
        self.check_available()?;

        let id = decision.id().ok_or_else(|| {
            DomainError::new(ErrorCode::DecisionNotFound, "Decision has not been stored yet")
        })?;

        let mut decisions = self.decisions.write().await;
        let existing = decisions.get_mut(&id).ok_or_else(|| not_found(&id))?;
        *existing = Decision::reconstitute(
            id,
            existing.user_id().clone(),
            decision.title().to_string(),
            decision.description().to_string(),
            decision.deadline(),
            existing.ai_recommendation().map(str::to_owned),
            existing.created_at(),
            decision.updated_at(),
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        self.check_available()?;
        Ok(self.decisions.read().await.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Decision>, DomainError> {
        self.check_available()?;

        let mut found: Vec<Decision> = self
            .decisions
            .read()
            .await
            .values()
            .filter(|d| d.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by_key(|d| std::cmp::Reverse(d.created_at()));
        Ok(found)
    }

    async fn update_recommendation(
        &self,
        id: &DecisionId,
        recommendation: &str,
    ) -> Result<(), DomainError> {
        self.check_available()?;

        let mut decisions = self.decisions.write().await;
        let existing = decisions.get_mut(id).ok_or_else(|| not_found(id))?;
        existing.set_recommendation(Some(recommendation.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(user: &str, title: &str) -> Decision {
        Decision::new(UserId::new(user).unwrap(), title, "", None).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_stores() {
        let repo = InMemoryDecisionRepository::new();

        let id = repo.create(&decision("u1", "Choisir une voiture")).await.unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.id(), Some(id));
        assert_eq!(stored.title(), "Choisir une voiture");
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn update_keeps_recommendation() {
        let repo = InMemoryDecisionRepository::new();
        let mut d = decision("u1", "Voiture");
        let id = repo.create(&d).await.unwrap();
        d.assign_id(id);
        repo.update_recommendation(&id, "Tesla").await.unwrap();

        d.edit("Voiture électrique", "", None).unwrap();
        repo.update(&d).await.unwrap();

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.title(), "Voiture électrique");
        assert_eq!(stored.ai_recommendation(), Some("Tesla"));
    }

    #[tokio::test]
    async fn update_of_unknown_decision_fails() {
        let repo = InMemoryDecisionRepository::new();
        let mut d = decision("u1", "Voiture");
        d.assign_id(DecisionId::new());

        let err = repo.update(&d).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);

        let err = repo.update(&decision("u1", "Sans id")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DecisionNotFound);
    }

    #[tokio::test]
    async fn find_by_user_filters_and_orders_newest_first() {
        let repo = InMemoryDecisionRepository::new();
        repo.create(&decision("u1", "Première")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create(&decision("u1", "Deuxième")).await.unwrap();
        repo.create(&decision("u2", "Autre")).await.unwrap();

        let found = repo.find_by_user(&UserId::new("u1").unwrap()).await.unwrap();

        let titles: Vec<_> = found.iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["Deuxième", "Première"]);
    }

    #[tokio::test]
    async fn unavailable_mode_fails_every_call() {
        let repo = InMemoryDecisionRepository::new();
        repo.set_unavailable(true);

        let err = repo.create(&decision("u1", "Voiture")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        repo.set_unavailable(false);
        assert!(repo.create(&decision("u1", "Voiture")).await.is_ok());
    }
}
