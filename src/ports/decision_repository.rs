//! Decision repository port.
//!
//! Persists the `Decision` root aggregate. The store assigns identifiers:
//! `create` returns the id under which the decision was saved.

use async_trait::async_trait;

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, UserId};

/// Repository port for Decision persistence.
#[async_trait]
pub trait DecisionRepository: Send + Sync {
    /// Store a new decision and return its assigned id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, decision: &Decision) -> Result<DecisionId, DomainError>;

    /// Overwrite title, description and deadline of an existing decision.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision has no id or doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, decision: &Decision) -> Result<(), DomainError>;

    /// Find a decision by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError>;

    /// All decisions of a user, most recently created first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Decision>, DomainError>;

    /// Write the recommendation field. Last writer wins.
    ///
    /// # Errors
    ///
    /// - `DecisionNotFound` if the decision doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_recommendation(
        &self,
        id: &DecisionId,
        recommendation: &str,
    ) -> Result<(), DomainError>;
}
