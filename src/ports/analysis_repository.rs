//! Analysis repository port.
//!
//! Stores the criteria, options and evaluations of a decision as one
//! snapshot so a previous analysis can be saved and loaded again.

use async_trait::async_trait;

use crate::domain::decision::AnalysisSnapshot;
use crate::domain::foundation::{DecisionId, DomainError};

/// Repository port for analysis snapshots, keyed by decision.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// Replace whatever was stored for the decision with `snapshot`.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save_snapshot(
        &self,
        decision_id: &DecisionId,
        snapshot: &AnalysisSnapshot,
    ) -> Result<(), DomainError>;

    /// Load the snapshot for a decision. Returns `None` if nothing was saved.
    async fn load_snapshot(
        &self,
        decision_id: &DecisionId,
    ) -> Result<Option<AnalysisSnapshot>, DomainError>;

    /// Remove the stored snapshot. Removing a missing snapshot is not an error.
    async fn delete_snapshot(&self, decision_id: &DecisionId) -> Result<(), DomainError>;
}
