//! PostgreSQL implementation of DecisionRepository.
//!
//! Persists Decision aggregates to the `decisions` table.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row};

use crate::domain::decision::Decision;
use crate::domain::foundation::{DecisionId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::DecisionRepository;

/// PostgreSQL implementation of DecisionRepository.
#[derive(Clone)]
pub struct PostgresDecisionRepository {
    pool: PgPool,
}

impl PostgresDecisionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: &DecisionId) -> DomainError {
    DomainError::new(ErrorCode::DecisionNotFound, format!("Decision not found: {}", id))
        .with_detail("decision_id", id.to_string())
}

#[async_trait]
impl DecisionRepository for PostgresDecisionRepository {
    async fn create(&self, decision: &Decision) -> Result<DecisionId, DomainError> {
        let id = decision.id().unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO decisions (
                id, user_id, title, description, deadline, ai_recommendation,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id.as_uuid())
        .bind(decision.user_id().as_str())
        .bind(decision.title())
        .bind(decision.description())
        .bind(decision.deadline())
        .bind(decision.ai_recommendation())
        .bind(decision.created_at().as_datetime())
        .bind(decision.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert decision", e))?;

        Ok(id)
    }

    async fn update(&self, decision: &Decision) -> Result<(), DomainError> {
        let id = decision.id().ok_or_else(|| {
            DomainError::new(ErrorCode::DecisionNotFound, "Decision has not been stored yet")
        })?;

        let result = sqlx::query(
            r#"
            UPDATE decisions SET
                title = $2,
                description = $3,
                deadline = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(decision.title())
        .bind(decision.description())
        .bind(decision.deadline())
        .bind(decision.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update decision", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &DecisionId) -> Result<Option<Decision>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, description, deadline, ai_recommendation,
                   created_at, updated_at
            FROM decisions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch decision", e))?;

        row.map(|row| row_to_decision(&row)).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Decision>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, description, deadline, ai_recommendation,
                   created_at, updated_at
            FROM decisions
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch decisions by user", e))?;

        rows.iter().map(row_to_decision).collect()
    }

    async fn update_recommendation(
        &self,
        id: &DecisionId,
        recommendation: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE decisions SET
                ai_recommendation = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(recommendation)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update recommendation", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

fn row_to_decision(row: &PgRow) -> Result<Decision, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let title: String = column(row, "title")?;
    let description: Option<String> = column(row, "description")?;
    let deadline: Option<NaiveDate> = column(row, "deadline")?;
    let ai_recommendation: Option<String> = column(row, "ai_recommendation")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    let user_id = UserId::new(user_id)
        .map_err(|e| DomainError::database("Invalid user_id", e))?;

    Ok(Decision::reconstitute(
        DecisionId::from_uuid(id),
        user_id,
        title,
        description.unwrap_or_default(),
        deadline,
        ai_recommendation,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
