//! PostgreSQL implementation of AnalysisRepository.
//!
//! A snapshot is spread over `decision_analyses` (one row per decision) and
//! the `criteria`, `options` and `evaluations` child tables. Saving replaces
//! all child rows inside one transaction.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::decision::{
    AnalysisSnapshot, Criterion, DecisionOption, Evaluation, EvaluationSource,
};
use crate::domain::foundation::{
    CriterionId, DecisionId, DomainError, ErrorCode, OptionId, Timestamp, Weight,
};
use crate::ports::AnalysisRepository;

use super::decision_repository::column;

/// PostgreSQL implementation of AnalysisRepository.
#[derive(Clone)]
pub struct PostgresAnalysisRepository {
    pool: PgPool,
}

impl PostgresAnalysisRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisRepository for PostgresAnalysisRepository {
    async fn save_snapshot(
        &self,
        decision_id: &DecisionId,
        snapshot: &AnalysisSnapshot,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        // Cascades to criteria, options and evaluations.
        sqlx::query("DELETE FROM decision_analyses WHERE decision_id = $1")
            .bind(decision_id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to clear analysis", e))?;

        sqlx::query("INSERT INTO decision_analyses (decision_id, saved_at) VALUES ($1, $2)")
            .bind(decision_id.as_uuid())
            .bind(snapshot.saved_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert analysis", e))?;

        for (position, criterion) in snapshot.criteria.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO criteria (id, decision_id, position, name, weight, is_ai_generated)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(criterion.id.as_uuid())
            .bind(decision_id.as_uuid())
            .bind(position as i32)
            .bind(&criterion.name)
            .bind(criterion.weight.value() as i16)
            .bind(criterion.is_ai_generated)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert criterion", e))?;
        }

        for (position, option) in snapshot.options.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO options (id, decision_id, position, title, description, is_ai_generated)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(option.id.as_uuid())
            .bind(decision_id.as_uuid())
            .bind(position as i32)
            .bind(&option.title)
            .bind(&option.description)
            .bind(option.is_ai_generated)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert option", e))?;
        }

        for evaluation in &snapshot.evaluations {
            sqlx::query(
                r#"
                INSERT INTO evaluations (decision_id, option_id, criterion_id, score, source)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (decision_id, option_id, criterion_id)
                DO UPDATE SET score = EXCLUDED.score, source = EXCLUDED.source
                "#,
            )
            .bind(decision_id.as_uuid())
            .bind(evaluation.option_id.as_uuid())
            .bind(evaluation.criterion_id.as_uuid())
            .bind(evaluation.score)
            .bind(source_to_str(evaluation.source))
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert evaluation", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit analysis", e))?;

        Ok(())
    }

    async fn load_snapshot(
        &self,
        decision_id: &DecisionId,
    ) -> Result<Option<AnalysisSnapshot>, DomainError> {
        let header = sqlx::query("SELECT saved_at FROM decision_analyses WHERE decision_id = $1")
            .bind(decision_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch analysis", e))?;

        let Some(header) = header else {
            return Ok(None);
        };
        let saved_at: chrono::DateTime<chrono::Utc> = column(&header, "saved_at")?;

        let criteria = sqlx::query(
            r#"
            SELECT id, name, weight, is_ai_generated
            FROM criteria
            WHERE decision_id = $1
            ORDER BY position
            "#,
        )
        .bind(decision_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch criteria", e))?
        .iter()
        .map(row_to_criterion)
        .collect::<Result<Vec<_>, _>>()?;

        let options = sqlx::query(
            r#"
            SELECT id, title, description, is_ai_generated
            FROM options
            WHERE decision_id = $1
            ORDER BY position
            "#,
        )
        .bind(decision_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch options", e))?
        .iter()
        .map(row_to_option)
        .collect::<Result<Vec<_>, _>>()?;

        let evaluations = sqlx::query(
            r#"
            SELECT option_id, criterion_id, score, source
            FROM evaluations
            WHERE decision_id = $1
            "#,
        )
        .bind(decision_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch evaluations", e))?
        .iter()
        .map(row_to_evaluation)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(AnalysisSnapshot {
            criteria,
            options,
            evaluations,
            saved_at: Timestamp::from_datetime(saved_at),
        }))
    }

    async fn delete_snapshot(&self, decision_id: &DecisionId) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM decision_analyses WHERE decision_id = $1")
            .bind(decision_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete analysis", e))?;

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn source_to_str(source: EvaluationSource) -> &'static str {
    match source {
        EvaluationSource::Placeholder => "placeholder",
        EvaluationSource::Manual => "manual",
    }
}

fn str_to_source(s: &str) -> Result<EvaluationSource, DomainError> {
    match s {
        "placeholder" => Ok(EvaluationSource::Placeholder),
        "manual" => Ok(EvaluationSource::Manual),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid evaluation source: {}", s),
        )),
    }
}

fn row_to_criterion(row: &PgRow) -> Result<Criterion, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let name: String = column(row, "name")?;
    let weight: i16 = column(row, "weight")?;
    let is_ai_generated: bool = column(row, "is_ai_generated")?;

    let weight = u8::try_from(weight)
        .ok()
        .and_then(|w| Weight::try_new(w).ok())
        .ok_or_else(|| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid weight: {}", weight))
        })?;

    let mut criterion = Criterion::new(CriterionId::from_uuid(id), name, weight);
    criterion.is_ai_generated = is_ai_generated;
    Ok(criterion)
}

fn row_to_option(row: &PgRow) -> Result<DecisionOption, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let title: String = column(row, "title")?;
    let description: Option<String> = column(row, "description")?;
    let is_ai_generated: bool = column(row, "is_ai_generated")?;

    let mut option = DecisionOption::new(OptionId::from_uuid(id), title, description.unwrap_or_default());
    option.is_ai_generated = is_ai_generated;
    Ok(option)
}

fn row_to_evaluation(row: &PgRow) -> Result<Evaluation, DomainError> {
    let option_id: uuid::Uuid = column(row, "option_id")?;
    let criterion_id: uuid::Uuid = column(row, "criterion_id")?;
    let score: f64 = column(row, "score")?;
    let source: String = column(row, "source")?;

    Ok(Evaluation::new(
        OptionId::from_uuid(option_id),
        CriterionId::from_uuid(criterion_id),
        score,
        str_to_source(&source)?,
    ))
}
