//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresDecisionRepository` - Decision records
//! - `PostgresAnalysisRepository` - Criteria, options and evaluations per decision
//!
//! Schema lives in `migrations/` and is applied with `sqlx::migrate!`.

mod analysis_repository;
mod decision_repository;

pub use analysis_repository::PostgresAnalysisRepository;
pub use decision_repository::PostgresDecisionRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a pool and applies pending migrations when enabled.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(config.url())
        .await
        .map_err(|e| DomainError::database("Failed to connect to database", e))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database("Failed to run migrations", e))?;
        tracing::info!("database migrations applied");
    }

    Ok(pool)
}
