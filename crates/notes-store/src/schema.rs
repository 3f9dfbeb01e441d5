//! Schema definitions and migration utilities.
//!
//! The SQL lives in the workspace `migrations/` directory and is embedded at
//! compile time. Every statement is `IF NOT EXISTS`, so running the whole
//! set on every start is safe.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the accounts table (001_accounts.sql).
pub const ACCOUNTS_MIGRATION: &str = include_str!("../../../migrations/001_accounts.sql");

/// Embedded migration SQL for notes and share grants (002_notes.sql).
pub const NOTES_MIGRATION: &str = include_str!("../../../migrations/002_notes.sql");

/// Run all migrations against the database, in order.
///
/// # Errors
///
/// Returns an error if any migration fails to execute.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    tracing::debug!("Running accounts migration (001_accounts.sql)...");
    sqlx::raw_sql(ACCOUNTS_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Accounts migration failed: {}", e)))?;

    tracing::debug!("Running notes migration (002_notes.sql)...");
    sqlx::raw_sql(NOTES_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notes migration failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `note_shares` table (the last one created) exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'note_shares'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}
