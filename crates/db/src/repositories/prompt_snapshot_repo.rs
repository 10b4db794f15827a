//! Repository for the `prompt_snapshots` table.
//!
//! Read-only by design: snapshots are written exclusively by
//! [`crate::repositories::PromptRepo::update_with_snapshot`] and are never
//! updated or deleted afterwards.

use promptstudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt_snapshot::PromptSnapshot;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, prompt_id, version_number, title, content, metadata, created_at";

/// Provides read operations over the append-only snapshot history.
pub struct PromptSnapshotRepo;

impl PromptSnapshotRepo {
    /// List all snapshots for a prompt, ordered by version number descending
    /// (most recent superseded state first).
    pub async fn list_for_prompt(
        pool: &PgPool,
        prompt_id: DbId,
    ) -> Result<Vec<PromptSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_snapshots
             WHERE prompt_id = $1
             ORDER BY version_number DESC"
        );
        sqlx::query_as::<_, PromptSnapshot>(&query)
            .bind(prompt_id)
            .fetch_all(pool)
            .await
    }

    /// Find a specific snapshot by prompt and version number.
    pub async fn find_by_prompt_and_version(
        pool: &PgPool,
        prompt_id: DbId,
        version_number: i32,
    ) -> Result<Option<PromptSnapshot>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompt_snapshots
             WHERE prompt_id = $1 AND version_number = $2"
        );
        sqlx::query_as::<_, PromptSnapshot>(&query)
            .bind(prompt_id)
            .bind(version_number)
            .fetch_optional(pool)
            .await
    }

    /// Count the snapshots archived for a prompt.
    pub async fn count_for_prompt(pool: &PgPool, prompt_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM prompt_snapshots WHERE prompt_id = $1")
                .bind(prompt_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
