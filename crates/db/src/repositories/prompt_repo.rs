//! Repository for the `prompts` table.
//!
//! The write path for existing prompts goes through
//! [`PromptRepo::update_with_snapshot`], which archives the current row into
//! `prompt_snapshots` and advances `current_version` as one transaction.

use promptstudio_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::prompt::{CreatePrompt, Prompt, UpdatePrompt};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, owner_id, title, content, metadata, \
    current_version, created_at, last_modified_at";

/// Provides CRUD and version-management operations for prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a new prompt at version 1. Returns the created row.
    pub async fn create(pool: &PgPool, input: &CreatePrompt) -> Result<Prompt, sqlx::Error> {
        let query = format!(
            "INSERT INTO prompts (project_id, owner_id, title, content, metadata)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(input.project_id)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(Json(&input.metadata))
            .fetch_one(pool)
            .await
    }

    /// Find a prompt by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prompt>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prompts WHERE id = $1");
        sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's prompts in a project, most recently modified first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        owner_id: DbId,
    ) -> Result<Vec<Prompt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prompts
             WHERE project_id = $1 AND owner_id = $2
             ORDER BY last_modified_at DESC"
        );
        sqlx::query_as::<_, Prompt>(&query)
            .bind(project_id)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Archive the prompt's current content into `prompt_snapshots` and
    /// apply `patch`, advancing `current_version` by one, as a single
    /// transaction guarded by a compare-and-swap on `current_version`.
    ///
    /// Both statements are keyed on `id = $1 AND current_version = $2`, so
    /// the archived snapshot and the row being replaced are guaranteed to
    /// be the same generation. If a concurrent writer advanced the version
    /// first, zero rows match, the transaction rolls back (discarding the
    /// snapshot insert, if any), and `Ok(None)` is returned so the caller
    /// can reload and retry.
    pub async fn update_with_snapshot(
        pool: &PgPool,
        id: DbId,
        expected_version: i32,
        patch: &UpdatePrompt,
    ) -> Result<Option<Prompt>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Archive the pre-mutation state, tagged with the pre-mutation version.
        let archived = sqlx::query(
            "INSERT INTO prompt_snapshots (prompt_id, version_number, title, content, metadata)
             SELECT id, current_version, title, content, metadata
             FROM prompts WHERE id = $1 AND current_version = $2",
        )
        .bind(id)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?;

        if archived.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        // Apply the patch and advance the version, re-checking the CAS guard.
        let query = format!(
            "UPDATE prompts SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                metadata = COALESCE($5, metadata),
                current_version = current_version + 1,
                last_modified_at = NOW()
             WHERE id = $1 AND current_version = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Prompt>(&query)
            .bind(id)
            .bind(expected_version)
            .bind(&patch.title)
            .bind(&patch.content)
            .bind(patch.metadata.as_ref().map(Json))
            .fetch_optional(&mut *tx)
            .await?;

        match updated {
            Some(prompt) => {
                tx.commit().await?;
                Ok(Some(prompt))
            }
            None => {
                tx.rollback().await?;
                Ok(None)
            }
        }
    }
}
