//! Prompt versioning engine.
//!
//! Orchestrates create, update, list-versions, and revert over the prompt
//! and snapshot repositories. Owns the version-numbering invariant:
//! `current_version` starts at 1, strictly increases on every successful
//! update or revert, and every increment is paired with exactly one
//! archived snapshot of the superseded content.
//!
//! Concurrency: the snapshot insert and the version bump run as one
//! transaction guarded by a compare-and-swap on `current_version`
//! ([`PromptRepo::update_with_snapshot`]). A CAS miss means another writer
//! got there first; the engine reloads and retries a bounded number of
//! times before surfacing `Conflict`.

use promptstudio_core::error::CoreError;
use promptstudio_core::prompts::{
    extract_placeholders, validate_content, validate_metadata, validate_target_version,
    validate_title,
};
use promptstudio_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt::{CreatePrompt, Prompt, UpdatePrompt};
use crate::models::prompt_snapshot::PromptSnapshot;
use crate::repositories::{PromptRepo, PromptSnapshotRepo};

/// How many times a CAS-guarded write is retried before giving up.
pub const MAX_CONFLICT_RETRIES: u32 = 3;

/// The prompt versioning engine.
///
/// Zero-sized, like the repositories: all methods take `&PgPool` as the
/// first argument. Caller identity is a trusted upstream fact; ownership
/// is checked against `prompts.owner_id`.
pub struct VersioningEngine;

impl VersioningEngine {
    /// Create a new prompt at version 1. No snapshot is written (there is
    /// nothing prior to archive).
    ///
    /// If the caller did not list any placeholders in the metadata, they
    /// are derived from `{placeholder}` tokens in the content.
    pub async fn create(pool: &PgPool, input: CreatePrompt) -> Result<Prompt, CoreError> {
        if input.owner_id <= 0 {
            return Err(CoreError::Validation("owner_id is required".to_string()));
        }
        if input.project_id <= 0 {
            return Err(CoreError::Validation("project_id is required".to_string()));
        }
        validate_title(&input.title)?;
        validate_content(&input.content)?;
        validate_metadata(&input.metadata)?;

        let mut metadata = input.metadata.clone().normalized();
        if metadata.placeholders.is_empty() {
            metadata.placeholders = extract_placeholders(&input.content);
        }
        let input = CreatePrompt { metadata, ..input };

        let prompt = PromptRepo::create(pool, &input)
            .await
            .map_err(|err| classify_create_error(err, input.project_id))?;

        tracing::info!(
            prompt_id = prompt.id,
            project_id = prompt.project_id,
            owner_id = prompt.owner_id,
            "Prompt created"
        );
        Ok(prompt)
    }

    /// Load a prompt, verifying existence and ownership.
    pub async fn get(pool: &PgPool, caller_id: DbId, prompt_id: DbId) -> Result<Prompt, CoreError> {
        load_owned(pool, caller_id, prompt_id).await
    }

    /// Apply a patch to a prompt, archiving the pre-mutation state as a new
    /// snapshot and advancing `current_version` by one.
    pub async fn update(
        pool: &PgPool,
        caller_id: DbId,
        prompt_id: DbId,
        patch: UpdatePrompt,
    ) -> Result<Prompt, CoreError> {
        if patch.is_empty() {
            return Err(CoreError::Validation(
                "Update patch must contain at least one field".to_string(),
            ));
        }
        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }
        if let Some(ref content) = patch.content {
            validate_content(content)?;
        }
        let UpdatePrompt {
            title,
            content,
            metadata,
        } = patch;
        let metadata = match metadata {
            Some(metadata) => {
                validate_metadata(&metadata)?;
                Some(metadata.normalized())
            }
            None => None,
        };
        let patch = UpdatePrompt {
            title,
            content,
            metadata,
        };

        for attempt in 1..=MAX_CONFLICT_RETRIES {
            let prompt = load_owned(pool, caller_id, prompt_id).await?;

            match PromptRepo::update_with_snapshot(pool, prompt_id, prompt.current_version, &patch)
                .await
            {
                Ok(Some(updated)) => {
                    tracing::info!(
                        prompt_id,
                        caller_id,
                        archived_version = prompt.current_version,
                        new_version = updated.current_version,
                        "Prompt updated"
                    );
                    return Ok(updated);
                }
                Ok(None) => {
                    tracing::debug!(prompt_id, attempt, "Version check failed, retrying update");
                }
                Err(ref err) if is_snapshot_conflict(err) => {
                    tracing::debug!(prompt_id, attempt, "Snapshot key conflict, retrying update");
                }
                Err(err) => return Err(store_error(err)),
            }
        }

        Err(conflict_exhausted(prompt_id))
    }

    /// List all archived snapshots for a prompt, most recent superseded
    /// state first. Empty if the prompt has never been updated.
    pub async fn list_versions(
        pool: &PgPool,
        caller_id: DbId,
        prompt_id: DbId,
    ) -> Result<Vec<PromptSnapshot>, CoreError> {
        load_owned(pool, caller_id, prompt_id).await?;
        PromptSnapshotRepo::list_for_prompt(pool, prompt_id)
            .await
            .map_err(store_error)
    }

    /// Revert a prompt to the content of an archived version.
    ///
    /// The pre-revert state is archived exactly like a normal update, and
    /// `current_version` advances by one: history is only ever appended to,
    /// so reverts are themselves revertible. A never-updated prompt has no
    /// snapshots and therefore no valid revert target.
    pub async fn revert(
        pool: &PgPool,
        caller_id: DbId,
        prompt_id: DbId,
        target_version: i32,
    ) -> Result<Prompt, CoreError> {
        validate_target_version(target_version)?;

        for attempt in 1..=MAX_CONFLICT_RETRIES {
            let prompt = load_owned(pool, caller_id, prompt_id).await?;

            let target =
                PromptSnapshotRepo::find_by_prompt_and_version(pool, prompt_id, target_version)
                    .await
                    .map_err(store_error)?
                    .ok_or(CoreError::NotFound {
                        entity: "PromptSnapshot",
                        id: DbId::from(target_version),
                    })?;

            let patch = UpdatePrompt {
                title: Some(target.title),
                content: Some(target.content),
                metadata: Some(target.metadata.0),
            };

            match PromptRepo::update_with_snapshot(pool, prompt_id, prompt.current_version, &patch)
                .await
            {
                Ok(Some(reverted)) => {
                    tracing::info!(
                        prompt_id,
                        caller_id,
                        target_version,
                        archived_version = prompt.current_version,
                        new_version = reverted.current_version,
                        "Prompt reverted"
                    );
                    return Ok(reverted);
                }
                Ok(None) => {
                    tracing::debug!(prompt_id, attempt, "Version check failed, retrying revert");
                }
                Err(ref err) if is_snapshot_conflict(err) => {
                    tracing::debug!(prompt_id, attempt, "Snapshot key conflict, retrying revert");
                }
                Err(err) => return Err(store_error(err)),
            }
        }

        Err(conflict_exhausted(prompt_id))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a prompt by id, failing with `NotFound` if absent and `Forbidden`
/// if the caller does not own it.
async fn load_owned(pool: &PgPool, caller_id: DbId, prompt_id: DbId) -> Result<Prompt, CoreError> {
    let prompt = PromptRepo::find_by_id(pool, prompt_id)
        .await
        .map_err(store_error)?
        .ok_or(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        })?;

    if prompt.owner_id != caller_id {
        return Err(CoreError::Forbidden(
            "Caller does not own this prompt".to_string(),
        ));
    }
    Ok(prompt)
}

/// Whether an error is a unique violation on the snapshot version key.
/// Indicates a racing writer archived the same version first; retryable.
fn is_snapshot_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint().is_some_and(|c| c.starts_with("uq_"))
        }
        _ => false,
    }
}

fn conflict_exhausted(prompt_id: DbId) -> CoreError {
    tracing::warn!(prompt_id, "Concurrent modification retries exhausted");
    CoreError::Conflict("Prompt was modified concurrently, please retry".to_string())
}

/// Map a persistence failure to the generic `Store` error, logging the
/// details server-side only.
fn store_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error in versioning engine");
    CoreError::Store("Persistence operation failed".to_string())
}

/// Classify create-time failures: a foreign-key violation on `project_id`
/// means the referenced project does not exist.
fn classify_create_error(err: sqlx::Error, project_id: DbId) -> CoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23503")
            && db_err.constraint().is_some_and(|c| c.contains("project"))
        {
            return CoreError::NotFound {
                entity: "Project",
                id: project_id,
            };
        }
    }
    store_error(err)
}
