//! Handlers for prompt CRUD and versioning.
//!
//! All mutation of an existing prompt goes through the versioning engine,
//! which archives the pre-mutation state and advances the version counter
//! atomically.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use promptstudio_core::prompts::PromptMetadata;
use promptstudio_core::types::DbId;
use promptstudio_db::models::prompt::{CreatePrompt, UpdatePrompt};
use promptstudio_db::repositories::PromptRepo;
use promptstudio_db::versioning::VersioningEngine;

use crate::error::AppResult;
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// API request types
// ---------------------------------------------------------------------------

/// Request body for creating a prompt.
#[derive(Debug, Deserialize)]
pub struct CreatePromptRequest {
    pub project_id: DbId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: PromptMetadata,
}

// ---------------------------------------------------------------------------
// POST /prompts
// ---------------------------------------------------------------------------

/// Create a new prompt at version 1 in the given project.
pub async fn create_prompt(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(body): Json<CreatePromptRequest>,
) -> AppResult<impl IntoResponse> {
    let input = CreatePrompt {
        project_id: body.project_id,
        owner_id: caller.user_id,
        title: body.title,
        content: body.content,
        metadata: body.metadata,
    };

    let prompt = VersioningEngine::create(&state.pool, input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: prompt })))
}

// ---------------------------------------------------------------------------
// GET /prompts/{prompt_id}
// ---------------------------------------------------------------------------

/// Get a single prompt by ID. Owner-only.
pub async fn get_prompt(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(prompt_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let prompt = VersioningEngine::get(&state.pool, caller.user_id, prompt_id).await?;
    Ok(Json(DataResponse { data: prompt }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}/prompts
// ---------------------------------------------------------------------------

/// List the caller's prompts in a project, most recently modified first.
pub async fn list_prompts_by_project(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let prompts = PromptRepo::list_by_project(&state.pool, project_id, caller.user_id).await?;

    tracing::debug!(count = prompts.len(), project_id, "Listed prompts");

    Ok(Json(DataResponse { data: prompts }))
}

// ---------------------------------------------------------------------------
// PUT /prompts/{prompt_id}
// ---------------------------------------------------------------------------

/// Update a prompt. The previous content is archived as a new snapshot and
/// `current_version` advances by one.
pub async fn update_prompt(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(prompt_id): Path<DbId>,
    Json(patch): Json<UpdatePrompt>,
) -> AppResult<impl IntoResponse> {
    let prompt = VersioningEngine::update(&state.pool, caller.user_id, prompt_id, patch).await?;
    Ok(Json(DataResponse { data: prompt }))
}

// ---------------------------------------------------------------------------
// GET /prompts/{prompt_id}/versions
// ---------------------------------------------------------------------------

/// List all archived versions of a prompt, newest first. Empty for a
/// never-updated prompt.
pub async fn list_prompt_versions(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(prompt_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let snapshots =
        VersioningEngine::list_versions(&state.pool, caller.user_id, prompt_id).await?;

    tracing::debug!(count = snapshots.len(), prompt_id, "Listed prompt versions");

    Ok(Json(DataResponse { data: snapshots }))
}

// ---------------------------------------------------------------------------
// POST /prompts/{prompt_id}/revert/{version_number}
// ---------------------------------------------------------------------------

/// Revert a prompt to an archived version. The pre-revert state is itself
/// archived, and the version counter advances (never rewinds).
pub async fn revert_prompt(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path((prompt_id, version_number)): Path<(DbId, i32)>,
) -> AppResult<impl IntoResponse> {
    let prompt =
        VersioningEngine::revert(&state.pool, caller.user_id, prompt_id, version_number).await?;
    Ok(Json(DataResponse { data: prompt }))
}
