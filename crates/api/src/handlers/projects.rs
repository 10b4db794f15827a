//! Handlers for project CRUD.
//!
//! Projects are plain records with no versioning; they exist to group
//! prompts per owner.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use promptstudio_core::error::CoreError;
use promptstudio_core::projects::{validate_project_description, validate_project_name};
use promptstudio_core::types::DbId;
use promptstudio_db::models::project::{CreateProject, Project, UpdateProject};
use promptstudio_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating a project.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub project_type_tag: Option<String>,
}

/// Verify that a project exists and is owned by the caller, returning the row.
async fn ensure_owned_project(
    pool: &sqlx::PgPool,
    caller_id: DbId,
    id: DbId,
) -> AppResult<Project> {
    let project = ProjectRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    if project.owner_id != caller_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Caller does not own this project".into(),
        )));
    }
    Ok(project)
}

// ---------------------------------------------------------------------------
// POST /projects
// ---------------------------------------------------------------------------

/// Create a new project owned by the caller.
pub async fn create_project(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(body): Json<CreateProjectRequest>,
) -> AppResult<impl IntoResponse> {
    validate_project_name(&body.name)?;
    if let Some(ref description) = body.description {
        validate_project_description(description)?;
    }

    let input = CreateProject {
        owner_id: caller.user_id,
        name: body.name,
        description: body.description,
        project_type_tag: body.project_type_tag,
    };

    let project = ProjectRepo::create(&state.pool, &input).await?;

    tracing::info!(project_id = project.id, owner_id = caller.user_id, "Project created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}

// ---------------------------------------------------------------------------
// GET /projects
// ---------------------------------------------------------------------------

/// List the caller's projects, most recently updated first.
pub async fn list_projects(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list_by_owner(&state.pool, caller.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

// ---------------------------------------------------------------------------
// GET /projects/{project_id}
// ---------------------------------------------------------------------------

/// Get a single project by ID. Owner-only.
pub async fn get_project(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(project_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ensure_owned_project(&state.pool, caller.user_id, project_id).await?;
    Ok(Json(DataResponse { data: project }))
}

// ---------------------------------------------------------------------------
// PUT /projects/{project_id}
// ---------------------------------------------------------------------------

/// Update a project. Only provided fields are applied.
pub async fn update_project(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(project_id): Path<DbId>,
    Json(patch): Json<UpdateProject>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = patch.name {
        validate_project_name(name)?;
    }
    if let Some(ref description) = patch.description {
        validate_project_description(description)?;
    }

    ensure_owned_project(&state.pool, caller.user_id, project_id).await?;

    let updated = ProjectRepo::update(&state.pool, project_id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))?;

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /projects/{project_id}
// ---------------------------------------------------------------------------

/// Delete a project by ID. Fails with 409 if prompts still reference it.
pub async fn delete_project(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(project_id): Path<DbId>,
) -> AppResult<StatusCode> {
    ensure_owned_project(&state.pool, caller.user_id, project_id).await?;

    let deleted = ProjectRepo::delete(&state.pool, project_id).await?;
    if deleted {
        tracing::info!(project_id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
    }
}
