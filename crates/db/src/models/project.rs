//! Project models and DTOs.

use promptstudio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub project_type_tag: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub project_type_tag: Option<String>,
}

/// Patch for updating a project. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_type_tag: Option<String>,
}
