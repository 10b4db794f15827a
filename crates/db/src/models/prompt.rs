//! Prompt models and DTOs.
//!
//! A `Prompt` is the single mutable "current" record; its history lives in
//! `prompt_snapshots` (see [`crate::models::prompt_snapshot`]).

use promptstudio_core::prompts::PromptMetadata;
use promptstudio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A prompt row from the `prompts` table.
///
/// Invariant: `current_version` always equals the version number of the
/// content currently held in `title`/`content`/`metadata`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Prompt {
    pub id: DbId,
    pub project_id: DbId,
    pub owner_id: DbId,
    pub title: String,
    /// Opaque serialized rich-text payload.
    pub content: String,
    pub metadata: Json<PromptMetadata>,
    pub current_version: i32,
    pub created_at: Timestamp,
    pub last_modified_at: Timestamp,
}

/// Input for creating a new prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrompt {
    pub project_id: DbId,
    pub owner_id: DbId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub metadata: PromptMetadata,
}

/// Patch for updating a prompt. `None` fields are left unchanged;
/// explicitly-empty values overwrite. A present `metadata` replaces the
/// whole metadata record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrompt {
    pub title: Option<String>,
    pub content: Option<String>,
    pub metadata: Option<PromptMetadata>,
}

impl UpdatePrompt {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.metadata.is_none()
    }
}
