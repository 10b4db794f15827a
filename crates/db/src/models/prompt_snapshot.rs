//! Prompt snapshot model.
//!
//! Snapshots are immutable archived copies of a prompt's content at a prior
//! version. The repository layer exposes no update or delete path for them.

use promptstudio_core::prompts::PromptMetadata;
use promptstudio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A snapshot row from the `prompt_snapshots` table.
///
/// `(prompt_id, version_number)` is unique; `created_at` is the archival
/// timestamp, not the original authoring time of the content.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PromptSnapshot {
    pub id: DbId,
    pub prompt_id: DbId,
    pub version_number: i32,
    pub title: String,
    pub content: String,
    pub metadata: Json<PromptMetadata>,
    pub created_at: Timestamp,
}
