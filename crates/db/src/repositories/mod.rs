//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod project_repo;
pub mod prompt_repo;
pub mod prompt_snapshot_repo;

pub use project_repo::ProjectRepo;
pub use prompt_repo::PromptRepo;
pub use prompt_snapshot_repo::PromptSnapshotRepo;
