//! Route definitions for prompts and their version history.
//!
//! ```text
//! POST /prompts                                    create_prompt
//! GET  /prompts/{prompt_id}                        get_prompt
//! PUT  /prompts/{prompt_id}                        update_prompt
//! GET  /prompts/{prompt_id}/versions               list_prompt_versions
//! POST /prompts/{prompt_id}/revert/{version}       revert_prompt
//! GET  /projects/{project_id}/prompts              list_prompts_by_project
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::prompts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prompts", post(prompts::create_prompt))
        .route(
            "/prompts/{prompt_id}",
            get(prompts::get_prompt).put(prompts::update_prompt),
        )
        .route(
            "/prompts/{prompt_id}/versions",
            get(prompts::list_prompt_versions),
        )
        .route(
            "/prompts/{prompt_id}/revert/{version_number}",
            post(prompts::revert_prompt),
        )
        .route(
            "/projects/{project_id}/prompts",
            get(prompts::list_prompts_by_project),
        )
}
