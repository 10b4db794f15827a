//! Route definitions.

pub mod health;
pub mod projects;
pub mod prompts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /prompts                                  create (POST)
/// /prompts/{prompt_id}                      get, update (GET, PUT)
/// /prompts/{prompt_id}/versions             version history (GET)
/// /prompts/{prompt_id}/revert/{version}     revert (POST)
/// /projects/{project_id}/prompts            prompts in project (GET)
///
/// /projects                                 list, create (GET, POST)
/// /projects/{project_id}                    get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(prompts::router())
        .merge(projects::router())
}
