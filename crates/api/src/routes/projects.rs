//! Route definitions for projects.
//!
//! ```text
//! GET    /projects                  list_projects
//! POST   /projects                  create_project
//! GET    /projects/{project_id}     get_project
//! PUT    /projects/{project_id}     update_project
//! DELETE /projects/{project_id}     delete_project
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/{project_id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
}
