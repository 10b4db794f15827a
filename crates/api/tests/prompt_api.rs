//! HTTP-level integration tests for the prompt API endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! The prerequisite project is created via the repository layer to keep
//! tests focused on HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, send};
use promptstudio_db::models::project::CreateProject;
use promptstudio_db::repositories::ProjectRepo;
use serde_json::json;
use sqlx::PgPool;

const OWNER: i64 = 1;
const OTHER_USER: i64 = 2;

async fn seed_project(pool: &PgPool) -> i64 {
    ProjectRepo::create(
        pool,
        &CreateProject {
            owner_id: OWNER,
            name: "API test project".to_string(),
            description: None,
            project_type_tag: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_update_and_revert_flow(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let app = build_test_app(pool);

    // Create.
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/prompts",
        Some(OWNER),
        Some(json!({ "project_id": project_id, "title": "A", "content": "first draft" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["current_version"], 1);
    let prompt_id = body["data"]["id"].as_i64().unwrap();

    // Update twice: A -> B -> C.
    for title in ["B", "C"] {
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/v1/prompts/{prompt_id}"),
            Some(OWNER),
            Some(json!({ "title": title })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // History is newest-first with no gaps.
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/prompts/{prompt_id}/versions"),
        Some(OWNER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let versions: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["version_number"].as_i64().unwrap())
        .collect();
    assert_eq!(versions, vec![2, 1]);

    // Revert to version 1: content comes back, counter advances.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/prompts/{prompt_id}/revert/1"),
        Some(OWNER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "A");
    assert_eq!(body["data"]["current_version"], 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_identity_header_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);

    let (status, body) = send(&app, "GET", "/api/v1/prompts/1", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_prompt_is_forbidden(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let app = build_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/prompts",
        Some(OWNER),
        Some(json!({ "project_id": project_id, "title": "Mine" })),
    )
    .await;
    let prompt_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/prompts/{prompt_id}"),
        Some(OTHER_USER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revert_to_unknown_version_is_not_found(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let app = build_test_app(pool);

    let (_, body) = send(
        &app,
        "POST",
        "/api/v1/prompts",
        Some(OWNER),
        Some(json!({ "project_id": project_id, "title": "A" })),
    )
    .await;
    let prompt_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/prompts/{prompt_id}/revert/99"),
        Some(OWNER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_title_is_validation_error(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let app = build_test_app(pool);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/prompts",
        Some(OWNER),
        Some(json!({ "project_id": project_id, "title": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn project_prompt_listing_is_scoped_to_caller(pool: PgPool) {
    let project_id = seed_project(&pool).await;
    let app = build_test_app(pool);

    send(
        &app,
        "POST",
        "/api/v1/prompts",
        Some(OWNER),
        Some(json!({ "project_id": project_id, "title": "Mine" })),
    )
    .await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/v1/projects/{project_id}/prompts"),
        Some(OTHER_USER),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}
