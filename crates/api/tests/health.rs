//! Health endpoint test.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, send};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_reports_ok_with_reachable_db(pool: PgPool) {
    let app = build_test_app(pool);

    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
}
