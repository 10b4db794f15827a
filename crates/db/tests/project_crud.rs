//! Integration tests for project CRUD.

use promptstudio_db::models::project::{CreateProject, UpdateProject};
use promptstudio_db::repositories::ProjectRepo;
use sqlx::PgPool;

fn new_project(owner_id: i64, name: &str) -> CreateProject {
    CreateProject {
        owner_id,
        name: name.to_string(),
        description: None,
        project_type_tag: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project(1, "Alpha"))
        .await
        .unwrap();

    let found = ProjectRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.name, "Alpha");
    assert_eq!(found.owner_id, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_owner_excludes_other_owners(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project(1, "Mine")).await.unwrap();
    ProjectRepo::create(&pool, &new_project(2, "Theirs")).await.unwrap();

    let mine = ProjectRepo::list_by_owner(&pool, 1).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].name, "Mine");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_applies_only_provided_fields(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &CreateProject {
            description: Some("keep me".to_string()),
            ..new_project(1, "Alpha")
        },
    )
    .await
    .unwrap();

    let updated = ProjectRepo::update(
        &pool,
        created.id,
        &UpdateProject {
            name: Some("Beta".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.name, "Beta");
    assert_eq!(updated.description.as_deref(), Some("keep me"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_nonexistent_returns_none(pool: PgPool) {
    let result = ProjectRepo::update(
        &pool,
        9999,
        &UpdateProject {
            name: Some("Nope".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_returns_flag(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project(1, "Alpha"))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, created.id).await.unwrap());
    assert!(!ProjectRepo::delete(&pool, created.id).await.unwrap());
}
