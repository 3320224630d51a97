use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};
use uuid::Uuid;

use inkwell_core::domain::{Post, PostDraft};
use inkwell_core::error::RepoError;
use inkwell_core::ports::{ChangeTracker, DataContext, DataStore};

use super::entity::post;
use super::postgres::PostgresPostStore;

fn model(url: &str, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        url: url.to_owned(),
        title: title.to_owned(),
        description: Some("Summary".to_owned()),
        content: "Content".to_owned(),
        author: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_url() {
    let row = model("hello-world", "Hello");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row.clone()]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    let found = ctx.posts().get_post_by_url("hello-world").await.unwrap();

    let post = found.expect("post should be found");
    assert_eq!(post.id, row.id);
    assert_eq!(post.url, "hello-world");
    assert_eq!(post.description.as_deref(), Some("Summary"));
}

#[tokio::test]
async fn test_find_missing_post_by_url() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    assert!(ctx.posts().get_post_by_url("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_posts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model("a", "A"), model("b", "B")]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    let posts = ctx.posts().get_all_posts().await.unwrap();
    let urls: Vec<&str> = posts.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec!["a", "b"]);
}

#[tokio::test]
async fn test_save_without_changes_touches_nothing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    assert_eq!(ctx.save().await.unwrap(), 0);
}

fn draft_post(url: &str) -> Post {
    Post::new(PostDraft {
        url: url.to_string(),
        title: "Title".to_string(),
        description: None,
        content: String::new(),
        author: None,
    })
}

#[tokio::test]
async fn test_create_commits_staged_post() {
    let row = model("fresh", "Fresh");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![row.clone()]])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    ctx.posts().create(row.into()).await.unwrap();

    assert_eq!(ctx.save().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_with_taken_url_is_constraint() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors(vec![DbErr::Custom(
            "duplicate key value violates unique constraint \"posts_url_key\"".to_owned(),
        )])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    ctx.posts().create(draft_post("taken")).await.unwrap();

    assert!(matches!(ctx.save().await, Err(RepoError::Constraint(_))));
}

#[tokio::test]
async fn test_update_of_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    ctx.posts().update(draft_post("ghost")).await.unwrap();

    assert!(matches!(ctx.save().await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_of_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let store = PostgresPostStore::new(db);
    let ctx = store.open().await.unwrap();

    ctx.posts().delete(draft_post("ghost")).await.unwrap();

    assert!(matches!(ctx.save().await, Err(RepoError::NotFound)));
}
