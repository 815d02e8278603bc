//! Integration tests for the user repository.
//!
//! These tests need a live Postgres with migrations applied; they skip
//! when `DATABASE_URL` is not set.

use sea_orm::{Database, DatabaseConnection};
use sprout_db::UserRepository;
use uuid::Uuid;

/// Connect to the test database, or skip the test when none is configured.
async fn connect_or_skip() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

fn unique_user() -> (String, String) {
    let tag = Uuid::new_v4();
    (format!("user-{tag}"), format!("test-{tag}@example.com"))
}

#[tokio::test]
async fn test_user_create_and_find_by_id() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let repo = UserRepository::new(db);
    let (username, email) = unique_user();

    let user = repo
        .create(&username, &email, "$argon2id$test_hash")
        .await
        .expect("Failed to create user");

    assert_eq!(user.username, username);
    assert_eq!(user.email, email);
    assert_eq!(user.total_points, 0);

    let found = repo
        .find_by_id(user.id)
        .await
        .expect("Failed to find user")
        .expect("User should exist");

    assert_eq!(found.id, user.id);
}

#[tokio::test]
async fn test_user_find_by_username() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let repo = UserRepository::new(db);
    let (username, email) = unique_user();

    let user = repo
        .create(&username, &email, "$argon2id$test_hash")
        .await
        .expect("Failed to create user");

    let found = repo
        .find_by_username(&username)
        .await
        .expect("Failed to find user")
        .expect("User should exist");

    assert_eq!(found.id, user.id);
}

#[tokio::test]
async fn test_user_username_and_email_exists() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let repo = UserRepository::new(db);
    let (username, email) = unique_user();

    assert!(!repo.username_exists(&username).await.expect("query"));
    assert!(!repo.email_exists(&email).await.expect("query"));

    repo.create(&username, &email, "$argon2id$test_hash")
        .await
        .expect("Failed to create user");

    assert!(repo.username_exists(&username).await.expect("query"));
    assert!(repo.email_exists(&email).await.expect("query"));
}

#[tokio::test]
async fn test_add_points_accumulates() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let repo = UserRepository::new(db);
    let (username, email) = unique_user();

    let user = repo
        .create(&username, &email, "$argon2id$test_hash")
        .await
        .expect("Failed to create user");

    let total = repo.add_points(user.id, 10).await.expect("add points");
    assert_eq!(total, 10);

    let total = repo.add_points(user.id, 15).await.expect("add points");
    assert_eq!(total, 25);
}

#[tokio::test]
async fn test_add_points_unknown_user() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let repo = UserRepository::new(db);
    let result = repo.add_points(Uuid::new_v4(), 10).await;
    assert!(result.is_err());
}
