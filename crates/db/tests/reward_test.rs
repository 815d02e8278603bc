//! Integration tests for the reward repository.
//!
//! These tests need a live Postgres with migrations applied (the initial
//! migration seeds the reward catalog); they skip when `DATABASE_URL` is
//! not set.

use sea_orm::{Database, DatabaseConnection};
use sprout_db::repositories::RewardError;
use sprout_db::{RewardRepository, UserRepository};
use uuid::Uuid;

async fn connect_or_skip() -> Option<DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(
        Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

async fn create_test_user(db: &DatabaseConnection) -> Uuid {
    let tag = Uuid::new_v4();
    UserRepository::new(db.clone())
        .create(
            &format!("user-{tag}"),
            &format!("test-{tag}@example.com"),
            "$argon2id$test_hash",
        )
        .await
        .expect("Failed to create user")
        .id
}

#[tokio::test]
async fn test_catalog_is_seeded() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let rewards = RewardRepository::new(db).list().await.expect("list");
    assert!(!rewards.is_empty());

    // Cheapest first.
    for pair in rewards.windows(2) {
        assert!(pair[0].cost_points <= pair[1].cost_points);
    }
}

#[tokio::test]
async fn test_redeem_deducts_points() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let users = UserRepository::new(db.clone());
    let repo = RewardRepository::new(db);

    let reward = repo.list().await.expect("list").remove(0);
    users
        .add_points(user_id, reward.cost_points + 30)
        .await
        .expect("add points");

    let (claim, remaining) = repo.redeem(user_id, reward.id).await.expect("redeem");

    assert_eq!(claim.reward_id, reward.id);
    assert_eq!(remaining, 30);
}

#[tokio::test]
async fn test_redeem_insufficient_points() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = RewardRepository::new(db);

    let reward = repo.list().await.expect("list").remove(0);
    let result = repo.redeem(user_id, reward.id).await;

    assert!(matches!(
        result,
        Err(RewardError::InsufficientPoints { available: 0, .. })
    ));
}

#[tokio::test]
async fn test_redeem_unknown_reward() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = RewardRepository::new(db);

    let missing = Uuid::new_v4();
    let result = repo.redeem(user_id, missing).await;
    assert!(matches!(result, Err(RewardError::NotFound(id)) if id == missing));
}
