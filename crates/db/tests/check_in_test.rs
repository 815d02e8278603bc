//! Integration tests for the check-in repository.
//!
//! These tests need a live Postgres with migrations applied; they skip
//! when `DATABASE_URL` is not set.

use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};
use sprout_db::repositories::CheckInError;
use sprout_db::{CheckInRepository, UserRepository};
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

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn test_record_check_in_awards_points() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = CheckInRepository::new(db);

    let (check_in, total) = repo
        .record_check_in(user_id, date(2026, 3, 1), 1, 10)
        .await
        .expect("Failed to record check-in");

    assert_eq!(check_in.streak_count, 1);
    assert_eq!(check_in.check_in_date, date(2026, 3, 1));
    assert_eq!(total, 10);
}

#[tokio::test]
async fn test_duplicate_check_in_rejected() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = CheckInRepository::new(db);
    let today = date(2026, 3, 2);

    repo.record_check_in(user_id, today, 1, 10)
        .await
        .expect("First check-in should succeed");

    let result = repo.record_check_in(user_id, today, 2, 10).await;
    assert!(matches!(
        result,
        Err(CheckInError::AlreadyCheckedIn(d)) if d == today
    ));
}

#[tokio::test]
async fn test_duplicate_check_in_does_not_award_points() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = CheckInRepository::new(db.clone());
    let today = date(2026, 3, 3);

    let (_, total) = repo
        .record_check_in(user_id, today, 1, 10)
        .await
        .expect("First check-in should succeed");
    assert_eq!(total, 10);

    let _ = repo.record_check_in(user_id, today, 2, 10).await;

    let user = UserRepository::new(db)
        .find_by_id(user_id)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(user.total_points, 10);
}

#[tokio::test]
async fn test_find_latest_returns_most_recent() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = CheckInRepository::new(db);

    repo.record_check_in(user_id, date(2026, 3, 4), 1, 10)
        .await
        .expect("check-in");
    repo.record_check_in(user_id, date(2026, 3, 5), 2, 10)
        .await
        .expect("check-in");

    let latest = repo
        .find_latest(user_id)
        .await
        .expect("query")
        .expect("check-in exists");

    assert_eq!(latest.check_in_date, date(2026, 3, 5));
    assert_eq!(latest.streak_count, 2);
}

#[tokio::test]
async fn test_concurrent_check_ins_single_winner() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let today = date(2026, 3, 6);

    let mut handles = Vec::new();
    for _ in 0..5 {
        let repo = CheckInRepository::new(db.clone());
        handles.push(tokio::spawn(async move {
            repo.record_check_in(user_id, today, 1, 10).await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.expect("task").is_ok() {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);

    let user = UserRepository::new(db)
        .find_by_id(user_id)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(user.total_points, 10);
}
