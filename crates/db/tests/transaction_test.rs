//! Integration tests for the transaction repository.
//!
//! These tests need a live Postgres with migrations applied; they skip
//! when `DATABASE_URL` is not set.

use chrono::Utc;
use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};
use sprout_db::repositories::{CreateTransactionInput, TransactionFilter};
use sprout_db::{TransactionRepository, UserRepository};
use sprout_db::entities::sea_orm_active_enums::{TransactionCategory, TransactionType};
use sprout_shared::types::PageRequest;
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

fn input(
    user_id: Uuid,
    amount: rust_decimal::Decimal,
    category: TransactionCategory,
    transaction_type: TransactionType,
) -> CreateTransactionInput {
    CreateTransactionInput {
        user_id,
        amount,
        category,
        transaction_type,
        transaction_date: Utc::now(),
        description: None,
    }
}

#[tokio::test]
async fn test_create_and_list() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = TransactionRepository::new(db);

    repo.create(input(
        user_id,
        dec!(50000),
        TransactionCategory::Food,
        TransactionType::Expense,
    ))
    .await
    .expect("create");

    let (rows, total) = repo
        .list(user_id, &TransactionFilter::default(), PageRequest::default())
        .await
        .expect("list");

    assert_eq!(total, 1);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(50000));
}

#[tokio::test]
async fn test_list_filters_by_type() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = TransactionRepository::new(db);

    repo.create(input(
        user_id,
        dec!(5000000),
        TransactionCategory::Income,
        TransactionType::Income,
    ))
    .await
    .expect("create");
    repo.create(input(
        user_id,
        dec!(75000),
        TransactionCategory::Transport,
        TransactionType::Expense,
    ))
    .await
    .expect("create");

    let filter = TransactionFilter {
        transaction_type: Some(TransactionType::Expense),
        ..TransactionFilter::default()
    };
    let (rows, total) = repo
        .list(user_id, &filter, PageRequest::default())
        .await
        .expect("list");

    assert_eq!(total, 1);
    assert_eq!(rows[0].transaction_type, TransactionType::Expense);
}

#[tokio::test]
async fn test_summary_totals_and_breakdown() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = TransactionRepository::new(db);

    repo.create(input(
        user_id,
        dec!(5000000),
        TransactionCategory::Income,
        TransactionType::Income,
    ))
    .await
    .expect("create");
    repo.create(input(
        user_id,
        dec!(300000),
        TransactionCategory::Food,
        TransactionType::Expense,
    ))
    .await
    .expect("create");
    repo.create(input(
        user_id,
        dec!(200000),
        TransactionCategory::Food,
        TransactionType::Expense,
    ))
    .await
    .expect("create");

    let summary = repo.summary(user_id, None, None).await.expect("summary");

    assert_eq!(summary.total_income, dec!(5000000));
    assert_eq!(summary.total_expense, dec!(500000));
    assert_eq!(summary.net, dec!(4500000));
    assert_eq!(
        summary.expense_by_category,
        vec![(TransactionCategory::Food, dec!(500000))]
    );
}

#[tokio::test]
async fn test_find_for_user_scopes_by_owner() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let owner = create_test_user(&db).await;
    let other = create_test_user(&db).await;
    let repo = TransactionRepository::new(db);

    let created = repo
        .create(input(
            owner,
            dec!(10000),
            TransactionCategory::Other,
            TransactionType::Expense,
        ))
        .await
        .expect("create");

    assert!(repo
        .find_for_user(owner, created.id)
        .await
        .expect("query")
        .is_some());
    assert!(repo
        .find_for_user(other, created.id)
        .await
        .expect("query")
        .is_none());
}
