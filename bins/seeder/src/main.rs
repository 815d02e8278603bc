//! Database seeder for Sprout development and testing.
//!
//! Seeds a test user with a financial profile, sample transactions, and
//! a short check-in streak for local development. The reward catalog is
//! seeded by the initial migration.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::str::FromStr;
use uuid::Uuid;

use sprout_db::entities::{
    daily_check_ins, profiles,
    sea_orm_active_enums::{TransactionCategory, TransactionType},
    transactions, users,
};

/// Test user ID (consistent for all seeds)
const TEST_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = sprout_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding test user...");
    seed_test_user(&db).await;

    println!("Seeding financial profile...");
    seed_profile(&db).await;

    println!("Seeding sample transactions...");
    seed_transactions(&db).await;

    println!("Seeding check-in streak...");
    seed_check_ins(&db).await;

    println!("Seeding complete!");
}

fn test_user_id() -> Uuid {
    Uuid::parse_str(TEST_USER_ID).unwrap()
}

fn money(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

/// Seeds a test user for development.
async fn seed_test_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(test_user_id())
        .one(db)
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Test user already exists, skipping...");
        return;
    }

    let user = users::ActiveModel {
        id: Set(test_user_id()),
        username: Set("sprout_tester".to_string()),
        email: Set("test@sproutfin.app".to_string()),
        // Not a real credential; log in through the API after re-hashing.
        password_hash: Set("$argon2id$v=19$m=65536,t=3,p=4$test_hash".to_string()),
        total_points: Set(35),
        created_at: Set(Utc::now().into()),
    };

    user.insert(db).await.expect("Failed to seed test user");
}

/// Seeds a complete financial profile so the planner generates a full
/// 13-node chain.
async fn seed_profile(db: &DatabaseConnection) {
    let existing = profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(test_user_id()))
        .one(db)
        .await
        .ok()
        .flatten();
    if existing.is_some() {
        println!("  Profile already exists, skipping...");
        return;
    }

    let profile = profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(test_user_id()),
        age: Set(Some(28)),
        job: Set(Some("Software Engineer".to_string())),
        monthly_salary: Set(Some(money("30000000"))),
        fixed_costs: Set(serde_json::json!({
            "rent": 7000000,
            "food": 3500000,
        })),
        financial_goals: Set(serde_json::json!([
            "Build a 6-month emergency fund",
            "Save for a motorbike"
        ])),
        updated_at: Set(Utc::now().into()),
    };

    profile.insert(db).await.expect("Failed to seed profile");
}

/// Seeds one salary deposit and a few expenses.
async fn seed_transactions(db: &DatabaseConnection) {
    let samples: &[(&str, TransactionCategory, TransactionType, &str)] = &[
        (
            "30000000",
            TransactionCategory::Income,
            TransactionType::Income,
            "March salary",
        ),
        (
            "7000000",
            TransactionCategory::Bills,
            TransactionType::Expense,
            "Rent",
        ),
        (
            "450000",
            TransactionCategory::Food,
            TransactionType::Expense,
            "Groceries",
        ),
        (
            "120000",
            TransactionCategory::Transport,
            TransactionType::Expense,
            "Fuel",
        ),
    ];

    for (days_ago, (amount, category, transaction_type, note)) in samples.iter().enumerate() {
        let days_ago = i64::try_from(days_ago).unwrap_or(0);
        let transaction = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(test_user_id()),
            amount: Set(money(amount)),
            category: Set(category.clone()),
            transaction_type: Set(transaction_type.clone()),
            transaction_date: Set((Utc::now() - Duration::days(days_ago)).into()),
            description: Set(Some((*note).to_string())),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = transaction.insert(db).await {
            println!("  Skipping transaction ({e})");
        }
    }
}

/// Seeds a three-day streak ending yesterday, so the next check-in
/// continues it.
async fn seed_check_ins(db: &DatabaseConnection) {
    let today = Utc::now().date_naive();

    for (offset, streak) in [(3, 1), (2, 2), (1, 3)] {
        let Some(date) = today.checked_sub_days(chrono::Days::new(offset)) else {
            continue;
        };

        let check_in = daily_check_ins::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(test_user_id()),
            check_in_date: Set(date),
            streak_count: Set(streak),
            created_at: Set(Utc::now().into()),
        };

        if let Err(e) = check_in.insert(db).await {
            println!("  Skipping check-in for {date} ({e})");
        }
    }
}
