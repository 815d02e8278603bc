//! Integration tests for the plan repository.
//!
//! These tests need a live Postgres with migrations applied; they skip
//! when `DATABASE_URL` is not set.

use rust_decimal_macros::dec;
use sea_orm::{Database, DatabaseConnection};
use sprout_core::planner::{PlanGenerator, ProfileSnapshot};
use sprout_db::entities::sea_orm_active_enums::{NodeStatus, NodeType, PlanStatus};
use sprout_db::repositories::UpdateNodeInput;
use sprout_db::{PlanRepository, UserRepository};
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

fn healthy_snapshot() -> ProfileSnapshot {
    ProfileSnapshot {
        monthly_salary: Some(dec!(30000000)),
        fixed_costs: [
            ("rent".to_string(), dec!(7000000)),
            ("food".to_string(), dec!(3500000)),
        ]
        .into_iter()
        .collect(),
    }
}

#[tokio::test]
async fn test_replace_active_plan_persists_chain() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = PlanRepository::new(db);

    let generated = PlanGenerator::generate(&healthy_snapshot(), chrono::Utc::now());
    let stored = repo
        .replace_active_plan(user_id, "My Savings Plan", &generated)
        .await
        .expect("store plan");

    assert_eq!(stored.plan.status, PlanStatus::Active);
    assert_eq!(stored.nodes.len(), 13);

    // First node has no parent, every later node points at its predecessor.
    assert!(stored.nodes[0].parent_node_id.is_none());
    for pair in stored.nodes.windows(2) {
        if pair[1].node_type == NodeType::Action {
            assert_eq!(pair[1].parent_node_id, Some(pair[0].id));
        }
    }

    // Positions record chain order explicitly.
    for (index, node) in stored.nodes.iter().enumerate() {
        assert_eq!(node.position, i32::try_from(index).expect("position"));
    }

    assert_eq!(stored.nodes[12].node_type, NodeType::Milestone);
}

#[tokio::test]
async fn test_replace_active_plan_archives_previous() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = PlanRepository::new(db);
    let generated = PlanGenerator::generate(&healthy_snapshot(), chrono::Utc::now());

    let first = repo
        .replace_active_plan(user_id, "First Plan", &generated)
        .await
        .expect("store plan");
    let second = repo
        .replace_active_plan(user_id, "Second Plan", &generated)
        .await
        .expect("store plan");

    let active = repo
        .find_active(user_id)
        .await
        .expect("query")
        .expect("active plan exists");
    assert_eq!(active.id, second.plan.id);

    let old = repo
        .find_with_nodes(user_id, first.plan.id)
        .await
        .expect("old plan still readable");
    assert_eq!(old.plan.status, PlanStatus::Archived);
}

#[tokio::test]
async fn test_regenerate_replaces_nodes_in_place() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = PlanRepository::new(db);
    let generated = PlanGenerator::generate(&healthy_snapshot(), chrono::Utc::now());

    let first = repo
        .replace_active_plan(user_id, "My Savings Plan", &generated)
        .await
        .expect("store plan");
    let old_ids: Vec<Uuid> = first.nodes.iter().map(|n| n.id).collect();

    let second = repo
        .regenerate(user_id, first.plan.id, &generated)
        .await
        .expect("regenerate");

    // Same plan row, fresh nodes, nothing from the first batch left over.
    assert_eq!(second.plan.id, first.plan.id);
    assert_eq!(second.nodes.len(), 13);
    for node in &second.nodes {
        assert!(!old_ids.contains(&node.id));
    }

    let reread = repo
        .find_with_nodes(user_id, first.plan.id)
        .await
        .expect("reread");
    assert_eq!(reread.nodes.len(), 13);
}

#[tokio::test]
async fn test_regenerate_rejects_other_users() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let owner = create_test_user(&db).await;
    let intruder = create_test_user(&db).await;
    let repo = PlanRepository::new(db);
    let generated = PlanGenerator::generate(&healthy_snapshot(), chrono::Utc::now());

    let stored = repo
        .replace_active_plan(owner, "My Savings Plan", &generated)
        .await
        .expect("store plan");

    let result = repo.regenerate(intruder, stored.plan.id, &generated).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_node_progress() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let user_id = create_test_user(&db).await;
    let repo = PlanRepository::new(db);

    let generated = PlanGenerator::generate(&healthy_snapshot(), chrono::Utc::now());
    let stored = repo
        .replace_active_plan(user_id, "My Savings Plan", &generated)
        .await
        .expect("store plan");

    let node_id = stored.nodes[0].id;
    let updated = repo
        .update_node(
            user_id,
            node_id,
            UpdateNodeInput {
                status: Some(NodeStatus::Completed),
                current_amount: Some(dec!(13650000)),
            },
        )
        .await
        .expect("update node");

    assert_eq!(updated.status, NodeStatus::Completed);
    assert_eq!(updated.current_amount, dec!(13650000));
}

#[tokio::test]
async fn test_update_node_rejects_other_users() {
    let Some(db) = connect_or_skip().await else {
        return;
    };

    let owner = create_test_user(&db).await;
    let intruder = create_test_user(&db).await;
    let repo = PlanRepository::new(db);

    let generated = PlanGenerator::generate(&healthy_snapshot(), chrono::Utc::now());
    let stored = repo
        .replace_active_plan(owner, "My Savings Plan", &generated)
        .await
        .expect("store plan");

    let result = repo
        .update_node(
            intruder,
            stored.nodes[0].id,
            UpdateNodeInput {
                status: Some(NodeStatus::Completed),
                current_amount: None,
            },
        )
        .await;

    assert!(result.is_err());
}
