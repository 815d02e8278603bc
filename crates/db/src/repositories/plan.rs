//! Plan repository for financial plan and node database operations.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use sprout_core::planner::GeneratedNode;
use uuid::Uuid;

use crate::entities::{
    financial_plans, plan_nodes,
    sea_orm_active_enums::{NodeStatus, PlanStatus},
};

/// Error types for plan operations.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Plan not found.
    #[error("Plan not found: {0}")]
    NotFound(Uuid),

    /// Plan node not found.
    #[error("Plan node not found: {0}")]
    NodeNotFound(Uuid),

    /// A generated node referenced a parent index outside the batch.
    #[error("Invalid parent index {parent} for node {index}")]
    InvalidParentIndex {
        /// Index of the offending node in the batch.
        index: usize,
        /// The out-of-range parent index it carried.
        parent: usize,
    },

    /// Node metadata could not be serialized.
    #[error("Metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// A plan together with its nodes in chain order.
#[derive(Debug, Clone)]
pub struct PlanWithNodes {
    /// Plan header.
    pub plan: financial_plans::Model,
    /// Nodes ordered by position.
    pub nodes: Vec<plan_nodes::Model>,
}

/// Input for updating a plan node's progress.
#[derive(Debug, Clone, Default)]
pub struct UpdateNodeInput {
    /// New status.
    pub status: Option<NodeStatus>,
    /// New saved amount.
    pub current_amount: Option<Decimal>,
}

/// Plan repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct PlanRepository {
    db: DatabaseConnection,
}

impl PlanRepository {
    /// Creates a new plan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user's active plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(
        &self,
        user_id: Uuid,
    ) -> Result<Option<financial_plans::Model>, DbErr> {
        financial_plans::Entity::find()
            .filter(financial_plans::Column::UserId.eq(user_id))
            .filter(financial_plans::Column::Status.eq(PlanStatus::Active))
            .one(&self.db)
            .await
    }

    /// Lists all plans for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn plans_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<financial_plans::Model>, DbErr> {
        financial_plans::Entity::find()
            .filter(financial_plans::Column::UserId.eq(user_id))
            .order_by_desc(financial_plans::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a plan by ID, scoped to its owner, with nodes in chain order.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NotFound`] if no such plan exists for the user.
    pub async fn find_with_nodes(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
    ) -> Result<PlanWithNodes, PlanError> {
        let plan = financial_plans::Entity::find_by_id(plan_id)
            .filter(financial_plans::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(PlanError::NotFound(plan_id))?;

        let nodes = plan_nodes::Entity::find()
            .filter(plan_nodes::Column::PlanId.eq(plan.id))
            .order_by_asc(plan_nodes::Column::Position)
            .all(&self.db)
            .await?;

        Ok(PlanWithNodes { plan, nodes })
    }

    /// Stores a generated batch as a new active plan, archiving any
    /// previous active plan for the user in the same transaction.
    ///
    /// Batch-relative parent indices are resolved to row ids as nodes are
    /// inserted in order; `position` records the chain order explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent index is out of range (generator bug)
    /// or the database operation fails.
    pub async fn replace_active_plan(
        &self,
        user_id: Uuid,
        name: &str,
        generated: &[GeneratedNode],
    ) -> Result<PlanWithNodes, PlanError> {
        let txn = self.db.begin().await?;

        financial_plans::Entity::update_many()
            .col_expr(
                financial_plans::Column::Status,
                PlanStatus::Archived.as_enum(),
            )
            .filter(financial_plans::Column::UserId.eq(user_id))
            .filter(financial_plans::Column::Status.eq(PlanStatus::Active))
            .exec(&txn)
            .await?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let plan = financial_plans::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(name.to_string()),
            status: Set(PlanStatus::Active),
            created_at: Set(now),
        };
        let plan = plan.insert(&txn).await?;

        let nodes = Self::insert_nodes(&txn, plan.id, generated, now).await?;

        txn.commit().await?;

        Ok(PlanWithNodes { plan, nodes })
    }

    /// Replaces all nodes of an existing plan with a freshly generated
    /// batch, in one transaction.
    ///
    /// The old nodes are deleted outright; the plan row itself is kept so
    /// its id stays stable across regenerations.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NotFound`] if the plan does not exist or
    /// belongs to another user.
    pub async fn regenerate(
        &self,
        user_id: Uuid,
        plan_id: Uuid,
        generated: &[GeneratedNode],
    ) -> Result<PlanWithNodes, PlanError> {
        let txn = self.db.begin().await?;

        let plan = financial_plans::Entity::find_by_id(plan_id)
            .filter(financial_plans::Column::UserId.eq(user_id))
            .one(&txn)
            .await?
            .ok_or(PlanError::NotFound(plan_id))?;

        plan_nodes::Entity::delete_many()
            .filter(plan_nodes::Column::PlanId.eq(plan.id))
            .exec(&txn)
            .await?;

        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let nodes = Self::insert_nodes(&txn, plan.id, generated, now).await?;

        txn.commit().await?;

        Ok(PlanWithNodes { plan, nodes })
    }

    /// Finds a single node, scoped to the owner of its plan.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NodeNotFound`] if the node does not exist or
    /// belongs to another user's plan.
    pub async fn find_node(
        &self,
        user_id: Uuid,
        node_id: Uuid,
    ) -> Result<plan_nodes::Model, PlanError> {
        let found = plan_nodes::Entity::find_by_id(node_id)
            .find_also_related(financial_plans::Entity)
            .one(&self.db)
            .await?;

        match found {
            Some((node, Some(plan))) if plan.user_id == user_id => Ok(node),
            _ => Err(PlanError::NodeNotFound(node_id)),
        }
    }

    /// Applies a progress update to a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not belong to the user or the
    /// update fails.
    pub async fn update_node(
        &self,
        user_id: Uuid,
        node_id: Uuid,
        input: UpdateNodeInput,
    ) -> Result<plan_nodes::Model, PlanError> {
        let node = self.find_node(user_id, node_id).await?;

        let mut active: plan_nodes::ActiveModel = node.into();
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(amount) = input.current_amount {
            active.current_amount = Set(amount);
        }

        Ok(active.update(&self.db).await?)
    }

    async fn insert_nodes(
        txn: &DatabaseTransaction,
        plan_id: Uuid,
        generated: &[GeneratedNode],
        now: sea_orm::prelude::DateTimeWithTimeZone,
    ) -> Result<Vec<plan_nodes::Model>, PlanError> {
        let mut inserted: Vec<plan_nodes::Model> = Vec::with_capacity(generated.len());

        for (index, node) in generated.iter().enumerate() {
            let parent_node_id = match node.parent {
                Some(parent) => Some(
                    inserted
                        .get(parent)
                        .map(|row| row.id)
                        .ok_or(PlanError::InvalidParentIndex { index, parent })?,
                ),
                None => None,
            };

            let position = i32::try_from(index)
                .map_err(|_| PlanError::InvalidParentIndex { index, parent: index })?;

            let row = plan_nodes::ActiveModel {
                id: Set(Uuid::new_v4()),
                plan_id: Set(plan_id),
                parent_node_id: Set(parent_node_id),
                position: Set(position),
                title: Set(node.title.clone()),
                node_type: Set(node.node_type.into()),
                target_amount: Set(Some(node.target_amount)),
                current_amount: Set(Decimal::ZERO),
                status: Set(NodeStatus::Pending),
                metadata: Set(serde_json::to_value(&node.metadata)?),
                deadline: Set(node.deadline.map(Into::into)),
                created_at: Set(now),
            };

            inserted.push(row.insert(txn).await?);
        }

        Ok(inserted)
    }
}
