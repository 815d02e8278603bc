//! Advisor repository for generation task bookkeeping.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::{advisor_exchanges, advisor_tasks, sea_orm_active_enums::TaskStatus};

/// Input for recording one call to the generation gateway.
#[derive(Debug, Clone)]
pub struct RecordExchangeInput {
    /// Task the call belongs to.
    pub task_id: Uuid,
    /// Generated plan text, when the call succeeded.
    pub plan: Option<String>,
    /// Wall-clock duration of the call in milliseconds.
    pub response_time_ms: i32,
    /// HTTP status code the gateway answered with.
    pub success_code: i32,
    /// Error detail, when the call failed.
    pub error_message: Option<String>,
}

/// A task with its most recent exchange, if any.
#[derive(Debug, Clone)]
pub struct TaskWithLatestExchange {
    /// Task row.
    pub task: advisor_tasks::Model,
    /// Most recent exchange for the task.
    pub exchange: Option<advisor_exchanges::Model>,
}

/// Advisor repository for task and exchange persistence.
#[derive(Debug, Clone)]
pub struct AdvisorRepository {
    db: DatabaseConnection,
}

impl AdvisorRepository {
    /// Creates a new advisor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a task in `PENDING` state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_task(
        &self,
        user_id: Option<Uuid>,
    ) -> Result<advisor_tasks::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let task = advisor_tasks::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            status: Set(TaskStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        };

        task.insert(&self.db).await
    }

    /// Moves a task to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the task does not exist or the update fails.
    pub async fn set_status(
        &self,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<advisor_tasks::Model, DbErr> {
        let task = advisor_tasks::Entity::find_by_id(task_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("advisor task {task_id}")))?;

        let mut active: advisor_tasks::ActiveModel = task.into();
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await
    }

    /// Records the outcome of one gateway call.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn record_exchange(
        &self,
        input: RecordExchangeInput,
    ) -> Result<advisor_exchanges::Model, DbErr> {
        let exchange = advisor_exchanges::ActiveModel {
            id: Set(Uuid::new_v4()),
            task_id: Set(input.task_id),
            plan: Set(input.plan),
            response_time_ms: Set(input.response_time_ms),
            success_code: Set(input.success_code),
            error_message: Set(input.error_message),
            created_at: Set(chrono::Utc::now().into()),
        };

        exchange.insert(&self.db).await
    }

    /// Finds a task together with its most recent exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_task(
        &self,
        task_id: Uuid,
    ) -> Result<Option<TaskWithLatestExchange>, DbErr> {
        let Some(task) = advisor_tasks::Entity::find_by_id(task_id).one(&self.db).await? else {
            return Ok(None);
        };

        let exchange = advisor_exchanges::Entity::find()
            .filter(advisor_exchanges::Column::TaskId.eq(task_id))
            .order_by_desc(advisor_exchanges::Column::CreatedAt)
            .one(&self.db)
            .await?;

        Ok(Some(TaskWithLatestExchange { task, exchange }))
    }
}
