//! `SeaORM` active enums mapping Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction direction.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money coming in.
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// Transaction category.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_category")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionCategory {
    /// Meals and groceries.
    #[sea_orm(string_value = "FOOD")]
    Food,
    /// Commuting and travel.
    #[sea_orm(string_value = "TRANSPORT")]
    Transport,
    /// General shopping.
    #[sea_orm(string_value = "SHOPPING")]
    Shopping,
    /// Leisure spending.
    #[sea_orm(string_value = "ENTERTAINMENT")]
    Entertainment,
    /// Recurring bills.
    #[sea_orm(string_value = "BILLS")]
    Bills,
    /// Medical spending.
    #[sea_orm(string_value = "HEALTHCARE")]
    Healthcare,
    /// Courses and tuition.
    #[sea_orm(string_value = "EDUCATION")]
    Education,
    /// Salary and other income.
    #[sea_orm(string_value = "INCOME")]
    Income,
    /// Transfers into savings.
    #[sea_orm(string_value = "SAVINGS")]
    Savings,
    /// Everything else.
    #[sea_orm(string_value = "OTHER")]
    Other,
}

/// Financial plan lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "plan_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    /// The user's current plan.
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Kept for history.
    #[sea_orm(string_value = "ARCHIVED")]
    Archived,
}

/// Plan node type.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "node_type")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// A concrete step.
    #[sea_orm(string_value = "ACTION")]
    Action,
    /// A budget correction.
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
    /// A long-horizon target.
    #[sea_orm(string_value = "MILESTONE")]
    Milestone,
}

/// Plan node progress status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "node_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    /// Not started or in progress.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// Target reached.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// Deliberately skipped.
    #[sea_orm(string_value = "SKIPPED")]
    Skipped,
}

/// Advisor task status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Stored, not yet picked up.
    #[sea_orm(string_value = "PENDING")]
    Pending,
    /// The generation call is in flight.
    #[sea_orm(string_value = "PROCESSING")]
    Processing,
    /// A plan was generated.
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    /// The generation call failed.
    #[sea_orm(string_value = "FAILED")]
    Failed,
}

impl From<crate::entities::sea_orm_active_enums::NodeType> for sprout_core::planner::NodeType {
    fn from(value: NodeType) -> Self {
        match value {
            NodeType::Action => Self::Action,
            NodeType::Adjustment => Self::Adjustment,
            NodeType::Milestone => Self::Milestone,
        }
    }
}

impl From<sprout_core::planner::NodeType> for NodeType {
    fn from(value: sprout_core::planner::NodeType) -> Self {
        match value {
            sprout_core::planner::NodeType::Action => Self::Action,
            sprout_core::planner::NodeType::Adjustment => Self::Adjustment,
            sprout_core::planner::NodeType::Milestone => Self::Milestone,
        }
    }
}

impl From<TaskStatus> for sprout_core::advisor::TaskStatus {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Pending => Self::Pending,
            TaskStatus::Processing => Self::Processing,
            TaskStatus::Completed => Self::Completed,
            TaskStatus::Failed => Self::Failed,
        }
    }
}
