//! `SeaORM` Entity for advisor_exchanges table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "advisor_exchanges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub task_id: Uuid,
    #[sea_orm(column_type = "Text", nullable)]
    pub plan: Option<String>,
    pub response_time_ms: i32,
    pub success_code: i32,
    pub error_message: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::advisor_tasks::Entity",
        from = "Column::TaskId",
        to = "super::advisor_tasks::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    AdvisorTasks,
}

impl Related<super::advisor_tasks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvisorTasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
