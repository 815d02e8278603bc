//! `SeaORM` Entity for advisor_tasks table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TaskStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "advisor_tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub status: TaskStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::advisor_exchanges::Entity")]
    AdvisorExchanges,
}

impl Related<super::advisor_exchanges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AdvisorExchanges.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
