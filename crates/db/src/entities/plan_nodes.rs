//! `SeaORM` Entity for plan_nodes table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{NodeStatus, NodeType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plan_nodes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub parent_node_id: Option<Uuid>,
    pub position: i32,
    pub title: String,
    pub node_type: NodeType,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))", nullable)]
    pub target_amount: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub current_amount: Decimal,
    pub status: NodeStatus,
    pub metadata: Json,
    pub deadline: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::financial_plans::Entity",
        from = "Column::PlanId",
        to = "super::financial_plans::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    FinancialPlans,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentNodeId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    SelfRef,
}

impl Related<super::financial_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
