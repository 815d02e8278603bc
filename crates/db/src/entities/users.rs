//! `SeaORM` Entity for users table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub total_points: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::profiles::Entity")]
    Profiles,
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
    #[sea_orm(has_many = "super::daily_check_ins::Entity")]
    DailyCheckIns,
    #[sea_orm(has_many = "super::financial_plans::Entity")]
    FinancialPlans,
    #[sea_orm(has_many = "super::user_rewards::Entity")]
    UserRewards,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::daily_check_ins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyCheckIns.def()
    }
}

impl Related<super::financial_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinancialPlans.def()
    }
}

impl Related<super::user_rewards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRewards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
