//! `SeaORM` Entity for rewards catalog table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "rewards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub cost_points: i32,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_rewards::Entity")]
    UserRewards,
}

impl Related<super::user_rewards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRewards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
