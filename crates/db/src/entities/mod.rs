//! `SeaORM` entity definitions.

pub mod advisor_exchanges;
pub mod advisor_tasks;
pub mod daily_check_ins;
pub mod financial_plans;
pub mod plan_nodes;
pub mod profiles;
pub mod rewards;
pub mod sea_orm_active_enums;
pub mod transactions;
pub mod user_rewards;
pub mod users;
