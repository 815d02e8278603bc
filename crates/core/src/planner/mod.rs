//! Savings plan generation from a financial profile.

pub mod generator;
pub mod types;


pub use generator::{
    DAYS_PER_MONTH, MILESTONE_HORIZON_DAYS, PLAN_HORIZON_MONTHS, PlanGenerator, SAVINGS_RATIO,
};
pub use types::{GeneratedNode, NodeMetadata, NodeStatus, NodeType, PlanStatus, ProfileSnapshot};
