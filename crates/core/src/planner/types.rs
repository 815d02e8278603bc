//! Planner data types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Plan node type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// A concrete step the user should take.
    Action,
    /// A correction the user must make before saving is possible.
    Adjustment,
    /// A long-horizon target the action chain leads to.
    Milestone,
}

/// Plan node progress status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeStatus {
    /// Not started or in progress.
    Pending,
    /// Target reached.
    Completed,
    /// Deliberately skipped by the user.
    Skipped,
}

/// Financial plan lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    /// The user's current plan.
    Active,
    /// Kept for history, no longer updated.
    Archived,
}

/// The slice of a user profile the generator reads: one salary value and
/// the fixed-cost mapping, snapshotted at generation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    /// Monthly salary. Absent means the profile is incomplete.
    pub monthly_salary: Option<Decimal>,
    /// Fixed monthly costs by label (rent, food, ...).
    pub fixed_costs: BTreeMap<String, Decimal>,
}

impl ProfileSnapshot {
    /// Sum of all fixed costs (zero when the mapping is empty).
    #[must_use]
    pub fn total_fixed_costs(&self) -> Decimal {
        self.fixed_costs.values().copied().sum()
    }
}

/// Structured metadata attached to a generated node, keyed by node kind.
///
/// Stored as JSON; the `custom` variant is the free-form escape hatch for
/// data this enum does not model yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeMetadata {
    /// The profile is missing salary/fixed costs; nothing to plan yet.
    IncompleteProfile {
        /// Human-readable instruction for the user.
        message: String,
    },
    /// Fixed costs meet or exceed salary; saving is not possible yet.
    BudgetDeficit {
        /// Monthly salary at generation time.
        salary: Decimal,
        /// Sum of fixed costs at generation time.
        fixed_costs: Decimal,
        /// How far costs exceed salary (absolute value).
        deficit: Decimal,
    },
    /// One month of the generated savings chain.
    MonthlySaving {
        /// 1-based month index.
        month: u32,
        /// Savings capacity the targets were derived from.
        savings_capacity: Decimal,
        /// Suggested share of capacity to save, in percent.
        suggested_percent: u32,
        /// The remaining share left flexible (not enforced).
        flexible_amount: Decimal,
    },
    /// The year-end milestone closing the chain.
    AnnualMilestone {
        /// Number of monthly nodes the milestone summarizes.
        total_months: u32,
        /// Estimated total savings after all months.
        estimated_savings: Decimal,
    },
    /// Free-form metadata for forward compatibility.
    Custom {
        /// Arbitrary payload.
        data: serde_json::Value,
    },
}

/// A plan node produced by the generator, before persistence.
///
/// Nodes are identified positionally: `parent` is the index of the
/// predecessor within the generated batch, resolved to a row id when the
/// batch is stored. This keeps the generator pure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedNode {
    /// Human-readable title.
    pub title: String,
    /// Node classification.
    pub node_type: NodeType,
    /// Target amount (always >= 0 for generated nodes).
    pub target_amount: Decimal,
    /// Index of the predecessor node in this batch, if any.
    pub parent: Option<usize>,
    /// Deadline, when the node has one.
    pub deadline: Option<DateTime<Utc>>,
    /// Structured metadata.
    pub metadata: NodeMetadata,
}
