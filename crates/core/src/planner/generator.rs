//! Rule-based savings plan generation.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::types::{GeneratedNode, NodeMetadata, NodeType, ProfileSnapshot};

/// Share of savings capacity suggested for saving each month.
pub const SAVINGS_RATIO: Decimal = Decimal::from_parts(7, 0, 0, false, 1); // 0.7

/// Number of monthly nodes in a generated plan.
pub const PLAN_HORIZON_MONTHS: u32 = 12;

/// Flat month approximation used for monthly deadlines.
pub const DAYS_PER_MONTH: i64 = 30;

/// Deadline horizon of the closing milestone node.
pub const MILESTONE_HORIZON_DAYS: i64 = 365;

const SUGGESTED_PERCENT: u32 = 70;

/// Expands a profile snapshot into an ordered chain of plan nodes.
pub struct PlanGenerator;

impl PlanGenerator {
    /// Generates the node chain for a profile, evaluated at `now`.
    ///
    /// The result is never empty: an incomplete profile yields a single
    /// ACTION placeholder, a non-positive savings capacity yields a
    /// single ADJUSTMENT node, and a positive capacity yields twelve
    /// monthly ACTION nodes followed by one MILESTONE. Neither degraded
    /// case is an error — an unfilled profile is a normal outcome.
    ///
    /// All amounts derive from the single snapshot; the generator never
    /// re-reads state between nodes.
    #[must_use]
    pub fn generate(profile: &ProfileSnapshot, now: DateTime<Utc>) -> Vec<GeneratedNode> {
        let Some(salary) = profile.monthly_salary else {
            return vec![Self::incomplete_profile_node()];
        };

        let total_fixed_costs = profile.total_fixed_costs();
        let savings_capacity = salary - total_fixed_costs;

        if savings_capacity <= Decimal::ZERO {
            return vec![Self::deficit_node(salary, total_fixed_costs, savings_capacity)];
        }

        Self::monthly_chain(savings_capacity, now)
    }

    fn incomplete_profile_node() -> GeneratedNode {
        GeneratedNode {
            title: "Complete your financial profile".to_string(),
            node_type: NodeType::Action,
            target_amount: Decimal::ZERO,
            parent: None,
            deadline: None,
            metadata: NodeMetadata::IncompleteProfile {
                message: "Please provide your salary and fixed costs".to_string(),
            },
        }
    }

    fn deficit_node(
        salary: Decimal,
        total_fixed_costs: Decimal,
        savings_capacity: Decimal,
    ) -> GeneratedNode {
        GeneratedNode {
            title: "Rebalance your budget".to_string(),
            node_type: NodeType::Adjustment,
            target_amount: Decimal::ZERO,
            parent: None,
            deadline: None,
            metadata: NodeMetadata::BudgetDeficit {
                salary,
                fixed_costs: total_fixed_costs,
                deficit: savings_capacity.abs(),
            },
        }
    }

    fn monthly_chain(savings_capacity: Decimal, now: DateTime<Utc>) -> Vec<GeneratedNode> {
        let monthly_target = savings_capacity * SAVINGS_RATIO;
        let flexible_amount = savings_capacity - monthly_target;

        let mut nodes = Vec::with_capacity(PLAN_HORIZON_MONTHS as usize + 1);

        for month in 1..=PLAN_HORIZON_MONTHS {
            nodes.push(GeneratedNode {
                title: format!("Month {month} savings"),
                node_type: NodeType::Action,
                target_amount: monthly_target,
                // Strict linear chain: month 1 has no parent.
                parent: (month > 1).then(|| month as usize - 2),
                deadline: Some(now + Duration::days(DAYS_PER_MONTH * i64::from(month))),
                metadata: NodeMetadata::MonthlySaving {
                    month,
                    savings_capacity,
                    suggested_percent: SUGGESTED_PERCENT,
                    flexible_amount,
                },
            });
        }

        let estimated_savings = monthly_target * Decimal::from(PLAN_HORIZON_MONTHS);
        nodes.push(GeneratedNode {
            title: "Annual savings milestone".to_string(),
            node_type: NodeType::Milestone,
            target_amount: estimated_savings,
            parent: Some(PLAN_HORIZON_MONTHS as usize - 1),
            deadline: Some(now + Duration::days(MILESTONE_HORIZON_DAYS)),
            metadata: NodeMetadata::AnnualMilestone {
                total_months: PLAN_HORIZON_MONTHS,
                estimated_savings,
            },
        });

        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn profile(salary: Option<Decimal>, costs: &[(&str, Decimal)]) -> ProfileSnapshot {
        ProfileSnapshot {
            monthly_salary: salary,
            fixed_costs: costs
                .iter()
                .map(|(label, amount)| ((*label).to_string(), *amount))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_savings_ratio_constant() {
        assert_eq!(SAVINGS_RATIO, dec!(0.7));
    }

    #[test]
    fn test_missing_salary_yields_single_action_node() {
        let nodes = PlanGenerator::generate(&profile(None, &[]), Utc::now());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_type, NodeType::Action);
        assert_eq!(nodes[0].target_amount, Decimal::ZERO);
        assert_eq!(nodes[0].parent, None);
        assert!(matches!(
            nodes[0].metadata,
            NodeMetadata::IncompleteProfile { .. }
        ));
    }

    #[test]
    fn test_zero_salary_yields_adjustment_node() {
        let nodes = PlanGenerator::generate(&profile(Some(dec!(0)), &[]), Utc::now());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_type, NodeType::Adjustment);
        assert_eq!(nodes[0].target_amount, Decimal::ZERO);
    }

    #[test]
    fn test_deficit_yields_adjustment_with_magnitude() {
        let nodes = PlanGenerator::generate(
            &profile(
                Some(dec!(10_000_000)),
                &[("rent", dec!(7_000_000)), ("food", dec!(5_000_000))],
            ),
            Utc::now(),
        );

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].node_type, NodeType::Adjustment);
        assert_eq!(
            nodes[0].metadata,
            NodeMetadata::BudgetDeficit {
                salary: dec!(10_000_000),
                fixed_costs: dec!(12_000_000),
                deficit: dec!(2_000_000),
            }
        );
    }

    #[test]
    fn test_positive_capacity_yields_thirteen_node_chain() {
        let now = Utc::now();
        let nodes = PlanGenerator::generate(
            &profile(
                Some(dec!(30_000_000)),
                &[
                    ("rent", dec!(5_000_000)),
                    ("food", dec!(3_000_000)),
                    ("transport", dec!(1_000_000)),
                    ("utilities", dec!(1_500_000)),
                ],
            ),
            now,
        );

        // capacity = 30,000,000 - 10,500,000 = 19,500,000
        assert_eq!(nodes.len(), 13);

        for (i, node) in nodes.iter().take(12).enumerate() {
            assert_eq!(node.node_type, NodeType::Action);
            assert_eq!(node.target_amount, dec!(13_650_000));
            assert_eq!(node.parent, if i == 0 { None } else { Some(i - 1) });
            let expected_deadline = now + Duration::days(30 * (i as i64 + 1));
            assert_eq!(node.deadline, Some(expected_deadline));
        }

        let milestone = &nodes[12];
        assert_eq!(milestone.node_type, NodeType::Milestone);
        assert_eq!(milestone.target_amount, dec!(163_800_000));
        assert_eq!(milestone.parent, Some(11));
        assert_eq!(milestone.deadline, Some(now + Duration::days(365)));
        assert_eq!(
            milestone.metadata,
            NodeMetadata::AnnualMilestone {
                total_months: 12,
                estimated_savings: dec!(163_800_000),
            }
        );
    }

    #[test]
    fn test_monthly_metadata_carries_flexible_remainder() {
        let nodes = PlanGenerator::generate(
            &profile(Some(dec!(1000)), &[("rent", dec!(0))]),
            Utc::now(),
        );

        assert_eq!(
            nodes[0].metadata,
            NodeMetadata::MonthlySaving {
                month: 1,
                savings_capacity: dec!(1000),
                suggested_percent: 70,
                flexible_amount: dec!(300.0),
            }
        );
    }

    #[test]
    fn test_generation_is_deterministic_for_equal_snapshots() {
        let now = Utc::now();
        let snapshot = profile(Some(dec!(20_000_000)), &[("rent", dec!(4_000_000))]);

        let first = PlanGenerator::generate(&snapshot, now);
        let second = PlanGenerator::generate(&snapshot, now);

        assert_eq!(first, second);
    }
}
