//! Context prompt rendering for the advisor gateway.

use rust_decimal::Decimal;

use super::types::AdvisorProfile;

const DEFAULT_GOAL_INSTRUCTION: &str = "No specific goal yet. Optimize spending so the user can \
save, or suggest an achievable goal such as building an emergency fund.";

/// Renders an advisor profile into the context prompt sent to the
/// text-generation gateway.
#[must_use]
pub fn build_prompt(profile: &AdvisorProfile) -> String {
    let expenses = if profile.mandatory_expenses.is_empty() {
        "    - No expense data".to_string()
    } else {
        profile
            .mandatory_expenses
            .iter()
            .map(|item| {
                let note = item.note.as_deref().unwrap_or("-");
                format!(
                    "    - {}: {} VND ({}) | Note: {}",
                    item.name,
                    format_money(item.amount),
                    item.frequency,
                    note
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let debt_status = if profile.has_debt {
        format!(
            "Carrying debt (total: {} VND)",
            format_money(profile.total_debt.unwrap_or(Decimal::ZERO))
        )
    } else {
        "No debt".to_string()
    };

    let goal = profile
        .goal
        .as_deref()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or(DEFAULT_GOAL_INSTRUCTION);

    format!(
        "Client profile
1. PERSONAL
- Age: {age}
- Occupation: {job}
- Marital status: {marital}

2. FINANCIAL HEALTH
- Monthly income: {income} VND
- Debt status: {debt_status}
- Incidental spending: {incidental} VND

3. MANDATORY FIXED COSTS
{expenses}

4. FINANCIAL GOAL
- {goal}",
        age = profile.age,
        job = profile.job,
        marital = profile.marital_status,
        income = format_money(profile.monthly_income),
        incidental = format_money(profile.incidental_expense),
    )
}

/// Formats an amount with dot thousand separators (100000 -> "100.000").
fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(0);
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if rounded < Decimal::ZERO {
        format!("-{grouped}")
    } else {
        grouped
    }
}
