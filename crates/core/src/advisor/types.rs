//! Advisor data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a long-running advisor task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Stored, not yet picked up.
    Pending,
    /// The generation call is in flight.
    Processing,
    /// A plan was generated and recorded.
    Completed,
    /// The generation call failed; the error is recorded.
    Failed,
}

/// One mandatory expense line in an advisor profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseItem {
    /// Expense label (rent, food, ...).
    pub name: String,
    /// Estimated monthly amount.
    pub amount: Decimal,
    /// How often the expense recurs (free text).
    pub frequency: String,
    /// Optional note.
    pub note: Option<String>,
}

/// The profile a caller submits to the advisor service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorProfile {
    /// Caller-side user id, if the caller tracks one.
    pub external_user_id: Option<Uuid>,
    /// Age in years.
    pub age: u32,
    /// Occupation.
    pub job: String,
    /// Marital status (free text).
    pub marital_status: String,
    /// Monthly income.
    pub monthly_income: Decimal,
    /// Whether the user carries debt.
    #[serde(default)]
    pub has_debt: bool,
    /// Total outstanding debt, when `has_debt` is set.
    pub total_debt: Option<Decimal>,
    /// Mandatory fixed costs.
    pub mandatory_expenses: Vec<ExpenseItem>,
    /// Estimated incidental spending per month.
    #[serde(default)]
    pub incidental_expense: Decimal,
    /// Stated financial goal, if any.
    pub goal: Option<String>,
}
