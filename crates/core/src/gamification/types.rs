//! Gamification data types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of a persisted check-in, as the streak engine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInSnapshot {
    /// Calendar date of the check-in.
    pub date: NaiveDate,
    /// Streak count recorded on that date.
    pub streak: i32,
}

/// Outcome of a successful check-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInAward {
    /// The new streak length.
    pub streak: i32,
    /// Points added to the user's balance.
    pub points_added: i32,
    /// Display asset for the streak day.
    pub asset_url: String,
    /// The calendar date checked in.
    pub check_in_date: NaiveDate,
}
