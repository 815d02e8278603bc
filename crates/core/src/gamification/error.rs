//! Gamification error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the streak engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GamificationError {
    /// A check-in already exists for this calendar day.
    #[error("already checked in on {0}")]
    AlreadyCheckedIn(NaiveDate),

    /// The most recent check-in is dated after "today" (clock skew or
    /// replayed request). Rejected rather than computing a streak from it.
    #[error("latest check-in {latest} is after today {today}")]
    FutureDatedCheckIn {
        /// Date of the most recent persisted check-in.
        latest: NaiveDate,
        /// The date the engine was asked to check in.
        today: NaiveDate,
    },
}
