//! Daily check-in streaks, point awards, and asset rotation.

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use engine::{ASSET_CYCLE_DAYS, STREAK_MILESTONE_DAYS, StreakEngine};
pub use error::GamificationError;
pub use types::{CheckInAward, CheckInSnapshot};
