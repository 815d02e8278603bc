//! Streak engine for daily check-ins.

use chrono::NaiveDate;
use sprout_shared::config::GamificationConfig;

use super::error::GamificationError;
use super::types::{CheckInAward, CheckInSnapshot};

/// Streak length interval at which the point bonus grows.
pub const STREAK_MILESTONE_DAYS: i32 = 5;

/// Number of distinct display assets before the rotation repeats.
pub const ASSET_CYCLE_DAYS: i32 = 30;

/// CDN base for the 3D streak assets.
const ASSET_BASE_URL: &str = "https://cdn.sproutfin.app/assets/3d";

/// Pure streak transition and award calculations.
///
/// Persistence (uniqueness of one check-in per user per day, the points
/// balance increment) lives in the repository layer; this engine only
/// decides streak length and award size.
pub struct StreakEngine;

impl StreakEngine {
    /// Computes the streak for a check-in on `today`, given the most
    /// recent persisted check-in (if any).
    ///
    /// The streak continues (+1) only when the latest check-in is dated
    /// exactly one day before `today`. A gap of two or more days, or no
    /// prior check-in at all, resets the streak to 1.
    ///
    /// # Errors
    ///
    /// Returns `GamificationError::AlreadyCheckedIn` if the latest
    /// check-in is already dated `today`, and
    /// `GamificationError::FutureDatedCheckIn` if it is dated after
    /// `today` (clock skew or a replayed request).
    pub fn next_streak(
        latest: Option<CheckInSnapshot>,
        today: NaiveDate,
    ) -> Result<i32, GamificationError> {
        let Some(latest) = latest else {
            return Ok(1);
        };

        if latest.date == today {
            return Err(GamificationError::AlreadyCheckedIn(today));
        }
        if latest.date > today {
            return Err(GamificationError::FutureDatedCheckIn {
                latest: latest.date,
                today,
            });
        }

        match today.pred_opt() {
            Some(yesterday) if latest.date == yesterday => Ok(latest.streak + 1),
            _ => Ok(1),
        }
    }

    /// Points awarded for a check-in at the given streak length.
    ///
    /// `base + floor(streak / 5) * bonus` — a pure function of the
    /// streak count; integer division floors toward zero.
    #[must_use]
    pub const fn points_for_streak(streak: i32, config: &GamificationConfig) -> i32 {
        config.points_per_check_in + (streak / STREAK_MILESTONE_DAYS) * config.streak_bonus_points
    }

    /// Maps a streak day onto the 30-asset rotation (1-based).
    ///
    /// The sequence repeats every 30 days regardless of streak length.
    #[must_use]
    pub const fn asset_day(streak: i32) -> i32 {
        (streak - 1).rem_euclid(ASSET_CYCLE_DAYS) + 1
    }

    /// Returns the display asset URL for a streak day.
    #[must_use]
    pub fn asset_url(streak: i32) -> String {
        format!("{ASSET_BASE_URL}/day-{}.glb", Self::asset_day(streak))
    }

    /// Runs the full check-in decision for `today` and builds the award.
    ///
    /// # Errors
    ///
    /// Propagates the streak transition errors of [`Self::next_streak`].
    pub fn check_in(
        latest: Option<CheckInSnapshot>,
        today: NaiveDate,
        config: &GamificationConfig,
    ) -> Result<CheckInAward, GamificationError> {
        let streak = Self::next_streak(latest, today)?;

        Ok(CheckInAward {
            streak,
            points_added: Self::points_for_streak(streak, config),
            asset_url: Self::asset_url(streak),
            check_in_date: today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_first_check_in_starts_streak_at_one() {
        let streak = StreakEngine::next_streak(None, date(2026, 3, 1)).unwrap();
        assert_eq!(streak, 1);
    }

    #[test]
    fn test_consecutive_day_continues_streak() {
        let latest = CheckInSnapshot {
            date: date(2026, 3, 1),
            streak: 4,
        };
        let streak = StreakEngine::next_streak(Some(latest), date(2026, 3, 2)).unwrap();
        assert_eq!(streak, 5);
    }

    #[test]
    fn test_gap_resets_streak() {
        let latest = CheckInSnapshot {
            date: date(2026, 3, 1),
            streak: 9,
        };
        let streak = StreakEngine::next_streak(Some(latest), date(2026, 3, 3)).unwrap();
        assert_eq!(streak, 1);
    }

    #[test]
    fn test_streak_continues_across_month_boundary() {
        let latest = CheckInSnapshot {
            date: date(2026, 2, 28),
            streak: 10,
        };
        let streak = StreakEngine::next_streak(Some(latest), date(2026, 3, 1)).unwrap();
        assert_eq!(streak, 11);
    }

    #[test]
    fn test_same_day_rejected() {
        let today = date(2026, 3, 1);
        let latest = CheckInSnapshot {
            date: today,
            streak: 3,
        };
        let err = StreakEngine::next_streak(Some(latest), today).unwrap_err();
        assert_eq!(err, GamificationError::AlreadyCheckedIn(today));
    }

    #[test]
    fn test_future_dated_latest_rejected() {
        let latest = CheckInSnapshot {
            date: date(2026, 3, 5),
            streak: 3,
        };
        let err = StreakEngine::next_streak(Some(latest), date(2026, 3, 1)).unwrap_err();
        assert!(matches!(err, GamificationError::FutureDatedCheckIn { .. }));
    }

    #[test]
    fn test_points_table_with_defaults() {
        let config = sprout_shared::config::GamificationConfig::default();

        assert_eq!(StreakEngine::points_for_streak(1, &config), 10);
        assert_eq!(StreakEngine::points_for_streak(4, &config), 10);
        assert_eq!(StreakEngine::points_for_streak(5, &config), 15);
        assert_eq!(StreakEngine::points_for_streak(9, &config), 15);
        assert_eq!(StreakEngine::points_for_streak(10, &config), 20);
    }

    #[test]
    fn test_asset_day_cycle() {
        assert_eq!(StreakEngine::asset_day(1), 1);
        assert_eq!(StreakEngine::asset_day(30), 30);
        assert_eq!(StreakEngine::asset_day(31), 1);
        assert_eq!(StreakEngine::asset_day(60), 30);
        assert_eq!(StreakEngine::asset_day(61), 1);
    }

    #[test]
    fn test_asset_url_format() {
        assert_eq!(
            StreakEngine::asset_url(31),
            "https://cdn.sproutfin.app/assets/3d/day-1.glb"
        );
    }

    #[test]
    fn test_check_in_builds_full_award() {
        let config = sprout_shared::config::GamificationConfig::default();
        let latest = CheckInSnapshot {
            date: date(2026, 3, 1),
            streak: 4,
        };

        let award = StreakEngine::check_in(Some(latest), date(2026, 3, 2), &config).unwrap();

        assert_eq!(award.streak, 5);
        assert_eq!(award.points_added, 15);
        assert_eq!(award.check_in_date, date(2026, 3, 2));
        assert!(award.asset_url.ends_with("day-5.glb"));
    }
}
