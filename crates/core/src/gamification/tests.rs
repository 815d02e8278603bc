//! Property-based tests for the streak engine.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::engine::{ASSET_CYCLE_DAYS, STREAK_MILESTONE_DAYS, StreakEngine};
use super::error::GamificationError;
use super::types::CheckInSnapshot;
use sprout_shared::config::GamificationConfig;

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // Any day in a ~55-year window around the epoch.
    (0i64..20_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Duration::days(offset)
    })
}

proptest! {
    /// The streak continues (+1) exactly when the latest check-in is one
    /// day before today; any larger gap resets to 1.
    #[test]
    fn test_streak_transition(
        today in arb_date(),
        gap_days in 1i64..400,
        prior_streak in 1i32..10_000,
    ) {
        let latest = CheckInSnapshot {
            date: today - Duration::days(gap_days),
            streak: prior_streak,
        };

        let streak = StreakEngine::next_streak(Some(latest), today).unwrap();

        if gap_days == 1 {
            prop_assert_eq!(streak, prior_streak + 1);
        } else {
            prop_assert_eq!(streak, 1);
        }
    }

    /// A latest check-in dated today or later is always rejected,
    /// never silently turned into a streak.
    #[test]
    fn test_non_past_latest_rejected(
        today in arb_date(),
        ahead_days in 0i64..400,
        prior_streak in 1i32..10_000,
    ) {
        let latest = CheckInSnapshot {
            date: today + Duration::days(ahead_days),
            streak: prior_streak,
        };

        let err = StreakEngine::next_streak(Some(latest), today).unwrap_err();

        if ahead_days == 0 {
            prop_assert_eq!(err, GamificationError::AlreadyCheckedIn(today));
        } else {
            let is_future_dated = matches!(err, GamificationError::FutureDatedCheckIn { .. });
            prop_assert!(is_future_dated);
        }
    }

    /// points = base + floor(streak / 5) * bonus, monotone in streak.
    #[test]
    fn test_points_formula(streak in 1i32..100_000) {
        let config = GamificationConfig::default();
        let points = StreakEngine::points_for_streak(streak, &config);

        prop_assert_eq!(
            points,
            config.points_per_check_in
                + (streak / STREAK_MILESTONE_DAYS) * config.streak_bonus_points
        );
        prop_assert!(points >= config.points_per_check_in);

        let next = StreakEngine::points_for_streak(streak + 1, &config);
        prop_assert!(next >= points);
    }

    /// The asset day always lands in 1..=30 and repeats every 30 days.
    #[test]
    fn test_asset_day_in_cycle(streak in 1i32..1_000_000) {
        let day = StreakEngine::asset_day(streak);

        prop_assert!((1..=ASSET_CYCLE_DAYS).contains(&day));
        prop_assert_eq!(day, StreakEngine::asset_day(streak + ASSET_CYCLE_DAYS));
    }
}
