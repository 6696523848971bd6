//! The daily-check state transition.
//!
//! The transition is a pure function over `(config, today, yesterday_hours)`
//! so the ordering rules can be tested without a database. Rules, applied in
//! this exact order:
//!
//! 1. Checked today already (or the check date is in the future): no-op.
//! 2. Goal met yesterday: streak grows by one.
//! 3. Goal missed: a freeze is consumed if available, otherwise the streak
//!    resets and the penalty is charged (the balance may go negative).
//! 4. Gap override: when more than one full day passed since the last check,
//!    the streak is forced to zero *after* steps 2/3. A gap cancels even a
//!    freshly earned increment.
//! 5. The check date advances to today.

use chrono::NaiveDate;

use crate::config::UserConfig;

/// What a daily check did.
#[derive(Clone, Debug, PartialEq)]
pub enum CheckOutcome {
    /// The check already ran today; nothing changed.
    AlreadyChecked,
    Checked {
        goal_met: bool,
        freeze_consumed: bool,
        /// Energy subtracted from the balance, 0.0 unless the streak broke.
        penalty_applied: f64,
        /// The streak was zeroed because of a missed check-in gap.
        gap_reset: bool,
    },
}

/// Runs the transition and returns the updated configuration.
///
/// `yesterday_hours` is the sum of yesterday's logged minutes divided by 60;
/// the caller computes it because the transition itself is storage-free.
pub fn advance(
    config: &UserConfig,
    today: NaiveDate,
    yesterday_hours: f64,
) -> (UserConfig, CheckOutcome) {
    if config.last_check_date >= today {
        return (config.clone(), CheckOutcome::AlreadyChecked);
    }

    let mut next = config.clone();
    let goal_met = yesterday_hours >= next.daily_goal_hours;
    let mut freeze_consumed = false;
    let mut penalty_applied = 0.0;

    if goal_met {
        next.current_streak += 1;
    } else if next.streak_freezes > 0 {
        next.streak_freezes -= 1;
        freeze_consumed = true;
    } else {
        next.current_streak = 0;
        next.energy_balance -= next.penalty_amount;
        penalty_applied = next.penalty_amount;
    }

    let gap_reset = today.signed_duration_since(config.last_check_date).num_days() > 1;
    if gap_reset {
        next.current_streak = 0;
    }

    next.last_check_date = today;

    (
        next,
        CheckOutcome::Checked {
            goal_met,
            freeze_consumed,
            penalty_applied,
            gap_reset,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn config_checked_on(date: NaiveDate) -> UserConfig {
        UserConfig::new(date)
    }

    #[test]
    fn checked_today_is_a_noop() {
        let config = config_checked_on(day(20));
        let (next, outcome) = advance(&config, day(20), 10.0);
        assert_eq!(outcome, CheckOutcome::AlreadyChecked);
        assert_eq!(next, config);
    }

    #[test]
    fn future_check_date_is_a_noop() {
        let config = config_checked_on(day(25));
        let (next, outcome) = advance(&config, day(20), 10.0);
        assert_eq!(outcome, CheckOutcome::AlreadyChecked);
        assert_eq!(next, config);
    }

    #[test]
    fn goal_met_grows_streak_without_touching_balance() {
        // Goal 4h, streak 0, no freezes, 5h yesterday.
        let config = config_checked_on(day(19));
        let (next, outcome) = advance(&config, day(20), 5.0);

        assert_eq!(next.current_streak, 1);
        assert_eq!(next.energy_balance, 0.0);
        assert_eq!(next.last_check_date, day(20));
        assert_eq!(
            outcome,
            CheckOutcome::Checked {
                goal_met: true,
                freeze_consumed: false,
                penalty_applied: 0.0,
                gap_reset: false,
            }
        );
    }

    #[test]
    fn goal_missed_resets_streak_and_charges_penalty() {
        // Goal 4h, streak 3, no freezes, 1h yesterday.
        let mut config = config_checked_on(day(19));
        config.current_streak = 3;
        let (next, outcome) = advance(&config, day(20), 1.0);

        assert_eq!(next.current_streak, 0);
        assert_eq!(next.energy_balance, -50.0);
        assert_eq!(
            outcome,
            CheckOutcome::Checked {
                goal_met: false,
                freeze_consumed: false,
                penalty_applied: 50.0,
                gap_reset: false,
            }
        );
    }

    #[test]
    fn freeze_preserves_streak_and_balance() {
        // Same miss, but one freeze available.
        let mut config = config_checked_on(day(19));
        config.current_streak = 3;
        config.streak_freezes = 1;
        let (next, outcome) = advance(&config, day(20), 1.0);

        assert_eq!(next.current_streak, 3);
        assert_eq!(next.streak_freezes, 0);
        assert_eq!(next.energy_balance, 0.0);
        assert_eq!(
            outcome,
            CheckOutcome::Checked {
                goal_met: false,
                freeze_consumed: true,
                penalty_applied: 0.0,
                gap_reset: false,
            }
        );
    }

    #[test]
    fn gap_overrides_fresh_increment() {
        // Last check 3 days ago, goal met yesterday. The streak increment
        // from the met goal is cancelled by the gap override.
        let mut config = config_checked_on(day(17));
        config.current_streak = 5;
        let (next, outcome) = advance(&config, day(20), 6.0);

        assert_eq!(next.current_streak, 0);
        assert_eq!(next.energy_balance, 0.0);
        assert_eq!(
            outcome,
            CheckOutcome::Checked {
                goal_met: true,
                freeze_consumed: false,
                penalty_applied: 0.0,
                gap_reset: true,
            }
        );
    }

    #[test]
    fn gap_with_missed_goal_still_consumes_freeze() {
        // The freeze is spent even though the gap zeroes the streak anyway.
        let mut config = config_checked_on(day(17));
        config.current_streak = 4;
        config.streak_freezes = 2;
        let (next, outcome) = advance(&config, day(20), 0.0);

        assert_eq!(next.current_streak, 0);
        assert_eq!(next.streak_freezes, 1);
        assert_eq!(next.energy_balance, 0.0);
        assert_eq!(
            outcome,
            CheckOutcome::Checked {
                goal_met: false,
                freeze_consumed: true,
                penalty_applied: 0.0,
                gap_reset: true,
            }
        );
    }

    #[test]
    fn exactly_one_day_gap_is_not_a_gap() {
        let config = config_checked_on(day(19));
        let (next, _) = advance(&config, day(20), 5.0);
        assert_eq!(next.current_streak, 1);
    }
}
