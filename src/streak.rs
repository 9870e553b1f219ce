//! Calendar-day streak tracking. Continuity is judged on date-only
//! values in the configured reference timezone; callers convert instants
//! via `EngineConfig::local_date` before calling in, so no ambient clock
//! is consulted here.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::types::UserXpState;

/// Register qualifying activity on `today` and return the updated state.
///
/// Same-day calls are idempotent; an activity exactly one day after the
/// last extends the streak; anything else (gap, or no prior activity)
/// starts a new streak of 1. `longest_streak` never decreases.
pub fn register_activity(state: &UserXpState, today: NaiveDate) -> UserXpState {
    let mut next = state.clone();

    match state.last_activity_date {
        Some(last) if last == today => return next,
        Some(last) if last > today => {
            // Stored date ahead of the reference clock. Keep the streak
            // rather than resetting it on what is likely clock skew.
            tracing::warn!(
                user_id = %state.user_id,
                last = %last,
                today = %today,
                "Activity date ahead of today, keeping streak unchanged"
            );
            return next;
        }
        Some(last) if last.succ_opt() == Some(today) => {
            next.current_streak = state.current_streak.saturating_add(1);
        }
        _ => {
            next.current_streak = 1;
        }
    }

    next.longest_streak = next.longest_streak.max(next.current_streak);
    next.last_activity_date = Some(today);
    next
}

/// Rebuild the current streak from a full activity-date history, anchored
/// at `today`. Used for audits and for backfilling users that predate
/// streak tracking. A streak ending yesterday still counts; one that
/// ended earlier does not.
pub fn streak_from_dates(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let anchor = if dates.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if dates.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    let mut cursor = Some(anchor);
    while let Some(day) = cursor {
        if !dates.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred_opt();
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_activity_starts_streak_of_one() {
        let state = register_activity(&UserXpState::new("u1"), date(2026, 3, 1));
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 1);
        assert_eq!(state.last_activity_date, Some(date(2026, 3, 1)));
    }

    #[test]
    fn same_day_is_idempotent() {
        let day = date(2026, 3, 1);
        let once = register_activity(&UserXpState::new("u1"), day);
        let twice = register_activity(&once, day);
        assert_eq!(twice, once);
    }

    #[test]
    fn consecutive_days_extend() {
        let mut state = UserXpState::new("u1");
        for d in 1..=5 {
            state = register_activity(&state, date(2026, 3, d));
        }
        assert_eq!(state.current_streak, 5);
        assert_eq!(state.longest_streak, 5);
    }

    #[test]
    fn gap_resets_but_longest_survives() {
        let mut state = UserXpState::new("u1");
        state = register_activity(&state, date(2026, 3, 1));
        state = register_activity(&state, date(2026, 3, 2));
        state = register_activity(&state, date(2026, 3, 3));
        // two-day gap
        state = register_activity(&state, date(2026, 3, 6));
        assert_eq!(state.current_streak, 1);
        assert_eq!(state.longest_streak, 3);
    }

    #[test]
    fn month_boundary_counts_as_consecutive() {
        let mut state = UserXpState::new("u1");
        state = register_activity(&state, date(2026, 2, 28));
        state = register_activity(&state, date(2026, 3, 1));
        assert_eq!(state.current_streak, 2);
    }

    #[test]
    fn future_last_activity_is_a_no_op() {
        let mut state = UserXpState::new("u1");
        state = register_activity(&state, date(2026, 3, 10));
        let rewound = register_activity(&state, date(2026, 3, 8));
        assert_eq!(rewound, state);
    }

    #[test]
    fn rebuild_matches_incremental_tracking() {
        let days: Vec<NaiveDate> = vec![
            date(2026, 3, 1),
            date(2026, 3, 2),
            date(2026, 3, 5),
            date(2026, 3, 6),
            date(2026, 3, 7),
        ];
        let mut state = UserXpState::new("u1");
        for d in &days {
            state = register_activity(&state, *d);
        }
        let history: BTreeSet<NaiveDate> = days.into_iter().collect();
        assert_eq!(
            streak_from_dates(&history, date(2026, 3, 7)),
            state.current_streak
        );
    }

    #[test]
    fn rebuild_allows_yesterday_anchor() {
        let history: BTreeSet<NaiveDate> =
            [date(2026, 3, 5), date(2026, 3, 6)].into_iter().collect();
        assert_eq!(streak_from_dates(&history, date(2026, 3, 7)), 2);
        assert_eq!(streak_from_dates(&history, date(2026, 3, 8)), 0);
        assert_eq!(streak_from_dates(&BTreeSet::new(), date(2026, 3, 7)), 0);
    }
}
