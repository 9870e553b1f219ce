//! XP scoring for a single progress event: a base amount per 10% of
//! progress, scaled by goal difficulty and streak bonus, plus a flat
//! completion bonus. Pure arithmetic, no error paths — malformed inputs
//! substitute documented defaults with a warning.

use crate::types::Difficulty;

/// One XP unit per this many percentage points of progress.
const PERCENT_PER_XP_UNIT: f64 = 10.0;

/// Flat bonus when the event completes the goal (progress >= 100%).
const COMPLETION_BONUS: f64 = 50.0;

/// Streak bonus rate: +10% XP per consecutive active day.
const STREAK_BONUS_PER_DAY: f64 = 0.1;

/// Multiplier substituted when no difficulty was supplied (medium).
const DEFAULT_DIFFICULTY_MULTIPLIER: f64 = 1.5;

pub fn difficulty_multiplier(difficulty: Option<Difficulty>) -> f64 {
    match difficulty {
        Some(Difficulty::Easy) => 1.0,
        Some(Difficulty::Medium) => 1.5,
        Some(Difficulty::Hard) => 2.0,
        Some(Difficulty::Expert) => 3.0,
        None => {
            tracing::warn!(
                fallback = "medium",
                "Missing difficulty, substituting medium multiplier"
            );
            DEFAULT_DIFFICULTY_MULTIPLIER
        }
    }
}

/// Multiplier derived from the current streak: `1 + 0.1 * days`.
pub fn streak_multiplier(streak_days: u32) -> f64 {
    1.0 + STREAK_BONUS_PER_DAY * f64::from(streak_days)
}

/// Compute the XP award for one progress event.
///
/// `base = floor(percent / 10)`, then
/// `max(1, floor(base * difficulty * streak + completion_bonus))`.
/// The floor of the result guarantees integer XP; the lower bound of 1
/// guarantees every valid event awards something.
pub fn compute_xp(
    progress_percent: f64,
    difficulty: Option<Difficulty>,
    streak_multiplier: f64,
    is_completion: bool,
) -> u64 {
    let percent = if progress_percent.is_finite() && progress_percent >= 0.0 {
        progress_percent
    } else {
        tracing::warn!(
            percent = progress_percent,
            "Out-of-range progress percent, treating as 0"
        );
        0.0
    };

    let streak_mult = if streak_multiplier.is_finite() && streak_multiplier >= 1.0 {
        streak_multiplier
    } else {
        tracing::warn!(
            multiplier = streak_multiplier,
            "Streak multiplier below 1.0, substituting 1.0"
        );
        1.0
    };

    let base_xp = (percent / PERCENT_PER_XP_UNIT).floor();
    let bonus = if is_completion { COMPLETION_BONUS } else { 0.0 };
    let raw = (base_xp * difficulty_multiplier(difficulty) * streak_mult + bonus).floor();

    (raw as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        assert_eq!(compute_xp(100.0, Some(Difficulty::Hard), 1.0, true), 70);
        assert_eq!(compute_xp(50.0, Some(Difficulty::Easy), 1.0, false), 5);
    }

    #[test]
    fn day_one_medium_completion_scenario() {
        // streak 1 -> multiplier 1.1; floor(10 * 1.5 * 1.1 + 50) = 66
        assert_eq!(
            compute_xp(100.0, Some(Difficulty::Medium), streak_multiplier(1), true),
            66
        );
    }

    #[test]
    fn never_zero_for_valid_input() {
        for pct in [0.0, 1.0, 9.9, 100.0] {
            for diff in [
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Expert,
            ] {
                assert!(compute_xp(pct, Some(diff), 1.0, false) >= 1);
            }
        }
    }

    #[test]
    fn missing_difficulty_matches_medium() {
        assert_eq!(
            compute_xp(80.0, None, 1.0, false),
            compute_xp(80.0, Some(Difficulty::Medium), 1.0, false)
        );
    }

    #[test]
    fn overshoot_keeps_scaling() {
        let at_100 = compute_xp(100.0, Some(Difficulty::Easy), 1.0, true);
        let at_150 = compute_xp(150.0, Some(Difficulty::Easy), 1.0, true);
        assert!(at_150 > at_100);
    }

    #[test]
    fn garbage_multiplier_substitutes_one() {
        assert_eq!(
            compute_xp(50.0, Some(Difficulty::Easy), 0.0, false),
            compute_xp(50.0, Some(Difficulty::Easy), 1.0, false)
        );
        assert_eq!(
            compute_xp(50.0, Some(Difficulty::Easy), f64::NAN, false),
            compute_xp(50.0, Some(Difficulty::Easy), 1.0, false)
        );
    }

    #[test]
    fn streak_multiplier_grows_linearly() {
        assert_eq!(streak_multiplier(0), 1.0);
        assert!((streak_multiplier(5) - 1.5).abs() < 1e-12);
    }
}
