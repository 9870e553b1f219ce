//! Level progression over a monotonic XP curve.
//!
//! The curve is triangular: climbing from level `n` to `n + 1` costs
//! `100 * n` XP, so the total XP required to reach level `n` is
//! `100 * n * (n - 1) / 2` (level 1 at 0, level 2 at 100, level 3 at 300,
//! level 4 at 600, ...). `current_level` is always derived from
//! `total_xp`, never an independently mutable field.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::types::UserXpState;

/// XP cost of the first level step; each subsequent step costs one more
/// multiple of this.
const XP_STEP: u64 = 100;

/// Total XP required to reach `level`.
pub fn xp_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    XP_STEP * steps * (steps + 1) / 2
}

/// The level implied by `total_xp`. Monotone non-decreasing in its input.
pub fn level_for_xp(total_xp: u64) -> u32 {
    let mut level = 1;
    while xp_for_level(level + 1) <= total_xp {
        level += 1;
    }
    level
}

/// Result of merging an XP award into a user's running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpAward {
    pub new_state: UserXpState,
    pub leveled_up: bool,
    pub new_level: u32,
}

/// Add `amount` XP to the user's total and rederive the level.
/// Cumulative by design: two calls award twice. Negative amounts are the
/// one hard error here — XP never decreases.
pub fn add_xp(state: &UserXpState, amount: i64) -> Result<XpAward, EngineError> {
    if amount < 0 {
        return Err(EngineError::InvalidAmount { amount });
    }

    let mut new_state = state.clone();
    new_state.total_xp = state.total_xp.saturating_add(amount as u64);
    new_state.current_level = level_for_xp(new_state.total_xp);

    let leveled_up = new_state.current_level > state.current_level;
    if leveled_up {
        tracing::info!(
            user_id = %state.user_id,
            from = state.current_level,
            to = new_state.current_level,
            "Level up"
        );
    }

    let new_level = new_state.current_level;
    Ok(XpAward {
        new_state,
        leveled_up,
        new_level,
    })
}

/// Fraction of the way from the current level threshold to the next, in
/// `[0, 1)`. Derived from `total_xp` alone so a stale stored level cannot
/// skew the readout.
pub fn progress_to_next_level(state: &UserXpState) -> f64 {
    let level = level_for_xp(state.total_xp);
    let floor = xp_for_level(level);
    let ceiling = xp_for_level(level + 1);
    (state.total_xp - floor) as f64 / (ceiling - floor) as f64
}
