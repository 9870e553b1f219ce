//! Composition of the scoring pipeline as a request handler invokes it:
//! one progress event in, a replacement `UserXpState` and a response-ready
//! outcome out. The caller loads state before and persists after, holding
//! whatever per-user lock its storage layer provides; nothing here is
//! retained across calls.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::achievements::{self, AchievementDefinition, AchievementTier};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::types::{AggregateStats, ProgressEvent, UserXpState};
use crate::{level, score, streak};

/// An achievement that crossed its threshold during this call. The caller
/// persists the unlock so it is awarded exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementUnlock {
    pub achievement_id: String,
    pub tier: AchievementTier,
    pub xp_reward: u64,
}

/// Everything the HTTP layer needs to shape its JSON response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOutcome {
    pub xp_awarded: u64,
    pub leveled_up: bool,
    pub new_level: u32,
    pub streak: u32,
    pub goal_completed: bool,
    pub total_xp: u64,
    pub progress_to_next_level: f64,
    pub newly_unlocked_achievements: Vec<AchievementUnlock>,
}

/// Run one progress event through the full pipeline.
///
/// Order matters: the streak is registered first so the XP award reflects
/// the refreshed streak (a first-ever submission already earns the
/// one-day bonus). Achievement XP is then folded in through the same
/// `add_xp` path, so a big unlock can itself trigger a level-up.
///
/// `completed` holds the ids of achievements the user has already
/// unlocked (from storage); `goals_completed_before` is the caller's
/// persisted completion counter, incremented here when this event
/// finishes the goal.
pub fn record_progress(
    config: &EngineConfig,
    state: &UserXpState,
    event: &ProgressEvent,
    catalog: &[AchievementDefinition],
    completed: &BTreeSet<String>,
    goals_completed_before: u64,
) -> Result<(UserXpState, ProgressOutcome), EngineError> {
    let percent = event.progress_percent()?;
    let goal_completed = percent >= 100.0;

    let today = config.local_date(event.occurred_at);
    let mut next = streak::register_activity(state, today);

    let xp_awarded = score::compute_xp(
        percent,
        event.difficulty,
        score::streak_multiplier(next.current_streak),
        goal_completed,
    );
    let award = level::add_xp(&next, xp_awarded as i64)?;
    let mut leveled_up = award.leveled_up;
    next = award.new_state;

    let goals_completed = goals_completed_before + u64::from(goal_completed);
    let stats = AggregateStats::from_state(&next, goals_completed);

    let mut newly_unlocked = Vec::new();
    for (def, progress) in catalog
        .iter()
        .zip(achievements::evaluate(&stats, catalog))
    {
        if !progress.is_completed || completed.contains(&progress.achievement_id) {
            continue;
        }
        let bonus = level::add_xp(&next, def.xp_reward as i64)?;
        leveled_up |= bonus.leveled_up;
        next = bonus.new_state;
        tracing::info!(
            user_id = %next.user_id,
            achievement_id = %def.id,
            tier = def.tier.as_str(),
            xp_reward = def.xp_reward,
            "Achievement unlocked"
        );
        newly_unlocked.push(AchievementUnlock {
            achievement_id: def.id.clone(),
            tier: def.tier,
            xp_reward: def.xp_reward,
        });
    }

    let outcome = ProgressOutcome {
        xp_awarded,
        leveled_up,
        new_level: next.current_level,
        streak: next.current_streak,
        goal_completed,
        total_xp: next.total_xp,
        progress_to_next_level: level::progress_to_next_level(&next),
        newly_unlocked_achievements: newly_unlocked,
    };
    Ok((next, outcome))
}
