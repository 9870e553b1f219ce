//! Achievement catalog and evaluator. Evaluation is pure and
//! deterministic: the same stats and catalog always yield the same
//! progress list, so callers can safely re-evaluate on every progress
//! event. Detecting "newly completed" entries and awarding their XP is
//! the caller's job (diff against persisted completion flags).

use serde::{Deserialize, Serialize};

use crate::types::AggregateStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl AchievementTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

/// The declarative condition extractor: which aggregate a definition's
/// threshold is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    TotalXp,
    CurrentStreak,
    LongestStreak,
    Level,
    GoalsCompleted,
}

impl Metric {
    pub fn extract(&self, stats: &AggregateStats) -> u64 {
        match self {
            Self::TotalXp => stats.total_xp,
            Self::CurrentStreak => u64::from(stats.current_streak),
            Self::LongestStreak => u64::from(stats.longest_streak),
            Self::Level => u64::from(stats.current_level),
            Self::GoalsCompleted => stats.goals_completed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementDefinition {
    pub id: String,
    pub tier: AchievementTier,
    pub metric: Metric,
    pub threshold: u64,
    pub xp_reward: u64,
}

/// Derived view, recomputed on every evaluation. Never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementProgress {
    pub achievement_id: String,
    pub current: u64,
    pub required: u64,
    pub percentage: u8,
    pub is_completed: bool,
}

/// Evaluate every definition in `catalog` against `stats`. Output order
/// follows catalog order.
pub fn evaluate(stats: &AggregateStats, catalog: &[AchievementDefinition]) -> Vec<AchievementProgress> {
    catalog
        .iter()
        .map(|def| {
            let current = def.metric.extract(stats);
            let (percentage, is_completed) = if def.threshold == 0 {
                tracing::warn!(
                    achievement_id = %def.id,
                    "Zero threshold in catalog, treating as already met"
                );
                (100, true)
            } else {
                let pct = (current as f64 / def.threshold as f64 * 100.0).round();
                (pct.clamp(0.0, 100.0) as u8, current >= def.threshold)
            };
            AchievementProgress {
                achievement_id: def.id.clone(),
                current,
                required: def.threshold,
                percentage,
                is_completed,
            }
        })
        .collect()
}

/// Built-in catalog. Hosts may extend or replace it at configuration
/// time; nothing below is consulted unless passed to `evaluate`.
pub fn default_catalog() -> Vec<AchievementDefinition> {
    fn def(
        id: &str,
        tier: AchievementTier,
        metric: Metric,
        threshold: u64,
        xp_reward: u64,
    ) -> AchievementDefinition {
        AchievementDefinition {
            id: id.to_string(),
            tier,
            metric,
            threshold,
            xp_reward,
        }
    }

    use AchievementTier::*;
    vec![
        def("first-goal", Bronze, Metric::GoalsCompleted, 1, 25),
        def("ten-goals", Silver, Metric::GoalsCompleted, 10, 100),
        def("fifty-goals", Gold, Metric::GoalsCompleted, 50, 400),
        def("week-streak", Bronze, Metric::CurrentStreak, 7, 75),
        def("month-streak", Silver, Metric::CurrentStreak, 30, 300),
        def("hundred-day-streak", Platinum, Metric::LongestStreak, 100, 1500),
        def("xp-1k", Bronze, Metric::TotalXp, 1_000, 50),
        def("xp-10k", Gold, Metric::TotalXp, 10_000, 500),
        def("level-5", Bronze, Metric::Level, 5, 50),
        def("level-10", Silver, Metric::Level, 10, 150),
        def("level-25", Platinum, Metric::Level, 25, 1000),
    ]
}
