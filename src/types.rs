use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Goal difficulty as submitted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    /// Lenient parse for values arriving from untrusted request payloads.
    /// Unrecognized input substitutes `Medium` and logs the substitution.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            "expert" => Self::Expert,
            other => {
                tracing::warn!(
                    difficulty = %other,
                    fallback = "medium",
                    "Unrecognized difficulty, substituting default"
                );
                Self::Medium
            }
        }
    }
}

/// One raw progress update against a goal. Ephemeral: consumed within a
/// single request, never stored by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub value: f64,
    pub max_value: f64,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    pub occurred_at: DateTime<Utc>,
}

impl ProgressEvent {
    /// Progress as a percentage of the goal target. Values above 100 are
    /// legal (overshoot) and intentionally not clamped.
    pub fn progress_percent(&self) -> Result<f64, EngineError> {
        if self.max_value <= 0.0 {
            return Err(EngineError::InvalidProgressEvent(format!(
                "maxValue must be positive, got {}",
                self.max_value
            )));
        }
        if self.value < 0.0 {
            tracing::warn!(value = self.value, "Negative progress value, treating as 0");
            return Ok(0.0);
        }
        Ok(self.value / self.max_value * 100.0)
    }
}

/// Per-user gamification state. Loaded by the caller before the pipeline
/// runs and persisted afterwards; this crate only ever transforms
/// snapshots of it.
///
/// Invariants: `current_level` equals `level::level_for_xp(total_xp)`,
/// `longest_streak >= current_streak`, and `total_xp` never decreases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserXpState {
    pub user_id: String,
    pub total_xp: u64,
    pub current_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
}

impl UserXpState {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_xp: 0,
            current_level: 1,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
        }
    }
}

/// Aggregate stats the achievement evaluator reads. `goals_completed` is a
/// counter the caller maintains alongside the XP state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_xp: u64,
    pub current_level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub goals_completed: u64,
}

impl AggregateStats {
    pub fn from_state(state: &UserXpState, goals_completed: u64) -> Self {
        Self {
            total_xp: state.total_xp,
            current_level: state.current_level,
            current_streak: state.current_streak,
            longest_streak: state.longest_streak,
            goals_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(value: f64, max_value: f64) -> ProgressEvent {
        ProgressEvent {
            value,
            max_value,
            difficulty: Some(Difficulty::Medium),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn fresh_state_satisfies_invariants() {
        let state = UserXpState::new("u1");
        assert_eq!(state.current_level, 1);
        assert!(state.longest_streak >= state.current_streak);
        assert!(state.last_activity_date.is_none());
    }

    #[test]
    fn percent_allows_overshoot() {
        assert_eq!(event(150.0, 100.0).progress_percent().unwrap(), 150.0);
    }

    #[test]
    fn percent_rejects_non_positive_max() {
        assert!(matches!(
            event(10.0, 0.0).progress_percent(),
            Err(EngineError::InvalidProgressEvent(_))
        ));
        assert!(matches!(
            event(10.0, -3.0).progress_percent(),
            Err(EngineError::InvalidProgressEvent(_))
        ));
    }

    #[test]
    fn negative_value_normalizes_to_zero() {
        assert_eq!(event(-1.0, 100.0).progress_percent().unwrap(), 0.0);
    }

    #[test]
    fn lenient_parse_defaults_to_medium() {
        assert_eq!(Difficulty::parse_lenient("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::parse_lenient("ultra"), Difficulty::Medium);
        assert_eq!(Difficulty::parse_lenient(""), Difficulty::Medium);
    }

    #[test]
    fn serde_uses_camel_case() {
        let state = UserXpState::new("u1");
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("totalXp"));
        assert!(json.contains("lastActivityDate"));
    }
}
