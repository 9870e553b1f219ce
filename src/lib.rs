//! Gamification pipeline for a goal-tracking backend: progress events in,
//! XP awards, level progression, calendar-day streaks, and achievement
//! unlocks out.
//!
//! Pure computation only. The host application loads `UserXpState` from
//! storage, runs the pipeline, and persists the replacement state it gets
//! back; this crate performs no I/O and retains nothing between calls.
//! Serializing concurrent submissions per user (row lock, transaction) is
//! likewise the host's job — two racing requests must not both start from
//! the same snapshot.

pub mod achievements;
pub mod config;
pub mod error;
pub mod level;
pub mod logging;
pub mod pipeline;
pub mod score;
pub mod streak;
pub mod types;
