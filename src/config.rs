use std::env;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// FixedOffset rejects offsets of a full day or more.
const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60 - 1;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    /// Reference timezone for streak dates, as minutes east of UTC.
    /// Explicit so deployments in different regions agree on what "today"
    /// means instead of inheriting the server's local clock.
    pub utc_offset_minutes: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            enable_file_logs: false,
            log_dir: "./logs".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let raw_offset = env_or_parse("STREAK_UTC_OFFSET_MINUTES", 0_i32);
        let utc_offset_minutes = if raw_offset.abs() > MAX_UTC_OFFSET_MINUTES {
            tracing::warn!(
                offset_minutes = raw_offset,
                "Streak UTC offset out of range, using UTC"
            );
            0
        } else {
            raw_offset
        };

        Self {
            log_level: env_or("RUST_LOG", "info"),
            enable_file_logs: env_or_bool("ENABLE_FILE_LOGS", false),
            log_dir: env_or("LOG_DIR", "./logs"),
            utc_offset_minutes,
        }
    }

    /// Calendar date of `instant` in the configured reference timezone.
    /// This is the only place a timestamp becomes a streak date.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        let offset =
            FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());
        instant.with_timezone(&offset).date_naive()
    }
}

pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

pub fn env_or_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match env::var(key) {
        Ok(raw) => match raw.parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(
                    key,
                    value = %raw,
                    "Failed to parse env var, using default"
                );
                default
            }
        },
        Err(_) => default,
    }
}

pub fn env_or_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
