use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient::or_default;

/// Default: 7-day stats window
fn default_stats_days() -> i64 {
    7
}

/// Default: done todos are purged after 7 days
fn default_todo_purge_days() -> i64 {
    7
}

/// Default: goal history grid shows 30 days
fn default_goal_history_days() -> i64 {
    30
}

/// A stored day count outside 1..=365, or not an integer at all, reads back
/// as `default`.
fn day_count<'de, D>(deserializer: D, default: i64) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let (lo, hi) = SettingKey::StatsDays.range();
    Ok(value
        .as_i64()
        .filter(|days| (lo..=hi).contains(days))
        .unwrap_or(default))
}

fn stats_days_in_range<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    day_count(d, default_stats_days())
}

fn todo_purge_days_in_range<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    day_count(d, default_todo_purge_days())
}

fn goal_history_days_in_range<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    day_count(d, default_goal_history_days())
}

/// How activity bars in the stats view are scaled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BarMode {
    /// Share of all logged hours
    Logged,
    /// Share of every hour in the window (`days * 24`)
    Window,
    /// Normal-CDF percentile of the activity's z-score
    ZScore,
    /// Min-max normalized across activities
    #[default]
    MinMax,
}

impl BarMode {
    pub const ALL: [BarMode; 4] = [
        BarMode::Logged,
        BarMode::Window,
        BarMode::ZScore,
        BarMode::MinMax,
    ];

    pub fn index(self) -> u8 {
        match self {
            BarMode::Logged => 0,
            BarMode::Window => 1,
            BarMode::ZScore => 2,
            BarMode::MinMax => 3,
        }
    }

    pub fn next(self) -> BarMode {
        BarMode::ALL[(self.index() as usize + 1) % BarMode::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            BarMode::Logged => "Logged Time",
            BarMode::Window => "Total Time",
            BarMode::ZScore => "Z-Score Percentile",
            BarMode::MinMax => "Min-Max Normalization",
        }
    }
}

impl TryFrom<u8> for BarMode {
    type Error = SettingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BarMode::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| SettingKey::StatsBarMode.out_of_range(value as i64))
    }
}

impl From<BarMode> for u8 {
    fn from(mode: BarMode) -> u8 {
        mode.index()
    }
}

/// User settings. Missing or out-of-range keys read back as defaults;
/// unrecognized keys are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_stats_days", deserialize_with = "stats_days_in_range")]
    pub stats_days: i64,
    #[serde(default = "default_todo_purge_days", deserialize_with = "todo_purge_days_in_range")]
    pub todo_purge_days: i64,
    #[serde(default = "default_goal_history_days", deserialize_with = "goal_history_days_in_range")]
    pub goal_history_days: i64,
    #[serde(default, deserialize_with = "or_default")]
    pub stats_bar_mode: BarMode,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            stats_days: default_stats_days(),
            todo_purge_days: default_todo_purge_days(),
            goal_history_days: default_goal_history_days(),
            stats_bar_mode: BarMode::default(),
            extra: IndexMap::new(),
        }
    }
}

/// The recognized settings keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    StatsDays,
    TodoPurgeDays,
    GoalHistoryDays,
    StatsBarMode,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::StatsDays,
        SettingKey::TodoPurgeDays,
        SettingKey::GoalHistoryDays,
        SettingKey::StatsBarMode,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::StatsDays => "stats_days",
            SettingKey::TodoPurgeDays => "todo_purge_days",
            SettingKey::GoalHistoryDays => "goal_history_days",
            SettingKey::StatsBarMode => "stats_bar_mode",
        }
    }

    /// Accepted value range (inclusive)
    pub fn range(self) -> (i64, i64) {
        match self {
            SettingKey::StatsBarMode => (0, 3),
            _ => (1, 365),
        }
    }

    fn out_of_range(self, value: i64) -> SettingError {
        let (min, max) = self.range();
        SettingError::OutOfRange {
            key: self,
            value,
            min,
            max,
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| SettingError::UnknownKey(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingError {
    #[error("unknown setting: {0}")]
    UnknownKey(String),
    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: SettingKey,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> i64 {
        match key {
            SettingKey::StatsDays => self.stats_days,
            SettingKey::TodoPurgeDays => self.todo_purge_days,
            SettingKey::GoalHistoryDays => self.goal_history_days,
            SettingKey::StatsBarMode => self.stats_bar_mode.index() as i64,
        }
    }

    /// Set a recognized key, rejecting values outside its range
    pub fn set(&mut self, key: SettingKey, value: i64) -> Result<(), SettingError> {
        let (lo, hi) = key.range();
        if value < lo || value > hi {
            return Err(key.out_of_range(value));
        }
        match key {
            SettingKey::StatsDays => self.stats_days = value,
            SettingKey::TodoPurgeDays => self.todo_purge_days = value,
            SettingKey::GoalHistoryDays => self.goal_history_days = value,
            SettingKey::StatsBarMode => self.stats_bar_mode = BarMode::ALL[value as usize],
        }
        Ok(())
    }

    /// Advance the stats bar mode, returning the new one
    pub fn cycle_bar_mode(&mut self) -> BarMode {
        self.stats_bar_mode = self.stats_bar_mode.next();
        self.stats_bar_mode
    }
}
