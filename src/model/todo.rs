use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::lenient::or_default;

/// Todo priority. Unknown labels in stored data read back as `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Cycle order used by `cycle_priority`
    pub const CYCLE: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Next priority in the cycle: low → medium → high → low
    pub fn next(self) -> Priority {
        let idx = Self::CYCLE.iter().position(|p| *p == self).unwrap_or(1);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    /// Sort rank for pending todos (high first)
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Single-letter badge shown in lists
    pub fn letter(self) -> char {
        match self {
            Priority::Low => 'L',
            Priority::Medium => 'M',
            Priority::High => 'H',
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "l" => Some(Priority::Low),
            "medium" | "med" | "m" => Some(Priority::Medium),
            "high" | "h" => Some(Priority::High),
            _ => None,
        }
    }
}

/// A todo item. `done_at` is set exactly when `done` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, deserialize_with = "or_default")]
    pub priority: Priority,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub done_at: Option<NaiveDateTime>,
}

impl Todo {
    /// Completion time used for ordering and purging
    pub fn completed_or_created(&self) -> NaiveDateTime {
        self.done_at.unwrap_or(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_cycle_wraps() {
        assert_eq!(Priority::Medium.next(), Priority::High);
        assert_eq!(Priority::High.next(), Priority::Low);
        assert_eq!(Priority::Low.next(), Priority::Medium);
    }

    #[test]
    fn unknown_priority_reads_as_medium() {
        let json = r#"{"id":"a1","text":"x","done":false,"priority":"urgent","created_at":"2026-02-20T10:00:00"}"#;
        let todo: Todo = serde_json::from_str(json).unwrap();
        assert_eq!(todo.priority, Priority::Medium);
        assert_eq!(todo.done_at, None);
    }

    #[test]
    fn parse_priority_aliases() {
        assert_eq!(Priority::parse("H"), Some(Priority::High));
        assert_eq!(Priority::parse("med"), Some(Priority::Medium));
        assert_eq!(Priority::parse("urgent"), None);
    }
}
