use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::lenient::or_default;

/// Mood labels, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKind {
    Amazing,
    Great,
    Good,
    #[default]
    Okay,
    Bad,
    Terrible,
}

impl MoodKind {
    /// Picker order (key `1` = amazing … `6` = terrible)
    pub const ALL: [MoodKind; 6] = [
        MoodKind::Amazing,
        MoodKind::Great,
        MoodKind::Good,
        MoodKind::Okay,
        MoodKind::Bad,
        MoodKind::Terrible,
    ];

    /// Score used for averages: terrible = 0 … amazing = 5
    pub fn score(self) -> u8 {
        match self {
            MoodKind::Amazing => 5,
            MoodKind::Great => 4,
            MoodKind::Good => 3,
            MoodKind::Okay => 2,
            MoodKind::Bad => 1,
            MoodKind::Terrible => 0,
        }
    }

    /// Inverse of `score`, clamping out-of-range values
    pub fn from_score(score: u8) -> MoodKind {
        match score {
            0 => MoodKind::Terrible,
            1 => MoodKind::Bad,
            2 => MoodKind::Okay,
            3 => MoodKind::Good,
            4 => MoodKind::Great,
            _ => MoodKind::Amazing,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoodKind::Amazing => "Amazing",
            MoodKind::Great => "Great",
            MoodKind::Good => "Good",
            MoodKind::Okay => "Okay",
            MoodKind::Bad => "Bad",
            MoodKind::Terrible => "Terrible",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodKind::Amazing => "🤩",
            MoodKind::Great => "😊",
            MoodKind::Good => "🙂",
            MoodKind::Okay => "😐",
            MoodKind::Bad => "😔",
            MoodKind::Terrible => "😢",
        }
    }

    pub fn parse(s: &str) -> Option<MoodKind> {
        MoodKind::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
    }
}

/// A logged mood. Never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub id: String,
    #[serde(default, deserialize_with = "or_default")]
    pub mood: MoodKind,
    #[serde(default)]
    pub note: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_round_trips_through_from_score() {
        for kind in MoodKind::ALL {
            assert_eq!(MoodKind::from_score(kind.score()), kind);
        }
        assert_eq!(MoodKind::from_score(9), MoodKind::Amazing);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(MoodKind::parse("GREAT"), Some(MoodKind::Great));
        assert_eq!(MoodKind::parse("meh"), None);
    }

    #[test]
    fn unknown_mood_label_reads_as_okay() {
        let json = r#"{"id":"m1","mood":"ecstatic","date":"2026-02-20","created_at":"2026-02-20T09:00:00"}"#;
        let mood: Mood = serde_json::from_str(json).unwrap();
        assert_eq!(mood.mood, MoodKind::Okay);
        assert_eq!(mood.note, "");
    }

    #[test]
    fn missing_mood_key_reads_as_okay() {
        let json = r#"{"id":"m1","note":"tired","date":"2026-02-20","created_at":"2026-02-20T09:00:00"}"#;
        let mood: Mood = serde_json::from_str(json).unwrap();
        assert_eq!(mood.mood, MoodKind::Okay);
        assert_eq!(mood.note, "tired");
    }
}
