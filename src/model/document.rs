use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::goal::Goal;
use super::journal::JournalEntry;
use super::lenient::or_default;
use super::mood::Mood;
use super::note::Note;
use super::settings::Settings;
use super::timeline::TimelineEvent;
use super::todo::Todo;

/// The whole on-disk data file.
///
/// Every collection defaults to empty so older files load. Top-level keys
/// this version does not know about are kept in `extra` and written back in
/// their original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default)]
    pub todos: Vec<Todo>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub moods: Vec<Mood>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default, deserialize_with = "or_default")]
    pub settings: Settings,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Document {
    /// Repair records that break an invariant, returning how many were touched.
    ///
    /// - a done todo without `done_at` gets its `created_at`; a pending todo
    ///   loses any stale `done_at`
    /// - when several events are open, all but the latest-started one are
    ///   closed at the moment the latest one began
    pub fn normalize(&mut self) -> usize {
        let mut fixed = 0;

        for todo in &mut self.todos {
            match (todo.done, todo.done_at) {
                (true, None) => {
                    todo.done_at = Some(todo.created_at);
                    fixed += 1;
                }
                (false, Some(_)) => {
                    todo.done_at = None;
                    fixed += 1;
                }
                _ => {}
            }
        }

        let latest_open = self
            .timeline
            .iter()
            .filter(|ev| ev.is_active())
            .max_by_key(|ev| ev.start_time)
            .map(|ev| (ev.id.clone(), ev.start_time));
        if let Some((keep_id, cutoff)) = latest_open {
            for ev in &mut self.timeline {
                if ev.is_active() && ev.id != keep_id {
                    ev.end_time = Some(cutoff.max(ev.start_time));
                    fixed += 1;
                }
            }
        }

        fixed
    }

    /// Record counts per collection, for log lines
    pub fn summary(&self) -> String {
        format!(
            "todos={} journal={} moods={} goals={} timeline={} notes={}",
            self.todos.len(),
            self.journal.len(),
            self.moods.len(),
            self.goals.len(),
            self.timeline.len(),
            self.notes.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn empty_object_backfills_everything() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Document::default());
        assert_eq!(doc.settings.stats_days, 7);
    }

    #[test]
    fn non_object_settings_fall_back_to_defaults() {
        let doc: Document = serde_json::from_str(r#"{"settings": null}"#).unwrap();
        assert_eq!(doc.settings, Settings::default());
        let doc: Document = serde_json::from_str(r#"{"settings": [1, 2]}"#).unwrap();
        assert_eq!(doc.settings, Settings::default());
    }

    #[test]
    fn legacy_keys_are_preserved_in_order() {
        let json = r#"{"todos": [], "habits": [{"name": "run"}], "zzz": 1}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = doc.extra.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["habits", "zzz"]);

        let out = serde_json::to_value(&doc).unwrap();
        assert_eq!(out["habits"][0]["name"], "run");
    }

    #[test]
    fn normalize_repairs_done_at() {
        let json = r#"{"todos": [
            {"id":"a","text":"done no stamp","done":true,"priority":"low","created_at":"2026-02-01T10:00:00"},
            {"id":"b","text":"pending with stamp","done":false,"priority":"low","created_at":"2026-02-01T10:00:00","done_at":"2026-02-02T10:00:00"}
        ]}"#;
        let mut doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.normalize(), 2);
        assert_eq!(doc.todos[0].done_at, Some(ts("2026-02-01T10:00:00")));
        assert_eq!(doc.todos[1].done_at, None);
        assert_eq!(doc.normalize(), 0);
    }

    #[test]
    fn normalize_leaves_one_open_event() {
        let json = r#"{"timeline": [
            {"id":"a","name":"Work","date":"2026-02-20","start_time":"2026-02-20T09:00:00","end_time":null},
            {"id":"b","name":"Lunch","date":"2026-02-20","start_time":"2026-02-20T12:00:00","end_time":null}
        ]}"#;
        let mut doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.normalize(), 1);
        assert_eq!(doc.timeline[0].end_time, Some(ts("2026-02-20T12:00:00")));
        assert!(doc.timeline[1].is_active());
    }
}
