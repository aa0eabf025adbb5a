//! The on-disk store: one JSON document per profile, rewritten in full after
//! every change.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::io::paths::StoreConfig;
use crate::model::document::Document;
use crate::model::mood::MoodKind;
use crate::model::settings::{BarMode, SettingError, SettingKey};
use crate::model::todo::Priority;
use crate::ops::{Lookup, goal_ops, journal_ops, mood_ops, note_ops, timeline_ops, todo_ops};
use crate::util::time::local_now;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Setting(#[from] SettingError),
}

/// How `load_document` came up with its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No data file yet
    Fresh,
    Loaded,
    /// The file could not be read or parsed; a copy was kept at `backup`
    Recovered { backup: PathBuf, reason: String },
}

/// Read the document at `path`. Never fails: a missing file gives an empty
/// document, and an unreadable one is copied to `backup` first and then
/// replaced by an empty document.
pub fn load_document(path: &Path, backup: &Path) -> (Document, LoadOutcome) {
    if !path.exists() {
        return (Document::default(), LoadOutcome::Fresh);
    }
    let parsed = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str::<Document>(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(doc) => (doc, LoadOutcome::Loaded),
        Err(reason) => {
            if let Err(e) = fs::copy(path, backup) {
                log::error!("could not back up {}: {e}", path.display());
            }
            log::warn!(
                "could not load {} (backed up as {}): {reason}",
                path.display(),
                backup.display()
            );
            (
                Document::default(),
                LoadOutcome::Recovered {
                    backup: backup.to_path_buf(),
                    reason,
                },
            )
        }
    }
}

/// Pretty-print `doc` (2-space indent, non-ASCII kept as is) and replace
/// `path` atomically.
pub fn save_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut ser = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    doc.serialize(&mut ser)?;
    bytes.push(b'\n');

    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    atomic_write(path, &bytes).map_err(write_err)
}

/// Write `content` to `path` through a temp file in the same directory
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Loaded document plus the config it came from. Every mutating method
/// applies the change in memory and saves before returning.
pub struct Store {
    config: StoreConfig,
    doc: Document,
    clock: fn() -> NaiveDateTime,
    outcome: LoadOutcome,
    log_error: Option<String>,
}

impl Store {
    /// Load the profile's document, repairing broken invariants on the way.
    pub fn open(config: StoreConfig) -> Store {
        Store::open_with_clock(config, local_now)
    }

    /// `open` with an injected clock, for deterministic tests
    pub fn open_with_clock(config: StoreConfig, clock: fn() -> NaiveDateTime) -> Store {
        let (mut doc, outcome) = load_document(&config.data_file(), &config.backup_file());
        if let Some(name) = &config.profile {
            doc.profile = Some(name.clone());
        }
        let fixed = doc.normalize();
        if fixed > 0 {
            log::warn!("repaired {fixed} record(s) in {}", config.data_file().display());
        }
        log::info!("loaded {} ({})", config.data_file().display(), doc.summary());
        Store {
            config,
            doc,
            clock,
            outcome,
            log_error: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Why file logging is off for this session, if it failed to start
    pub fn log_error(&self) -> Option<&str> {
        self.log_error.as_deref()
    }

    pub(crate) fn set_log_error(&mut self, reason: String) {
        self.log_error = Some(reason);
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let path = self.config.data_file();
        save_document(&path, &self.doc).inspect_err(|e| log::error!("save failed: {e}"))?;
        log::debug!("saved {}", path.display());
        Ok(())
    }

    fn commit<T>(&mut self, change: impl FnOnce(&mut Document, NaiveDateTime) -> T) -> Result<T, StoreError> {
        let now = self.now();
        let out = change(&mut self.doc, now);
        self.save()?;
        Ok(out)
    }

    /// Like `commit`, but an unknown id changes nothing and skips the save
    fn commit_found<T>(
        &mut self,
        change: impl FnOnce(&mut Document, NaiveDateTime) -> Lookup<T>,
    ) -> Result<Lookup<T>, StoreError> {
        let now = self.now();
        let out = change(&mut self.doc, now);
        if out.is_found() {
            self.save()?;
        }
        Ok(out)
    }

    // Todos

    pub fn add_todo(&mut self, text: String, priority: Priority) -> Result<String, StoreError> {
        self.commit(|doc, now| todo_ops::add_todo(&mut doc.todos, text, priority, now))
    }

    pub fn edit_todo(&mut self, id: &str, text: String) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| todo_ops::edit_todo(&mut doc.todos, id, text))
    }

    pub fn toggle_todo(&mut self, id: &str) -> Result<Lookup<bool>, StoreError> {
        self.commit_found(|doc, now| todo_ops::toggle_todo(&mut doc.todos, id, now))
    }

    pub fn cycle_priority(&mut self, id: &str) -> Result<Lookup<Priority>, StoreError> {
        self.commit_found(|doc, _| todo_ops::cycle_priority(&mut doc.todos, id))
    }

    pub fn set_priority(&mut self, id: &str, priority: Priority) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| todo_ops::set_priority(&mut doc.todos, id, priority))
    }

    pub fn delete_todo(&mut self, id: &str) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| todo_ops::delete_todo(&mut doc.todos, id))
    }

    /// Drop done todos older than the `todo_purge_days` setting. Saves only
    /// when something was removed.
    pub fn purge_old_todos(&mut self) -> Result<usize, StoreError> {
        let days = self.doc.settings.todo_purge_days;
        let now = self.now();
        let removed = todo_ops::purge_old_done(&mut self.doc.todos, days, now);
        if removed > 0 {
            log::info!("purged {removed} done todo(s) older than {days} day(s)");
            self.save()?;
        }
        Ok(removed)
    }

    // Journal

    pub fn add_journal(&mut self, content: String, name: Option<String>) -> Result<String, StoreError> {
        self.commit(|doc, now| journal_ops::add_entry(&mut doc.journal, content, name, now))
    }

    pub fn edit_journal(
        &mut self,
        id: &str,
        content: Option<String>,
        name: Option<String>,
    ) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| journal_ops::edit_entry(&mut doc.journal, id, content, name))
    }

    pub fn delete_journal(&mut self, id: &str) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| journal_ops::delete_entry(&mut doc.journal, id))
    }

    // Moods

    pub fn add_mood(&mut self, mood: MoodKind, note: String) -> Result<String, StoreError> {
        self.commit(|doc, now| mood_ops::add_mood(&mut doc.moods, mood, note, now))
    }

    pub fn delete_mood(&mut self, id: &str) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| mood_ops::delete_mood(&mut doc.moods, id))
    }

    // Goals

    pub fn add_goal(&mut self, title: String, description: String) -> Result<String, StoreError> {
        self.commit(|doc, now| goal_ops::add_goal(&mut doc.goals, title, description, now))
    }

    pub fn edit_goal(
        &mut self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| goal_ops::edit_goal(&mut doc.goals, id, title, description))
    }

    pub fn delete_goal(&mut self, id: &str) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| goal_ops::delete_goal(&mut doc.goals, id))
    }

    /// Toggle a check-in on `day`, today when `None`
    pub fn check_in_goal(&mut self, id: &str, day: Option<NaiveDate>) -> Result<Lookup<bool>, StoreError> {
        self.commit_found(|doc, now| goal_ops::check_in(&mut doc.goals, id, day.unwrap_or(now.date())))
    }

    // Timeline

    pub fn start_event(&mut self, name: String) -> Result<String, StoreError> {
        self.commit(|doc, now| timeline_ops::start_event(&mut doc.timeline, name, now))
    }

    pub fn end_event(&mut self, id: &str) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, now| timeline_ops::end_event(&mut doc.timeline, id, now))
    }

    pub fn rename_event(&mut self, id: &str, name: String) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| timeline_ops::rename_event(&mut doc.timeline, id, name))
    }

    pub fn edit_event_time(
        &mut self,
        id: &str,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| timeline_ops::edit_event_time(&mut doc.timeline, id, start, end))
    }

    pub fn delete_event(&mut self, id: &str) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| timeline_ops::delete_event(&mut doc.timeline, id))
    }

    // Notes

    pub fn add_note(&mut self, title: String, content: String) -> Result<String, StoreError> {
        self.commit(|doc, now| note_ops::add_note(&mut doc.notes, title, content, now))
    }

    pub fn delete_note(&mut self, id: &str) -> Result<Lookup, StoreError> {
        self.commit_found(|doc, _| note_ops::delete_note(&mut doc.notes, id))
    }

    // Settings

    /// Validate and store a setting. Changing the purge window purges right
    /// away.
    pub fn set_setting(&mut self, key: SettingKey, value: i64) -> Result<(), StoreError> {
        self.doc.settings.set(key, value)?;
        self.save()?;
        if key == SettingKey::TodoPurgeDays {
            self.purge_old_todos()?;
        }
        Ok(())
    }

    pub fn cycle_bar_mode(&mut self) -> Result<BarMode, StoreError> {
        self.commit(|doc, _| doc.settings.cycle_bar_mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn store_in(tmp: &TempDir) -> Store {
        let cfg = StoreConfig::new(tmp.path(), None).unwrap();
        Store::open_with_clock(cfg, fixed_now)
    }

    #[test]
    fn missing_file_is_fresh() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        assert_eq!(store.load_outcome(), &LoadOutcome::Fresh);
        assert_eq!(store.doc(), &Document::default());
        assert!(!tmp.path().join("data.json").exists());
    }

    #[test]
    fn mutations_write_through() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        let id = store.add_todo("water plants".into(), Priority::High).unwrap();

        let text = fs::read_to_string(tmp.path().join("data.json")).unwrap();
        assert!(text.contains("water plants"));
        assert!(text.contains("  \"todos\": ["));

        let reopened = store_in(&tmp);
        assert_eq!(reopened.doc().todos[0].id, id);
        assert_eq!(reopened.doc().todos[0].created_at, fixed_now());
    }

    #[test]
    fn corrupt_file_is_backed_up() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("data.json"), "{ not json").unwrap();
        let store = store_in(&tmp);
        assert!(matches!(store.load_outcome(), LoadOutcome::Recovered { .. }));
        assert_eq!(store.doc().todos.len(), 0);
        let backup = fs::read_to_string(tmp.path().join("data.json.bak")).unwrap();
        assert_eq!(backup, "{ not json");
    }

    #[test]
    fn unknown_id_does_not_save() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        assert_eq!(store.toggle_todo("nope").unwrap(), Lookup::NotFound);
        assert!(!tmp.path().join("data.json").exists());
    }

    #[test]
    fn non_ascii_is_written_literally() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        store.add_mood(MoodKind::Great, "café ☕".into()).unwrap();
        let text = fs::read_to_string(tmp.path().join("data.json")).unwrap();
        assert!(text.contains("café ☕"));
    }

    #[test]
    fn named_profile_is_recorded() {
        let tmp = TempDir::new().unwrap();
        let cfg = StoreConfig::new(tmp.path(), Some("work".into())).unwrap();
        let mut store = Store::open_with_clock(cfg, fixed_now);
        store.add_note("standup".into(), String::new()).unwrap();
        let path = tmp.path().join("profiles/work/data.json");
        let text = fs::read_to_string(path).unwrap();
        assert!(text.contains("\"profile\": \"work\""));
    }

    #[test]
    fn purge_setting_triggers_purge() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        let id = store.add_todo("old".into(), Priority::Low).unwrap();
        store.toggle_todo(&id).unwrap();
        store.doc.todos[0].done_at = Some(fixed_now() - chrono::TimeDelta::days(3));

        store.set_setting(SettingKey::TodoPurgeDays, 5).unwrap();
        assert_eq!(store.doc().todos.len(), 1);
        store.set_setting(SettingKey::TodoPurgeDays, 2).unwrap();
        assert!(store.doc().todos.is_empty());

        let err = store.set_setting(SettingKey::StatsDays, 0).unwrap_err();
        assert!(matches!(err, StoreError::Setting(_)));
    }

    #[test]
    fn absurd_stored_settings_do_not_crash_purge_or_stats() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("data.json"),
            r#"{
  "settings": {"todo_purge_days": 100000000, "stats_days": 1000000000000000000},
  "todos": [{"id": "t1", "text": "old", "done": true, "priority": "low",
             "created_at": "2026-01-01T09:00:00", "done_at": "2026-02-01T09:00:00"}],
  "timeline": [{"id": "e1", "name": "Work", "date": "2026-02-19",
                "start_time": "2026-02-19T09:00:00", "end_time": "2026-02-19T11:00:00"}]
}"#,
        )
        .unwrap();
        let mut store = store_in(&tmp);
        assert_eq!(store.load_outcome(), &LoadOutcome::Loaded);
        assert_eq!(store.doc().settings.todo_purge_days, 7);
        assert_eq!(store.doc().settings.stats_days, 7);

        assert_eq!(store.purge_old_todos().unwrap(), 1);
        let stats = crate::ops::stats::compute_stats(store.doc(), store.today(), fixed_now());
        let pcts: Vec<u8> = crate::ops::stats::bar_percentages(&stats, BarMode::Window)
            .iter()
            .map(|b| b.pct)
            .collect();
        assert_eq!(pcts, vec![1]);
    }

    #[test]
    fn check_in_defaults_to_today() {
        let tmp = TempDir::new().unwrap();
        let mut store = store_in(&tmp);
        let id = store.add_goal("Stretch".into(), String::new()).unwrap();
        assert_eq!(store.check_in_goal(&id, None).unwrap(), Lookup::Found(true));
        assert!(store.doc().goals[0].is_checked_in(store.today()));
    }
}
