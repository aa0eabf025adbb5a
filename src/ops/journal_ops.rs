use chrono::NaiveDateTime;

use crate::model::journal::JournalEntry;

use super::{Lookup, new_id, remove_by_id};

/// Append an entry dated today. An empty name is stored as no name.
pub fn add_entry(
    entries: &mut Vec<JournalEntry>,
    content: String,
    name: Option<String>,
    now: NaiveDateTime,
) -> String {
    let id = new_id(|candidate| entries.iter().any(|e| e.id == candidate));
    entries.push(JournalEntry {
        id: id.clone(),
        name: name.filter(|n| !n.trim().is_empty()),
        content,
        date: now.date(),
        created_at: now,
    });
    id
}

/// Update content and/or name. `Some("")` clears the name. The entry's date
/// never changes.
pub fn edit_entry(
    entries: &mut [JournalEntry],
    id: &str,
    content: Option<String>,
    name: Option<String>,
) -> Lookup {
    let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
        return Lookup::NotFound;
    };
    if let Some(content) = content {
        entry.content = content;
    }
    if let Some(name) = name {
        entry.name = Some(name).filter(|n| !n.trim().is_empty());
    }
    Lookup::Found(())
}

pub fn delete_entry(entries: &mut Vec<JournalEntry>, id: &str) -> Lookup {
    remove_by_id(entries, id, |e| e.id.as_str())
}

/// Entries newest first (reverse insertion order)
pub fn newest_first(entries: &[JournalEntry]) -> Vec<&JournalEntry> {
    entries.iter().rev().collect()
}

pub fn total_words(entries: &[JournalEntry]) -> usize {
    entries.iter().map(JournalEntry::word_count).sum()
}
