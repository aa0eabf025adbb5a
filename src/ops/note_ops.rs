use chrono::NaiveDateTime;

use crate::model::note::Note;

use super::{Lookup, new_id, remove_by_id};

pub fn add_note(notes: &mut Vec<Note>, title: String, content: String, now: NaiveDateTime) -> String {
    let id = new_id(|candidate| notes.iter().any(|n| n.id == candidate));
    notes.push(Note {
        id: id.clone(),
        title,
        content,
        created_at: now,
    });
    id
}

pub fn delete_note(notes: &mut Vec<Note>, id: &str) -> Lookup {
    remove_by_id(notes, id, |n| n.id.as_str())
}
