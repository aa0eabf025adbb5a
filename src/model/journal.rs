use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A journal entry. `date` is the creation day and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// Optional title shown in the sidebar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub content: String,
    pub date: NaiveDate,
    pub created_at: NaiveDateTime,
}

impl JournalEntry {
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Title for list display
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled")
    }
}
