use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Free-form note from older data files. Still loaded and saved so nothing
/// is lost, but only reachable from the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub created_at: NaiveDateTime,
}
