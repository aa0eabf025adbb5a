use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A tracked activity. `date` is the day the event started on; an event with
/// no `end_time` is the active one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEvent")]
pub struct TimelineEvent {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub start_time: NaiveDateTime,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

/// On-disk shape. Records written without a `date` take the day of
/// `start_time`.
#[derive(Deserialize)]
struct StoredEvent {
    id: String,
    name: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    start_time: NaiveDateTime,
    #[serde(default)]
    end_time: Option<NaiveDateTime>,
}

impl From<StoredEvent> for TimelineEvent {
    fn from(raw: StoredEvent) -> Self {
        TimelineEvent {
            date: raw.date.unwrap_or_else(|| raw.start_time.date()),
            id: raw.id,
            name: raw.name,
            start_time: raw.start_time,
            end_time: raw.end_time,
        }
    }
}

impl TimelineEvent {
    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// End time, treating a still-running event as ending at `now`
    pub fn effective_end(&self, now: NaiveDateTime) -> NaiveDateTime {
        self.end_time.unwrap_or(now)
    }

    /// Full, unclamped duration in minutes. Negative if the end was edited
    /// to fall before the start.
    pub fn total_minutes(&self, now: NaiveDateTime) -> f64 {
        minutes_between(self.start_time, self.effective_end(now))
    }
}

pub(crate) fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    (end - start).num_seconds() as f64 / 60.0
}
