use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::model::goal::Goal;
use crate::model::mood::Mood;
use crate::model::todo::Priority;
use crate::ops::goal_ops;
use crate::ops::stats::{Bar, Stats};
use crate::ops::timeline_ops::DayEvent;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct IdJson {
    pub id: String,
}

#[derive(Serialize)]
pub struct ToggleJson {
    pub id: String,
    /// Resulting state: done for todos, checked in for goals
    pub value: bool,
}

#[derive(Serialize)]
pub struct PriorityJson {
    pub id: String,
    pub priority: Priority,
}

#[derive(Serialize)]
pub struct GoalJson<'a> {
    #[serde(flatten)]
    pub goal: &'a Goal,
    pub streak: u32,
    pub checked_today: bool,
}

impl<'a> GoalJson<'a> {
    pub fn new(goal: &'a Goal, today: NaiveDate) -> Self {
        GoalJson {
            goal,
            streak: goal_ops::streak(goal, today),
            checked_today: goal.is_checked_in(today),
        }
    }
}

#[derive(Serialize)]
pub struct GoalHistoryJson {
    pub id: String,
    pub completion_rate: u32,
    pub days: Vec<HistoryDayJson>,
}

#[derive(Serialize)]
pub struct HistoryDayJson {
    pub date: NaiveDate,
    pub checked_in: bool,
}

#[derive(Serialize)]
pub struct MoodDayJson<'a> {
    pub date: NaiveDate,
    pub moods: Vec<&'a Mood>,
}

#[derive(Serialize)]
pub struct TimelineDayJson {
    pub date: NaiveDate,
    pub total_minutes: f64,
    pub events: Vec<DayEventJson>,
}

#[derive(Serialize)]
pub struct DayEventJson {
    pub id: String,
    pub name: String,
    pub start_time: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    pub day_start: NaiveDateTime,
    pub day_end: NaiveDateTime,
    pub day_minutes: f64,
    pub total_minutes: f64,
    pub spillover: bool,
    pub active: bool,
}

impl From<&DayEvent<'_>> for DayEventJson {
    fn from(de: &DayEvent<'_>) -> Self {
        DayEventJson {
            id: de.event.id.clone(),
            name: de.event.name.clone(),
            start_time: de.event.start_time,
            end_time: de.event.end_time,
            day_start: de.day_start,
            day_end: de.day_end,
            day_minutes: de.day_minutes(),
            total_minutes: de.total_minutes(),
            spillover: de.is_spillover,
            active: de.is_active(),
        }
    }
}

#[derive(Serialize)]
pub struct StatsJson<'a> {
    #[serde(flatten)]
    pub stats: &'a Stats,
    pub bar_mode: u8,
    pub bar_mode_label: &'static str,
    pub bars: Vec<Bar<'a>>,
}

#[derive(Serialize)]
pub struct ExportJson {
    pub path: String,
}

#[derive(Serialize)]
pub struct PurgeJson {
    pub removed: usize,
}
