use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::mood::MoodKind;
use crate::model::settings::{BarMode, SettingKey};
use crate::model::todo::Priority;

#[derive(Parser)]
#[command(name = "daybook", about = concat!("daybook v", env!("CARGO_PKG_VERSION"), " - todos, journal, moods, goals and time in one file"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Data directory (default: $DAYBOOK_HOME or ~/.daybook)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Use a named profile instead of the default data file
    #[arg(long, global = true)]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage todos
    Todo(TodoCmd),
    /// Manage journal entries
    Journal(JournalCmd),
    /// Log moods
    Mood(MoodCmd),
    /// Manage goals and check-ins
    Goal(GoalCmd),
    /// Track time spent on activities
    Timeline(TimelineCmd),
    /// Legacy notes
    Note(NoteCmd),
    /// Show aggregate statistics
    Stats(StatsArgs),
    /// Write the stats report to the exports directory
    Export(ExportArgs),
    /// Show or change settings
    Settings(SettingsCmd),
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TodoCmd {
    #[command(subcommand)]
    pub action: TodoAction,
}

#[derive(Subcommand)]
pub enum TodoAction {
    /// List todos, pending first
    List,
    /// Add a todo
    Add {
        text: String,
        /// low, medium or high
        #[arg(short, long, value_parser = parse_priority, default_value = "medium")]
        priority: Priority,
    },
    /// Toggle a todo between done and pending
    Done { id: String },
    /// Replace a todo's text
    Edit { id: String, text: String },
    /// Set a todo's priority, or cycle it when no level is given
    Priority {
        id: String,
        #[arg(value_parser = parse_priority)]
        level: Option<Priority>,
    },
    /// Delete a todo
    Rm { id: String },
    /// Delete done todos older than the purge window
    Purge,
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct JournalCmd {
    #[command(subcommand)]
    pub action: JournalAction,
}

#[derive(Subcommand)]
pub enum JournalAction {
    /// List entries, newest first
    List,
    /// Write a new entry dated today
    Add {
        content: String,
        /// Optional title
        #[arg(long)]
        name: Option<String>,
    },
    /// Change an entry's content or title (an empty title clears it)
    Edit {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete an entry
    Rm { id: String },
}

// ---------------------------------------------------------------------------
// Moods
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct MoodCmd {
    #[command(subcommand)]
    pub action: MoodAction,
}

#[derive(Subcommand)]
pub enum MoodAction {
    /// List moods grouped by day
    List,
    /// Log a mood: amazing, great, good, okay, bad or terrible
    Add {
        #[arg(value_parser = parse_mood)]
        mood: MoodKind,
        /// Optional note
        note: Option<String>,
    },
    /// Delete a mood
    Rm { id: String },
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct GoalCmd {
    #[command(subcommand)]
    pub action: GoalAction,
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// List goals with their streaks
    List,
    /// Add a goal
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Change a goal's title or description
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Toggle a check-in (today unless --date is given)
    Checkin {
        id: String,
        /// Day to toggle (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Show recent check-in history
    History {
        id: String,
        /// Number of days (default: goal_history_days setting)
        #[arg(long)]
        days: Option<u32>,
    },
    /// Delete a goal
    Rm { id: String },
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TimelineCmd {
    #[command(subcommand)]
    pub action: TimelineAction,
}

#[derive(Subcommand)]
pub enum TimelineAction {
    /// Show events for a day, or for several days with --days
    Show {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Show this many days ending today
        #[arg(long, conflicts_with = "date")]
        days: Option<u32>,
    },
    /// Start an activity, ending the running one
    Start { name: String },
    /// End an event (the running one when no id is given)
    End { id: Option<String> },
    /// Rename an event
    Rename { id: String, name: String },
    /// Change an event's start or end (HH:MM on the event's day, or a full timestamp)
    Edit {
        id: String,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    /// Delete an event
    Rm { id: String },
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct NoteCmd {
    #[command(subcommand)]
    pub action: NoteAction,
}

#[derive(Subcommand)]
pub enum NoteAction {
    /// List notes
    List,
    /// Add a note
    Add {
        title: String,
        #[arg(default_value = "")]
        content: String,
    },
    /// Delete a note
    Rm { id: String },
}

// ---------------------------------------------------------------------------
// Stats, export, settings
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct StatsArgs {
    /// Bar mode: 0 logged, 1 window, 2 z-score, 3 min-max (default: setting)
    #[arg(long, value_parser = parse_bar_mode)]
    pub mode: Option<BarMode>,
}

#[derive(Args)]
pub struct ExportArgs {
    #[arg(value_enum)]
    pub format: ExportKind,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportKind {
    Text,
    Md,
}

#[derive(Args)]
pub struct SettingsCmd {
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print all settings
    Show,
    /// Change a setting
    Set {
        #[arg(value_parser = parse_setting_key)]
        key: SettingKey,
        value: i64,
    },
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::parse(s).ok_or_else(|| format!("unknown priority '{s}' (low, medium, high)"))
}

fn parse_mood(s: &str) -> Result<MoodKind, String> {
    MoodKind::parse(s)
        .ok_or_else(|| format!("unknown mood '{s}' (amazing, great, good, okay, bad, terrible)"))
}

fn parse_bar_mode(s: &str) -> Result<BarMode, String> {
    let n: u8 = s.parse().map_err(|_| format!("bar mode must be 0-3, got '{s}'"))?;
    BarMode::try_from(n).map_err(|e| e.to_string())
}

fn parse_setting_key(s: &str) -> Result<SettingKey, String> {
    s.parse::<SettingKey>().map_err(|e| e.to_string())
}
