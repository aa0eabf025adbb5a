use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Days, NaiveDate, NaiveDateTime};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::open_session;
use crate::io::store::{LoadOutcome, Store, StoreError};
use crate::model::goal::Goal;
use crate::model::journal::JournalEntry;
use crate::model::mood::{Mood, MoodKind};
use crate::model::settings::SettingKey;
use crate::model::todo::Todo;
use crate::ops::timeline_ops::{self, DayEvent};
use crate::ops::{journal_ops, mood_ops, todo_ops};

use super::input;
use super::render;
use super::theme::Theme;

/// How far back the timeline can be paged with `h`
pub const MAX_DAYS_BACK: u64 = 7;

/// The six panels, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Todos,
    Journal,
    Moods,
    Goals,
    Timeline,
    Stats,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Todos,
        Panel::Journal,
        Panel::Moods,
        Panel::Goals,
        Panel::Timeline,
        Panel::Stats,
    ];

    pub fn index(self) -> usize {
        Panel::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn title(self) -> &'static str {
        match self {
            Panel::Todos => "Todos",
            Panel::Journal => "Journal",
            Panel::Moods => "Moods",
            Panel::Goals => "Goals",
            Panel::Timeline => "Timeline",
            Panel::Stats => "Stats",
        }
    }

    /// Panel for a number key `1`..`6`
    pub fn from_digit(c: char) -> Option<Panel> {
        let n = c.to_digit(10)? as usize;
        Panel::ALL.get(n.checked_sub(1)?).copied()
    }
}

/// What a submitted text prompt does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    AddTodo,
    EditTodo(String),
    AddJournal,
    /// Second step of adding a journal entry
    JournalTitle { content: String },
    EditJournal(String),
    MoodNote(MoodKind),
    AddGoal,
    /// Second step of adding a goal
    GoalDescription { title: String },
    EditGoal(String),
    StartEvent,
    RenameEvent(String),
    EditEventStart(String),
    /// Second step of editing an event's times, with the already parsed start
    EditEventEnd {
        id: String,
        start: Option<NaiveDateTime>,
    },
    Setting(SettingKey),
}

/// Single-line text input shown as a modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub hint: String,
    pub input: String,
    /// Byte offset into `input`
    pub cursor: usize,
    /// Submitting an empty input is allowed (optional fields)
    pub allow_empty: bool,
    pub action: PromptAction,
}

impl Prompt {
    pub fn new(title: impl Into<String>, action: PromptAction) -> Self {
        Prompt {
            title: title.into(),
            hint: String::new(),
            input: String::new(),
            cursor: 0,
            allow_empty: false,
            action,
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Pre-fill the input, cursor at the end
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.input = text.into();
        self.cursor = self.input.len();
        self
    }

    pub fn optional(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Pending yes/no question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    /// End the active event, then ask for the next one
    EndThenStart { id: String, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Prompt(Prompt),
    MoodPicker,
    Confirm(ConfirmAction),
    ExportPicker,
}

/// One-line message in the status row until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub store: Store,
    pub theme: Theme,
    pub panel: Panel,
    pub mode: Mode,
    /// Cursor per panel, indexed by `Panel::index`
    pub cursors: [usize; 6],
    /// Days before today shown on the timeline (0 = today)
    pub timeline_offset: u64,
    pub show_help: bool,
    pub flash: Option<Flash>,
    /// Path of the last export, shown in the stats detail pane
    pub last_export: Option<PathBuf>,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: Store, theme: Theme) -> Self {
        let flash = match store.load_outcome() {
            LoadOutcome::Recovered { backup, .. } => Some(Flash {
                text: format!("data file was unreadable, backed up to {}", backup.display()),
                is_error: true,
            }),
            _ => store.log_error().map(|reason| Flash {
                text: format!("logging disabled: {reason}"),
                is_error: true,
            }),
        };
        App {
            store,
            theme,
            panel: Panel::Todos,
            mode: Mode::Navigate,
            cursors: [0; 6],
            timeline_offset: 0,
            show_help: false,
            flash,
            last_export: None,
            should_quit: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursors[self.panel.index()]
    }

    pub fn set_cursor(&mut self, value: usize) {
        self.cursors[self.panel.index()] = value;
    }

    /// Keep the current panel's cursor inside its list
    pub fn clamp_cursor(&mut self) {
        let len = self.list_len(self.panel);
        let idx = self.panel.index();
        self.cursors[idx] = self.cursors[idx].min(len.saturating_sub(1));
    }

    pub fn list_len(&self, panel: Panel) -> usize {
        let doc = self.store.doc();
        match panel {
            Panel::Todos => doc.todos.len(),
            Panel::Journal => doc.journal.len(),
            Panel::Moods => doc.moods.len(),
            Panel::Goals => doc.goals.len(),
            Panel::Timeline => self.timeline_events().len(),
            Panel::Stats => 0,
        }
    }

    pub fn flash(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn flash_error(&mut self, text: impl Into<String>) {
        self.flash = Some(Flash {
            text: text.into(),
            is_error: true,
        });
    }

    pub fn today(&self) -> NaiveDate {
        self.store.today()
    }

    /// Day shown on the timeline panel
    pub fn timeline_day(&self) -> NaiveDate {
        let today = self.today();
        today
            .checked_sub_days(Days::new(self.timeline_offset))
            .unwrap_or(today)
    }

    // Views over the store, in display order

    pub fn todos(&self) -> Vec<&Todo> {
        todo_ops::sorted_todos(&self.store.doc().todos)
    }

    pub fn journal(&self) -> Vec<&JournalEntry> {
        journal_ops::newest_first(&self.store.doc().journal)
    }

    pub fn mood_groups(&self) -> Vec<(NaiveDate, Vec<&Mood>)> {
        mood_ops::mood_groups(&self.store.doc().moods)
    }

    /// Moods flattened in the order the grouped list shows them
    pub fn moods(&self) -> Vec<&Mood> {
        self.mood_groups()
            .into_iter()
            .flat_map(|(_, moods)| moods)
            .collect()
    }

    pub fn goals(&self) -> &[Goal] {
        &self.store.doc().goals
    }

    pub fn timeline_events(&self) -> Vec<DayEvent<'_>> {
        timeline_ops::events_for_date(
            &self.store.doc().timeline,
            self.timeline_day(),
            self.store.now(),
        )
    }

    // Selection

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.todos().get(self.cursors[Panel::Todos.index()]).copied()
    }

    pub fn selected_journal(&self) -> Option<&JournalEntry> {
        self.journal().get(self.cursors[Panel::Journal.index()]).copied()
    }

    pub fn selected_mood(&self) -> Option<&Mood> {
        self.moods().get(self.cursors[Panel::Moods.index()]).copied()
    }

    pub fn selected_goal(&self) -> Option<&Goal> {
        self.goals().get(self.cursors[Panel::Goals.index()])
    }

    pub fn selected_event(&self) -> Option<DayEvent<'_>> {
        let cursor = self.cursors[Panel::Timeline.index()];
        self.timeline_events().into_iter().nth(cursor)
    }
}

/// Open the store and run the terminal UI until the user quits
pub fn run(data_dir: Option<PathBuf>, profile: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let (mut store, app_config) = open_session(data_dir, profile)?;
    store.purge_old_todos()?;

    let mut app = App::new(store, Theme::from_config(&app_config.ui));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        // The poll timeout also refreshes running durations on screen
        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key).map_err(|e: StoreError| {
                log::error!("giving up after failed save: {e}");
                e
            })?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::paths::StoreConfig;
    use crate::tui::render::test_helpers::{fixed_now, test_app};

    #[test]
    fn panel_digits() {
        assert_eq!(Panel::from_digit('1'), Some(Panel::Todos));
        assert_eq!(Panel::from_digit('6'), Some(Panel::Stats));
        assert_eq!(Panel::from_digit('0'), None);
        assert_eq!(Panel::from_digit('7'), None);
        assert_eq!(Panel::Timeline.index(), 4);
    }

    #[test]
    fn cursor_is_clamped_to_list() {
        let (_tmp, mut app) = test_app();
        app.store.add_todo("one".into(), Default::default()).unwrap();
        app.set_cursor(5);
        app.clamp_cursor();
        assert_eq!(app.cursor(), 0);
        assert_eq!(app.selected_todo().map(|t| t.text.as_str()), Some("one"));
    }

    #[test]
    fn timeline_day_follows_offset() {
        let (_tmp, mut app) = test_app();
        let today = app.today();
        app.timeline_offset = 2;
        assert_eq!(app.timeline_day(), today - chrono::TimeDelta::days(2));
    }

    #[test]
    fn logger_failure_is_flashed_once_at_startup() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = StoreConfig::new(tmp.path(), None).unwrap();
        let mut store = Store::open_with_clock(config, fixed_now);
        store.set_log_error("invalid log level 'loud'".into());
        let app = App::new(store, Theme::default());
        let flash = app.flash.as_ref().unwrap();
        assert!(flash.is_error);
        assert_eq!(flash.text, "logging disabled: invalid log level 'loud'");
    }
}
