use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::store::StoreError;
use crate::model::settings::SettingKey;
use crate::tui::app::{App, ConfirmAction, MAX_DAYS_BACK, Mode, Panel, Prompt, PromptAction};
use crate::util::time::fmt_clock;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    app.flash = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('c') {
            app.should_quit = true;
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char(c @ '1'..='6') => {
            if let Some(panel) = Panel::from_digit(c) {
                app.panel = panel;
                app.clamp_cursor();
            }
        }
        KeyCode::Tab => switch_panel_by(app, 1),
        KeyCode::BackTab => switch_panel_by(app, Panel::ALL.len() - 1),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.set_cursor(0),
        KeyCode::Char('G') | KeyCode::End => {
            let len = app.list_len(app.panel);
            app.set_cursor(len.saturating_sub(1));
        }
        KeyCode::Char('a') => add_item(app),
        KeyCode::Char('e') => edit_item(app),
        KeyCode::Char('r') => rename_event(app),
        KeyCode::Char('d') => delete_item(app)?,
        KeyCode::Char(' ') => toggle_item(app)?,
        KeyCode::Char('p') => cycle_priority(app)?,
        KeyCode::Char('h') | KeyCode::Left => shift_timeline_day(app, true),
        KeyCode::Char('l') | KeyCode::Right => shift_timeline_day(app, false),
        KeyCode::Char('s') => change_setting(app),
        KeyCode::Char('t') => cycle_bar_mode(app)?,
        KeyCode::Char('x') => {
            if app.panel == Panel::Stats {
                app.mode = Mode::ExportPicker;
            }
        }
        _ => {}
    }
    Ok(())
}

fn switch_panel_by(app: &mut App, step: usize) {
    let next = (app.panel.index() + step) % Panel::ALL.len();
    app.panel = Panel::ALL[next];
    app.clamp_cursor();
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.list_len(app.panel);
    if len == 0 {
        return;
    }
    let next = app.cursor().saturating_add_signed(delta).min(len - 1);
    app.set_cursor(next);
}

fn add_item(app: &mut App) {
    let prompt = match app.panel {
        Panel::Todos => Prompt::new("Add Todo", PromptAction::AddTodo).hint("What do you need to do?"),
        Panel::Journal => {
            Prompt::new("New Journal Entry", PromptAction::AddJournal).hint("Write your thoughts...")
        }
        Panel::Moods => {
            app.mode = Mode::MoodPicker;
            return;
        }
        Panel::Goals => Prompt::new("Add Goal", PromptAction::AddGoal)
            .hint("Goal title (e.g. Read daily, Exercise, Meditate)"),
        Panel::Timeline => {
            if let Some(active) = crate::ops::timeline_ops::active_event(&app.store.doc().timeline) {
                app.mode = Mode::Confirm(ConfirmAction::EndThenStart {
                    id: active.id.clone(),
                    name: active.name.clone(),
                });
                return;
            }
            Prompt::new("Start Activity", PromptAction::StartEvent)
                .hint("e.g. Studying, Working, Reading...")
        }
        Panel::Stats => return,
    };
    app.mode = Mode::Prompt(prompt);
}

fn edit_item(app: &mut App) {
    let prompt = match app.panel {
        Panel::Todos => app.selected_todo().map(|t| {
            Prompt::new("Edit Todo", PromptAction::EditTodo(t.id.clone())).with_text(&t.text)
        }),
        Panel::Journal => app.selected_journal().map(|e| {
            Prompt::new("Edit Journal Entry", PromptAction::EditJournal(e.id.clone()))
                .with_text(&e.content)
        }),
        Panel::Goals => app.selected_goal().map(|g| {
            Prompt::new("Edit Goal Title", PromptAction::EditGoal(g.id.clone())).with_text(&g.title)
        }),
        Panel::Timeline => app.selected_event().map(|de| {
            Prompt::new("Edit Start Time", PromptAction::EditEventStart(de.event.id.clone()))
                .hint("HH:MM")
                .with_text(fmt_clock(de.event.start_time))
        }),
        Panel::Moods | Panel::Stats => None,
    };
    if let Some(prompt) = prompt {
        app.mode = Mode::Prompt(prompt);
    }
}

fn rename_event(app: &mut App) {
    if app.panel != Panel::Timeline {
        return;
    }
    if let Some(de) = app.selected_event() {
        let prompt = Prompt::new("Rename Activity", PromptAction::RenameEvent(de.event.id.clone()))
            .with_text(&de.event.name);
        app.mode = Mode::Prompt(prompt);
    }
}

fn delete_item(app: &mut App) -> Result<(), StoreError> {
    match app.panel {
        Panel::Todos => {
            if let Some(id) = app.selected_todo().map(|t| t.id.clone()) {
                app.store.delete_todo(&id)?;
            }
        }
        Panel::Journal => {
            if let Some(id) = app.selected_journal().map(|e| e.id.clone()) {
                app.store.delete_journal(&id)?;
            }
        }
        Panel::Moods => {
            if let Some(id) = app.selected_mood().map(|m| m.id.clone()) {
                app.store.delete_mood(&id)?;
            }
        }
        Panel::Goals => {
            if let Some(id) = app.selected_goal().map(|g| g.id.clone()) {
                app.store.delete_goal(&id)?;
            }
        }
        Panel::Timeline => {
            if let Some(id) = app.selected_event().map(|de| de.event.id.clone()) {
                app.store.delete_event(&id)?;
            }
        }
        Panel::Stats => {}
    }
    app.clamp_cursor();
    Ok(())
}

fn toggle_item(app: &mut App) -> Result<(), StoreError> {
    match app.panel {
        Panel::Todos => {
            if let Some(id) = app.selected_todo().map(|t| t.id.clone()) {
                app.store.toggle_todo(&id)?;
            }
        }
        Panel::Goals => {
            if let Some(id) = app.selected_goal().map(|g| g.id.clone()) {
                app.store.check_in_goal(&id, None)?;
            }
        }
        Panel::Timeline => {
            let active = crate::ops::timeline_ops::active_event(&app.store.doc().timeline)
                .map(|e| (e.id.clone(), e.name.clone()));
            if let Some((id, name)) = active {
                app.store.end_event(&id)?;
                app.flash(format!("Ended '{name}'"));
            }
        }
        _ => {}
    }
    Ok(())
}

fn cycle_priority(app: &mut App) -> Result<(), StoreError> {
    if app.panel != Panel::Todos {
        return Ok(());
    }
    if let Some(id) = app.selected_todo().map(|t| t.id.clone()) {
        app.store.cycle_priority(&id)?;
    }
    Ok(())
}

fn shift_timeline_day(app: &mut App, back: bool) {
    if app.panel != Panel::Timeline {
        return;
    }
    app.timeline_offset = if back {
        (app.timeline_offset + 1).min(MAX_DAYS_BACK)
    } else {
        app.timeline_offset.saturating_sub(1)
    };
    app.set_cursor(0);
}

fn change_setting(app: &mut App) {
    let (key, title, hint) = match app.panel {
        Panel::Todos => (
            SettingKey::TodoPurgeDays,
            "Todo Auto-Purge Days",
            "done todos older than this are deleted",
        ),
        Panel::Goals => (
            SettingKey::GoalHistoryDays,
            "Goal History Window",
            "number of days to show",
        ),
        Panel::Stats => (
            SettingKey::StatsDays,
            "Stats Tracking Days",
            "enter new number of days",
        ),
        _ => return,
    };
    let current = app.store.doc().settings.get(key);
    let prompt = Prompt::new(title, PromptAction::Setting(key)).hint(format!("Current: {current}, {hint}"));
    app.mode = Mode::Prompt(prompt);
}

fn cycle_bar_mode(app: &mut App) -> Result<(), StoreError> {
    if app.panel != Panel::Stats {
        return Ok(());
    }
    let mode = app.store.cycle_bar_mode()?;
    app.flash(format!("Bars relative to {}", mode.label()));
    Ok(())
}
