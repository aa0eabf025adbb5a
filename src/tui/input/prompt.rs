use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::store::StoreError;
use crate::model::settings::SettingKey;
use crate::model::todo::Priority;
use crate::tui::app::{App, Mode, Prompt, PromptAction};
use crate::util::text::{next_boundary, prev_boundary, word_start_before};
use crate::util::time::{fmt_clock, parse_timestamp};

pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    let Mode::Prompt(prompt) = &mut app.mode else {
        return Ok(());
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => app.mode = Mode::Navigate,
        KeyCode::Enter => {
            let prompt = std::mem::replace(&mut app.mode, Mode::Navigate);
            if let Mode::Prompt(prompt) = prompt {
                return submit(app, prompt);
            }
        }
        KeyCode::Char('a') if ctrl => prompt.cursor = 0,
        KeyCode::Char('e') if ctrl => prompt.cursor = prompt.input.len(),
        KeyCode::Char('u') if ctrl => {
            prompt.input.drain(..prompt.cursor);
            prompt.cursor = 0;
        }
        KeyCode::Char('w') if ctrl => {
            let start = word_start_before(&prompt.input, prompt.cursor);
            prompt.input.drain(start..prompt.cursor);
            prompt.cursor = start;
        }
        KeyCode::Char(c) if !ctrl => {
            prompt.input.insert(prompt.cursor, c);
            prompt.cursor += c.len_utf8();
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_boundary(&prompt.input, prompt.cursor) {
                prompt.input.drain(prev..prompt.cursor);
                prompt.cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_boundary(&prompt.input, prompt.cursor) {
                prompt.input.drain(prompt.cursor..next);
            }
        }
        KeyCode::Left => {
            if let Some(prev) = prev_boundary(&prompt.input, prompt.cursor) {
                prompt.cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_boundary(&prompt.input, prompt.cursor) {
                prompt.cursor = next;
            }
        }
        KeyCode::Home => prompt.cursor = 0,
        KeyCode::End => prompt.cursor = prompt.input.len(),
        _ => {}
    }
    Ok(())
}

/// Apply a submitted prompt. Blank input on a required prompt cancels.
fn submit(app: &mut App, prompt: Prompt) -> Result<(), StoreError> {
    let value = prompt.input.trim().to_string();
    if value.is_empty() && !prompt.allow_empty {
        return Ok(());
    }

    match prompt.action {
        PromptAction::AddTodo => {
            app.store.add_todo(value, Priority::default())?;
        }
        PromptAction::EditTodo(id) => {
            app.store.edit_todo(&id, value)?;
        }
        PromptAction::AddJournal => {
            app.mode = Mode::Prompt(
                Prompt::new("Journal Title", PromptAction::JournalTitle { content: value })
                    .hint("Optional, leave empty to skip")
                    .optional(),
            );
        }
        PromptAction::JournalTitle { content } => {
            let name = (!value.is_empty()).then_some(value);
            app.store.add_journal(content, name)?;
        }
        PromptAction::EditJournal(id) => {
            app.store.edit_journal(&id, Some(value), None)?;
        }
        PromptAction::MoodNote(kind) => {
            app.store.add_mood(kind, value)?;
            app.flash(format!("Logged {} {}", kind.emoji(), kind.label()));
        }
        PromptAction::AddGoal => {
            app.mode = Mode::Prompt(
                Prompt::new("Goal Description", PromptAction::GoalDescription { title: value })
                    .hint("Optional, leave empty to skip")
                    .optional(),
            );
        }
        PromptAction::GoalDescription { title } => {
            app.store.add_goal(title, value)?;
        }
        PromptAction::EditGoal(id) => {
            app.store.edit_goal(&id, Some(value), None)?;
        }
        PromptAction::StartEvent => {
            app.store.start_event(value.clone())?;
            app.timeline_offset = 0;
            app.set_cursor(0);
            app.flash(format!("Started '{value}'"));
        }
        PromptAction::RenameEvent(id) => {
            app.store.rename_event(&id, value)?;
        }
        PromptAction::EditEventStart(id) => edit_event_start(app, id, &value)?,
        PromptAction::EditEventEnd { id, start } => edit_event_end(app, id, start, &value)?,
        PromptAction::Setting(key) => change_setting(app, key, &value)?,
    }
    app.clamp_cursor();
    Ok(())
}

/// Times are typed as `HH:MM` on the day the event started
fn event_times(app: &App, id: &str) -> Option<(chrono::NaiveDate, Option<chrono::NaiveDateTime>)> {
    app.store
        .doc()
        .timeline
        .iter()
        .find(|e| e.id == id)
        .map(|e| (e.date, e.end_time))
}

fn edit_event_start(app: &mut App, id: String, value: &str) -> Result<(), StoreError> {
    let Some((day, end)) = event_times(app, &id) else {
        return Ok(());
    };
    let start = match parse_timestamp(value, day) {
        Ok(ts) => ts,
        Err(e) => {
            app.flash_error(e.to_string());
            return Ok(());
        }
    };
    match end {
        Some(end) => {
            app.mode = Mode::Prompt(
                Prompt::new(
                    "Edit End Time",
                    PromptAction::EditEventEnd {
                        id,
                        start: Some(start),
                    },
                )
                .hint("HH:MM")
                .with_text(fmt_clock(end)),
            );
        }
        None => {
            app.store.edit_event_time(&id, Some(start), None)?;
        }
    }
    Ok(())
}

fn edit_event_end(
    app: &mut App,
    id: String,
    start: Option<chrono::NaiveDateTime>,
    value: &str,
) -> Result<(), StoreError> {
    let Some((day, _)) = event_times(app, &id) else {
        return Ok(());
    };
    match parse_timestamp(value, day) {
        Ok(end) => {
            app.store.edit_event_time(&id, start, Some(end))?;
        }
        Err(e) => app.flash_error(e.to_string()),
    }
    Ok(())
}

fn change_setting(app: &mut App, key: SettingKey, value: &str) -> Result<(), StoreError> {
    let Ok(days) = value.parse::<i64>() else {
        app.flash_error(format!("'{value}' is not a whole number"));
        return Ok(());
    };
    match app.store.set_setting(key, days) {
        Ok(()) => {
            app.flash(format!("{key} set to {days}"));
            Ok(())
        }
        Err(StoreError::Setting(e)) => {
            app.flash_error(e.to_string());
            Ok(())
        }
        Err(e) => Err(e),
    }
}
