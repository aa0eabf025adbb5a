use crossterm::event::{KeyCode, KeyEvent};

use crate::io::export::export_stats;
use crate::io::store::StoreError;
use crate::model::mood::MoodKind;
use crate::ops::export::ExportFormat;
use crate::ops::stats::compute_stats;
use crate::tui::app::{App, ConfirmAction, Mode, Prompt, PromptAction};

pub(super) fn handle_mood_picker(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.mode = Mode::Navigate,
        KeyCode::Char(c @ '1'..='6') => {
            let idx = c as usize - '1' as usize;
            let kind = MoodKind::ALL[idx];
            app.mode = Mode::Prompt(
                Prompt::new(
                    format!("{} {}: add a note", kind.emoji(), kind.label()),
                    PromptAction::MoodNote(kind),
                )
                .hint("Optional, press Enter to skip")
                .optional(),
            );
        }
        _ => {}
    }
    Ok(())
}

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    let Mode::Confirm(action) = &app.mode else {
        return Ok(());
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => match action.clone() {
            ConfirmAction::EndThenStart { id, name } => {
                app.store.end_event(&id)?;
                app.flash(format!("Ended '{name}'"));
                app.mode = Mode::Prompt(
                    Prompt::new("Start Activity", PromptAction::StartEvent)
                        .hint("e.g. Studying, Working, Reading..."),
                );
            }
        },
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.mode = Mode::Navigate,
        _ => {}
    }
    Ok(())
}

pub(super) fn handle_export_picker(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    let format = match key.code {
        KeyCode::Char('1') | KeyCode::Char('t') => ExportFormat::Text,
        KeyCode::Char('2') | KeyCode::Char('m') => ExportFormat::Markdown,
        KeyCode::Esc | KeyCode::Char('q') => {
            app.mode = Mode::Navigate;
            return Ok(());
        }
        _ => return Ok(()),
    };
    app.mode = Mode::Navigate;

    let today = app.today();
    let stats = compute_stats(app.store.doc(), today, app.store.now());
    // A failed export leaves the data file untouched, so it is not fatal
    match export_stats(&app.store.config().exports_dir(), format, &stats, today) {
        Ok(path) => {
            app.flash(format!("Exported to {}", path.display()));
            app.last_export = Some(path);
        }
        Err(e) => {
            log::error!("export failed: {e}");
            app.flash_error(format!("export failed: {e}"));
        }
    }
    Ok(())
}
