mod navigate;
mod pickers;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent};

use crate::io::store::StoreError;

use super::app::{App, Mode};

/// Handle a key event in the current mode. Only a failed save is returned as
/// an error; everything else is reported in the status row.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<(), StoreError> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return Ok(());
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Ok(());
    }

    match &app.mode {
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Prompt(_) => prompt::handle_prompt(app, key),
        Mode::MoodPicker => pickers::handle_mood_picker(app, key),
        Mode::Confirm(_) => pickers::handle_confirm(app, key),
        Mode::ExportPicker => pickers::handle_export_picker(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Panel;
    use crate::tui::render::test_helpers::{press, test_app, type_text};

    #[test]
    fn add_todo_through_prompt() {
        let (_tmp, mut app) = test_app();
        press(&mut app, KeyCode::Char('a'));
        assert!(matches!(app.mode, Mode::Prompt(_)));
        type_text(&mut app, "buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.store.doc().todos[0].text, "buy milk");
    }

    #[test]
    fn escape_cancels_prompt() {
        let (_tmp, mut app) = test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "never mind");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.store.doc().todos.is_empty());
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let (_tmp, mut app) = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.panel, Panel::Todos);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
