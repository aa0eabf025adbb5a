pub mod detail;
pub mod help_overlay;
pub mod helpers;
pub mod modal;
pub mod sidebar;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: tab bar (2 rows) | content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tabs + separator
            Constraint::Min(1),    // list + detail
            Constraint::Length(1), // status row
        ])
        .split(area);

    tab_bar::render_tab_bar(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);
    sidebar::render_sidebar(frame, app, body[0]);
    detail::render_detail(frame, app, body[1]);

    status_row::render_status_row(frame, app, chunks[2]);

    // Overlays on top of everything
    match &app.mode {
        Mode::Navigate => {}
        Mode::Prompt(prompt) => modal::render_prompt(frame, app, prompt, area),
        Mode::MoodPicker => modal::render_mood_picker(frame, app, area),
        Mode::Confirm(action) => modal::render_confirm(frame, app, action, area),
        Mode::ExportPicker => modal::render_export_picker(frame, app, area),
    }
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }
}
