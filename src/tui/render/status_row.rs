use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::helpers::left_right_line;
use crate::tui::app::{App, Mode, Panel};

/// Render the status row (bottom of screen): the flash message if any, key
/// hints for the current panel otherwise
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;

    let left = match &app.flash {
        Some(flash) => {
            let fg = if flash.is_error { app.theme.red } else { app.theme.green };
            vec![Span::styled(format!(" {}", flash.text), Style::default().fg(fg).bg(bg))]
        }
        None => vec![Span::styled(
            format!(" {}", panel_hints(app)),
            Style::default().fg(app.theme.dim).bg(bg),
        )],
    };
    let right = Span::styled("? help  q quit ", Style::default().fg(app.theme.dim).bg(bg));

    let line = if matches!(app.mode, Mode::Navigate) {
        left_right_line(left, right, width, bg_style)
    } else {
        Line::from(left)
    };
    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn panel_hints(app: &App) -> &'static str {
    match app.panel {
        Panel::Todos => "a add  e edit  space done  p priority  d delete  s purge days",
        Panel::Journal => "a write  e edit  d delete",
        Panel::Moods => "a log mood  d delete",
        Panel::Goals => "a add  e edit  space check in  d delete  s history days",
        Panel::Timeline => "a start  space end  e times  r rename  d delete  h/l day",
        Panel::Stats => "t bar mode  x export  s window days",
    }
}
