use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Panel};

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    // Context-sensitive help
    lines.push(Line::from(Span::styled(
        format!(" {}", app.panel.title()),
        header_style,
    )));
    let panel_keys: &[(&str, &str)] = match app.panel {
        Panel::Todos => &[
            (" a", "Add todo"),
            (" e", "Edit text"),
            (" Space", "Toggle done"),
            (" p", "Cycle priority"),
            (" d", "Delete"),
            (" s", "Days before done todos are purged"),
        ],
        Panel::Journal => &[
            (" a", "Write entry (then optional title)"),
            (" e", "Edit content"),
            (" d", "Delete"),
        ],
        Panel::Moods => &[(" a", "Log mood (1-6, then optional note)"), (" d", "Delete")],
        Panel::Goals => &[
            (" a", "Add goal"),
            (" e", "Edit title"),
            (" Space", "Check in today / undo"),
            (" d", "Delete"),
            (" s", "Days shown in history"),
        ],
        Panel::Timeline => &[
            (" a", "Start activity"),
            (" Space", "End running activity"),
            (" e", "Edit start/end time"),
            (" r", "Rename"),
            (" d", "Delete"),
            (" \u{2190}\u{2192}/hl", "Previous/next day"),
        ],
        Panel::Stats => &[
            (" t", "Cycle bar scaling"),
            (" x", "Export report"),
            (" s", "Days in stats window"),
        ],
    };
    for (key, desc) in panel_keys {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(
        &mut lines,
        " \u{2191}\u{2193}/jk",
        "Move cursor up/down",
        key_style,
        desc_style,
    );
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    add_binding(&mut lines, " 1-6", "Switch panel", key_style, desc_style);
    add_binding(&mut lines, " Tab", "Next panel", key_style, desc_style);
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Cancel prompt / close", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
