use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::help_overlay::centered_rect;
use super::helpers::dim_style;
use crate::model::mood::MoodKind;
use crate::tui::app::{App, ConfirmAction, Prompt};
use crate::util::text::width_before;

/// Fixed-height box, horizontally centered at `percent_x` of the screen
fn modal_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let column = centered_rect(percent_x, 100, area);
    let height = height.min(area.height);
    Rect {
        x: column.x,
        y: area.y + (area.height - height) / 2,
        width: column.width,
        height,
    }
}

fn modal_block<'a>(app: &App, title: String) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(
            Style::default()
                .fg(app.theme.selection_border)
                .bg(app.theme.background),
        )
        .style(Style::default().bg(app.theme.background))
}

/// Single-line text prompt with a visible cursor
pub fn render_prompt(frame: &mut Frame, app: &App, prompt: &Prompt, area: Rect) {
    let rect = modal_area(area, 60, 5);
    frame.render_widget(Clear, rect);
    let block = modal_block(app, prompt.title.clone());
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let width = inner.width.saturating_sub(2) as usize;
    // Keep the cursor visible in long input by scrolling horizontally
    let cursor_col = width_before(&prompt.input, prompt.cursor);
    let scroll = cursor_col.saturating_sub(width.saturating_sub(1));

    let text_style = Style::default().fg(app.theme.text_bright).bg(app.theme.background);
    let lines = vec![
        Line::from(Span::styled(format!(" {}", prompt.input), text_style)),
        Line::from(""),
        Line::from(Span::styled(format!(" {}", prompt.hint), dim_style(app))),
    ];
    let input = Paragraph::new(lines).scroll((0, scroll.min(u16::MAX as usize) as u16));
    frame.render_widget(input, inner);

    if inner.width > 0 && inner.height > 0 {
        let x = inner.x + (1 + cursor_col - scroll).min(inner.width as usize - 1) as u16;
        frame.set_cursor_position(Position::new(x, inner.y));
    }
}

/// Numbered list of moods
pub fn render_mood_picker(frame: &mut Frame, app: &App, area: Rect) {
    let height = MoodKind::ALL.len() as u16 + 4;
    let rect = modal_area(area, 40, height);
    frame.render_widget(Clear, rect);

    let mut lines: Vec<Line> = MoodKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            Line::from(vec![
                Span::styled(
                    format!(" {} ", i + 1),
                    Style::default()
                        .fg(app.theme.highlight)
                        .bg(app.theme.background)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} {}", kind.emoji(), kind.label()),
                    Style::default()
                        .fg(app.theme.mood_color(*kind))
                        .bg(app.theme.background),
                ),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Esc cancel", dim_style(app))));

    let paragraph = Paragraph::new(lines).block(modal_block(app, "How are you feeling?".into()));
    frame.render_widget(paragraph, rect);
}

pub fn render_confirm(frame: &mut Frame, app: &App, action: &ConfirmAction, area: Rect) {
    let question = match action {
        ConfirmAction::EndThenStart { name, .. } => {
            format!("'{name}' is still running. End it and start another?")
        }
    };
    let rect = modal_area(area, 60, 5);
    frame.render_widget(Clear, rect);
    let lines = vec![
        Line::from(Span::styled(
            format!(" {question}"),
            Style::default().fg(app.theme.text_bright).bg(app.theme.background),
        )),
        Line::from(""),
        Line::from(Span::styled(" y yes  n no", dim_style(app))),
    ];
    let paragraph = Paragraph::new(lines).block(modal_block(app, "Confirm".into()));
    frame.render_widget(paragraph, rect);
}

pub fn render_export_picker(frame: &mut Frame, app: &App, area: Rect) {
    let rect = modal_area(area, 40, 6);
    frame.render_widget(Clear, rect);
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(app.theme.background);
    let dir = app.store.config().exports_dir();
    let lines = vec![
        Line::from(vec![Span::styled(" 1 ", key_style), Span::styled("Plain text (.txt)", text_style)]),
        Line::from(vec![Span::styled(" 2 ", key_style), Span::styled("Markdown (.md)", text_style)]),
        Line::from(""),
        Line::from(Span::styled(format!(" into {}", dir.display()), dim_style(app))),
    ];
    let paragraph = Paragraph::new(lines).block(modal_block(app, "Export Stats".into()));
    frame.render_widget(paragraph, rect);
}
