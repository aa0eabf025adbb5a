use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::app::App;
use crate::util::text::display_width;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| display_width(&s.content)).sum()
}

/// `left` followed by `right` pushed to the right edge, when both fit
pub(super) fn left_right_line<'a>(
    mut left: Vec<Span<'a>>,
    right: Span<'a>,
    width: usize,
    bg: Style,
) -> Line<'a> {
    let used = spans_width(&left) + display_width(&right.content);
    if used < width {
        left.push(Span::styled(" ".repeat(width - used), bg));
        left.push(right);
    }
    Line::from(left)
}

/// Horizontal bar of `width` cells, `pct` percent filled
pub(super) fn bar(pct: u8, width: usize) -> (String, String) {
    let filled = (usize::from(pct.min(100)) * width + 50) / 100;
    (
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(width.saturating_sub(filled)),
    )
}

/// Style for a list row, highlighted when selected
pub(super) fn row_style(app: &App, selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

/// Dimmed text on the background
pub(super) fn dim_style(app: &App) -> Style {
    Style::default().fg(app.theme.dim).bg(app.theme.background)
}

/// Bold section header
pub(super) fn header_style(app: &App) -> Style {
    Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD)
}
