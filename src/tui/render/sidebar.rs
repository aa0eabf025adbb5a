use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::helpers::{dim_style, header_style, row_style};
use crate::ops::goal_ops;
use crate::ops::mood_ops::average_score;
use crate::ops::stats::mood_label;
use crate::ops::timeline_ops::day_total_minutes;
use crate::tui::app::{App, Panel};
use crate::util::text::{first_line, fit_to_width};
use crate::util::time::{fmt_clock, fmt_date, fmt_duration};

/// Lines for the list pane and the index of the selected line
struct ListView<'a> {
    lines: Vec<Line<'a>>,
    selected: Option<usize>,
}

/// Render the item list for the current panel
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(app.theme.dim).bg(app.theme.background))
        .style(Style::default().bg(app.theme.background));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let view = match app.panel {
        Panel::Todos => todo_lines(app, width),
        Panel::Journal => journal_lines(app, width),
        Panel::Moods => mood_lines(app, width),
        Panel::Goals => goal_lines(app, width),
        Panel::Timeline => timeline_lines(app, width),
        Panel::Stats => stats_lines(app),
    };

    // Scroll so the selected line stays in view
    let height = inner.height as usize;
    let offset = match view.selected {
        Some(sel) if height > 0 => sel.saturating_sub(height - 1),
        _ => 0,
    };
    let paragraph = Paragraph::new(view.lines)
        .scroll((offset.min(u16::MAX as usize) as u16, 0))
        .style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, inner);
}

fn placeholder<'a>(app: &App, text: &'a str) -> ListView<'a> {
    ListView {
        lines: vec![Line::from(""), Line::from(Span::styled(text, dim_style(app)))],
        selected: None,
    }
}

fn todo_lines(app: &App, width: usize) -> ListView<'static> {
    let todos = app.todos();
    if todos.is_empty() {
        return placeholder(app, " No todos yet, press a to add one");
    }
    let cursor = app.cursor();
    let bg = app.theme.background;
    let lines = todos
        .iter()
        .enumerate()
        .map(|(i, todo)| {
            let selected = i == cursor;
            let base = row_style(app, selected);
            let check = if todo.done { "[x]" } else { "[ ]" };
            let text_style = if todo.done {
                base.fg(app.theme.dim).add_modifier(Modifier::CROSSED_OUT)
            } else {
                base
            };
            let priority = Style::default()
                .fg(app.theme.priority_color(todo.priority))
                .bg(if selected { app.theme.selection_bg } else { bg });
            Line::from(vec![
                Span::styled(format!(" {check} "), base),
                Span::styled(format!("{} ", todo.priority.letter()), priority),
                Span::styled(fit_to_width(&todo.text, width.saturating_sub(7)), text_style),
            ])
        })
        .collect();
    ListView {
        lines,
        selected: Some(cursor),
    }
}

fn journal_lines(app: &App, width: usize) -> ListView<'static> {
    let entries = app.journal();
    if entries.is_empty() {
        return placeholder(app, " No journal entries, press a to write one");
    }
    let cursor = app.cursor();
    let lines = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = row_style(app, i == cursor);
            let date = format!(" {}  ", fmt_date(entry.date));
            let words = format!(" {}w ", entry.word_count());
            let name_width = width.saturating_sub(date.len() + words.len());
            Line::from(vec![
                Span::styled(date, style.fg(app.theme.cyan)),
                Span::styled(fit_to_width(entry.display_name(), name_width), style),
                Span::styled(words, style.fg(app.theme.dim)),
            ])
        })
        .collect();
    ListView {
        lines,
        selected: Some(cursor),
    }
}

fn mood_lines(app: &App, width: usize) -> ListView<'static> {
    let groups = app.mood_groups();
    if groups.is_empty() {
        return placeholder(app, " No moods logged, press a to log one");
    }
    let cursor = app.cursor();
    let mut lines = Vec::new();
    let mut selected = None;
    let mut index = 0;
    for (day, moods) in &groups {
        let avg = average_score(moods.iter().copied()).map(mood_label);
        let summary = avg.map(|m| format!("  avg {}", m.emoji())).unwrap_or_default();
        lines.push(Line::from(Span::styled(
            format!(" {}{summary}", fmt_date(*day)),
            header_style(app),
        )));
        for mood in moods {
            let is_sel = index == cursor;
            if is_sel {
                selected = Some(lines.len());
            }
            let style = row_style(app, is_sel);
            let head = format!("   {} {} ", fmt_clock(mood.created_at), mood.mood.emoji());
            let label = format!("{:<9}", mood.mood.label());
            let note_width = width.saturating_sub(head.chars().count() + 11);
            lines.push(Line::from(vec![
                Span::styled(head, style),
                Span::styled(label, style.fg(app.theme.mood_color(mood.mood))),
                Span::styled(format!(" {}", fit_to_width(first_line(&mood.note), note_width)), style),
            ]));
            index += 1;
        }
    }
    ListView { lines, selected }
}

fn goal_lines(app: &App, width: usize) -> ListView<'static> {
    let goals = app.goals();
    if goals.is_empty() {
        return placeholder(app, " No goals yet, press a to add one");
    }
    let cursor = app.cursor();
    let today = app.today();
    let lines = goals
        .iter()
        .enumerate()
        .map(|(i, goal)| {
            let style = row_style(app, i == cursor);
            let (mark, mark_color) = if goal.is_checked_in(today) {
                ("\u{2713}", app.theme.green)
            } else {
                ("\u{25CB}", app.theme.dim)
            };
            let streak = goal_ops::streak(goal, today);
            let streak_text = format!(" \u{1F525}{streak} ");
            Line::from(vec![
                Span::styled(format!(" {mark} "), style.fg(mark_color)),
                Span::styled(fit_to_width(&goal.title, width.saturating_sub(10)), style),
                Span::styled(streak_text, style.fg(app.theme.orange)),
            ])
        })
        .collect();
    ListView {
        lines,
        selected: Some(cursor),
    }
}

fn timeline_lines(app: &App, width: usize) -> ListView<'static> {
    let day = app.timeline_day();
    let events = app.timeline_events();
    let title = if app.timeline_offset == 0 {
        format!(" {} (today)", fmt_date(day))
    } else {
        format!(" {}", fmt_date(day))
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(title, header_style(app)),
        Span::styled(
            format!("  total {}", fmt_duration(day_total_minutes(&events))),
            dim_style(app),
        ),
    ])];
    if events.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " No activities, press a to start one",
            dim_style(app),
        )));
        return ListView {
            lines,
            selected: None,
        };
    }

    let cursor = app.cursor();
    for (i, de) in events.iter().enumerate() {
        let style = row_style(app, i == cursor);
        let end = if de.is_active() {
            "now  ".to_string()
        } else {
            fmt_clock(de.day_end)
        };
        let marker = if de.is_active() {
            "\u{25CF}"
        } else if de.is_spillover {
            "\u{21B3}"
        } else {
            " "
        };
        let times = format!(" {marker} {}-{end} ", fmt_clock(de.day_start));
        let duration = format!(" {:>8} ", fmt_duration(de.day_minutes()));
        let name_width = width.saturating_sub(times.chars().count() + duration.len());
        lines.push(Line::from(vec![
            Span::styled(times, style.fg(app.theme.activity_color(i))),
            Span::styled(fit_to_width(&de.event.name, name_width), style),
            Span::styled(duration, style.fg(app.theme.dim)),
        ]));
    }
    ListView {
        lines,
        selected: Some(cursor + 1),
    }
}

fn stats_lines(app: &App) -> ListView<'static> {
    let doc = app.store.doc();
    let settings = &doc.settings;
    let rows = [
        ("Stats window", format!("{} days", settings.stats_days)),
        ("Todo purge", format!("{} days", settings.todo_purge_days)),
        ("Goal history", format!("{} days", settings.goal_history_days)),
        ("Bar mode", settings.stats_bar_mode.label().to_string()),
    ];
    let mut lines = vec![Line::from(Span::styled(" Settings", header_style(app))), Line::from("")];
    for (label, value) in rows {
        lines.push(Line::from(vec![
            Span::styled(format!(" {label:<14}"), dim_style(app)),
            Span::styled(value, Style::default().fg(app.theme.text).bg(app.theme.background)),
        ]));
    }
    ListView {
        lines,
        selected: None,
    }
}
