use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};

use super::helpers::{bar, dim_style, header_style};
use crate::ops::goal_ops;
use crate::ops::stats::{bar_percentages, bar_scale, compute_stats, mood_label};
use crate::tui::app::{App, Panel};
use crate::util::text::fit_to_width;
use crate::util::time::{fmt_clock, fmt_date, fmt_duration};

/// Render details for the selected item of the current panel
pub fn render_detail(frame: &mut Frame, app: &App, area: Rect) {
    let lines = match app.panel {
        Panel::Todos => todo_detail(app),
        Panel::Journal => journal_detail(app),
        Panel::Moods => mood_detail(app),
        Panel::Goals => goal_detail(app),
        Panel::Timeline => event_detail(app),
        Panel::Stats => stats_detail(app, area.width.saturating_sub(2) as usize),
    };
    let block = Block::default()
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(app.theme.background));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text).bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn field<'a>(app: &App, label: &str, value: impl Into<String>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label:<12}"), dim_style(app)),
        Span::styled(value.into(), Style::default().fg(app.theme.text).bg(app.theme.background)),
    ])
}

fn title<'a>(app: &App, text: impl Into<String>) -> Line<'a> {
    Line::from(Span::styled(text.into(), header_style(app)))
}

fn todo_detail(app: &App) -> Vec<Line<'static>> {
    let Some(todo) = app.selected_todo() else {
        return Vec::new();
    };
    let mut lines = vec![title(app, todo.text.clone()), Line::from("")];
    lines.push(Line::from(vec![
        Span::styled(format!("{:<12}", "Priority"), dim_style(app)),
        Span::styled(
            todo.priority.label().to_string(),
            Style::default()
                .fg(app.theme.priority_color(todo.priority))
                .bg(app.theme.background),
        ),
    ]));
    lines.push(field(app, "Status", if todo.done { "Done" } else { "Pending" }));
    lines.push(field(
        app,
        "Created",
        format!("{} {}", fmt_date(todo.created_at.date()), fmt_clock(todo.created_at)),
    ));
    if let Some(done_at) = todo.done_at {
        lines.push(field(
            app,
            "Completed",
            format!("{} {}", fmt_date(done_at.date()), fmt_clock(done_at)),
        ));
    }
    lines
}

fn journal_detail(app: &App) -> Vec<Line<'static>> {
    let Some(entry) = app.selected_journal() else {
        return Vec::new();
    };
    let mut lines = vec![
        title(app, entry.display_name().to_string()),
        Line::from(Span::styled(
            format!(
                "{} {}  \u{00B7}  {} words",
                fmt_date(entry.date),
                fmt_clock(entry.created_at),
                entry.word_count()
            ),
            dim_style(app),
        )),
        Line::from(""),
    ];
    lines.extend(entry.content.lines().map(|l| Line::from(l.to_string())));
    lines
}

fn mood_detail(app: &App) -> Vec<Line<'static>> {
    let Some(mood) = app.selected_mood() else {
        return Vec::new();
    };
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", mood.mood.emoji(), mood.mood.label()),
            Style::default()
                .fg(app.theme.mood_color(mood.mood))
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} {}  \u{00B7}  score {}/6",
                fmt_date(mood.date),
                fmt_clock(mood.created_at),
                mood.mood.score()
            ),
            dim_style(app),
        )),
        Line::from(""),
    ];
    if mood.note.is_empty() {
        lines.push(Line::from(Span::styled("(no note)", dim_style(app))));
    } else {
        lines.extend(mood.note.lines().map(|l| Line::from(l.to_string())));
    }
    lines
}

fn goal_detail(app: &App) -> Vec<Line<'static>> {
    let Some(goal) = app.selected_goal() else {
        return Vec::new();
    };
    let today = app.today();
    let days = app.store.doc().settings.goal_history_days.clamp(1, 365) as u32;
    let history = goal_ops::history(goal, days, today);

    let mut lines = vec![title(app, goal.title.clone())];
    if !goal.description.is_empty() {
        lines.push(Line::from(Span::styled(goal.description.clone(), dim_style(app))));
    }
    lines.push(Line::from(""));
    lines.push(field(
        app,
        "Today",
        if goal.is_checked_in(today) {
            "checked in"
        } else {
            "not yet"
        },
    ));
    lines.push(field(
        app,
        "Streak",
        format!("{} day(s)", goal_ops::streak(goal, today)),
    ));
    lines.push(field(
        app,
        "Completion",
        format!(
            "{}% of the last {} day(s)",
            goal_ops::completion_rate(&history),
            history.len()
        ),
    ));
    lines.push(field(app, "Since", fmt_date(goal.created_on())));
    lines.push(Line::from(""));
    lines.push(title(app, format!("Last {days} days")));

    // Oldest first, one week per row
    let hit = Style::default().fg(app.theme.green).bg(app.theme.background);
    let miss = dim_style(app);
    for week in history.iter().rev().collect::<Vec<_>>().chunks(7) {
        let mut spans = Vec::new();
        for (day, done) in week {
            let (cell, style) = if *done { ("\u{25A0} ", hit) } else { ("\u{00B7} ", miss) };
            spans.push(Span::styled(cell, style));
            if *day == today {
                spans.push(Span::styled("\u{2190} today", miss));
            }
        }
        if let Some((first, _)) = week.first() {
            spans.insert(0, Span::styled(format!("{:02}/{:02}  ", first.day(), first.month()), miss));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn event_detail(app: &App) -> Vec<Line<'static>> {
    let Some(de) = app.selected_event() else {
        return Vec::new();
    };
    let event = de.event;
    let mut lines = vec![title(app, event.name.clone()), Line::from("")];
    lines.push(field(
        app,
        "Started",
        format!("{} {}", fmt_date(event.start_time.date()), fmt_clock(event.start_time)),
    ));
    match event.end_time {
        Some(end) => lines.push(field(
            app,
            "Ended",
            format!("{} {}", fmt_date(end.date()), fmt_clock(end)),
        )),
        None => lines.push(Line::from(vec![
            Span::styled(format!("{:<12}", "Ended"), dim_style(app)),
            Span::styled(
                "running",
                Style::default().fg(app.theme.green).bg(app.theme.background),
            ),
        ])),
    }
    lines.push(field(app, "This day", fmt_duration(de.day_minutes())));
    lines.push(field(app, "Total", fmt_duration(de.total_minutes())));
    if de.is_spillover {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Continued from {}", fmt_date(event.date)),
            dim_style(app),
        )));
    }
    lines
}

fn stats_detail(app: &App, width: usize) -> Vec<Line<'static>> {
    let doc = app.store.doc();
    let stats = compute_stats(doc, app.today(), app.store.now());
    let mode = doc.settings.stats_bar_mode;

    let mut lines = vec![
        title(app, format!("Last {} days", stats.stats_days)),
        Line::from(""),
        field(
            app,
            "Todos",
            format!(
                "{} total, {} done, {} pending",
                stats.total_todos, stats.done_todos, stats.pending_todos
            ),
        ),
        field(
            app,
            "Journal",
            format!(
                "{} entries, {} words ({:.0} avg)",
                stats.total_journal,
                stats.total_words,
                stats.avg_words_per_entry().unwrap_or(0.0)
            ),
        ),
    ];
    lines.push(match stats.avg_mood_score {
        Some(avg) => {
            let kind = mood_label(avg);
            field(
                app,
                "Mood",
                format!("{} {} ({avg:.1}) over {} logs", kind.emoji(), kind.label(), stats.total_moods),
            )
        }
        None => field(app, "Mood", "nothing logged"),
    });
    lines.push(field(
        app,
        "Goals",
        format!("{} of {} checked in today", stats.goals_checked_today, stats.total_goals),
    ));
    lines.push(field(
        app,
        "Tracked",
        fmt_duration(stats.total_tracked_hours * 60.0),
    ));
    lines.push(Line::from(""));

    let bars = bar_percentages(&stats, mode);
    if bars.is_empty() {
        lines.push(Line::from(Span::styled("No activities tracked", dim_style(app))));
    } else {
        lines.push(Line::from(vec![
            Span::styled("Relative to ", dim_style(app)),
            Span::styled(
                bar_scale(&stats, mode).describe(),
                Style::default().fg(app.theme.purple).bg(app.theme.background),
            ),
        ]));
        let bar_width = width.saturating_sub(30).max(4);
        for (i, b) in bars.iter().enumerate() {
            let (filled, empty) = bar(b.pct, bar_width);
            let color = app.theme.activity_color(i);
            lines.push(Line::from(vec![
                Span::styled(fit_to_width(b.name, 12), Style::default().fg(color).bg(app.theme.background)),
                Span::styled(" ", dim_style(app)),
                Span::styled(filled, Style::default().fg(color).bg(app.theme.background)),
                Span::styled(empty, dim_style(app)),
                Span::styled(format!(" {:>3}% {:>6.1}h", b.pct, b.hours), dim_style(app)),
            ]));
        }
    }

    if let Some(path) = &app.last_export {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Exported to {}", path.display()),
            Style::default().fg(app.theme.green).bg(app.theme.background),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::{render_to_string, test_app};

    fn draw(app: &App) -> String {
        render_to_string(70, 24, |frame, area| render_detail(frame, app, area))
    }

    #[test]
    fn goal_detail_shows_streak_and_grid() {
        let (_tmp, mut app) = test_app();
        app.panel = Panel::Goals;
        let id = app.store.add_goal("Read".into(), "20 pages".into()).unwrap();
        app.store.check_in_goal(&id, None).unwrap();
        let out = draw(&app);
        assert!(out.contains("20 pages"));
        assert!(out.contains("1 day(s)"));
        assert!(out.contains("100% of the last 1 day(s)"));
        assert!(out.contains("\u{2190} today"));
    }

    #[test]
    fn stats_detail_lists_activity_bars() {
        let (_tmp, mut app) = test_app();
        app.panel = Panel::Stats;
        app.store.start_event("Work".into()).unwrap();
        let out = draw(&app);
        assert!(out.contains("Last 7 days"));
        assert!(out.contains("Relative to Min-Max Normalization"));
        assert!(out.contains("Work"));
    }

    #[test]
    fn running_event_detail() {
        let (_tmp, mut app) = test_app();
        app.panel = Panel::Timeline;
        app.store.start_event("Reading".into()).unwrap();
        let out = draw(&app);
        assert!(out.contains("Reading"));
        assert!(out.contains("running"));
    }
}
