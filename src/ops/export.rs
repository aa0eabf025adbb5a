//! Plain-text and Markdown renderings of the stats report.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::util::time::fmt_date;

use super::stats::{Stats, mood_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn render(self, stats: &Stats, today: NaiveDate) -> String {
        match self {
            ExportFormat::Text => render_text(stats, today),
            ExportFormat::Markdown => render_markdown(stats, today),
        }
    }
}

const RULE_WIDTH: usize = 50;

pub fn render_text(stats: &Stats, today: NaiveDate) -> String {
    let days = stats.stats_days;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "Daybook: Productivity Stats ({days}-day window)");
    let _ = writeln!(out, "Generated: {}", fmt_date(today));
    let _ = writeln!(out, "{rule}\n");

    let _ = writeln!(out, "TASKS");
    let _ = writeln!(out, "  Total:   {}", stats.total_todos);
    let _ = writeln!(out, "  Done:    {}", stats.done_todos);
    let _ = writeln!(out, "  Pending: {}\n", stats.pending_todos);

    let _ = writeln!(out, "JOURNAL");
    let _ = writeln!(out, "  Entries: {}", stats.total_journal);
    let _ = writeln!(out, "  Words:   {}", stats.total_words);
    if let Some(avg) = stats.avg_words_per_entry() {
        let _ = writeln!(out, "  Avg/entry: {avg:.0} words");
    }

    let _ = writeln!(out, "\nMOOD TREND");
    let _ = writeln!(out, "  Recorded: {}", stats.total_moods);
    if let Some(avg) = stats.avg_mood_score {
        let _ = writeln!(out, "  Average: {avg:.2}/5.0 ({})", mood_label(avg).label());
    }

    let _ = writeln!(out, "\nTIME TRACKED ({days} days)");
    let _ = writeln!(out, "  Total: {:.1}h", stats.total_tracked_hours);
    let acts = stats.activities_by_hours();
    if !acts.is_empty() {
        out.push('\n');
        for (name, hours) in acts {
            let _ = writeln!(out, "  - {name}: {hours:.1}h");
        }
    }

    let _ = write!(out, "\n{rule}");
    out
}

pub fn render_markdown(stats: &Stats, today: NaiveDate) -> String {
    let days = stats.stats_days;
    let mut out = String::new();

    let _ = writeln!(out, "# Daybook: Productivity Stats ({days}-day window)");
    let _ = writeln!(out, "*Generated: {}*\n", fmt_date(today));

    let _ = writeln!(out, "## Tasks");
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "|--------|-------|");
    let _ = writeln!(out, "| Total | {} |", stats.total_todos);
    let _ = writeln!(out, "| Done | {} |", stats.done_todos);
    let _ = writeln!(out, "| Pending | {} |\n", stats.pending_todos);

    let _ = writeln!(out, "## Journal");
    let _ = writeln!(out, "- **Entries:** {}", stats.total_journal);
    let _ = writeln!(out, "- **Words:** {}", stats.total_words);
    if let Some(avg) = stats.avg_words_per_entry() {
        let _ = writeln!(out, "- **Avg/entry:** {avg:.0} words");
    }

    let _ = writeln!(out, "\n## Mood Trend");
    let _ = writeln!(out, "- **Recorded:** {}", stats.total_moods);
    if let Some(avg) = stats.avg_mood_score {
        let _ = writeln!(out, "- **Average:** {avg:.2}/5.0 ({})", mood_label(avg).label());
    }

    let _ = writeln!(out, "\n## Time Tracked ({days} days)");
    let _ = write!(out, "- **Total:** {:.1}h", stats.total_tracked_hours);
    let acts = stats.activities_by_hours();
    if !acts.is_empty() {
        out.push_str("\n\n| Activity | Hours |\n|----------|-------|");
        for (name, hours) in acts {
            let _ = write!(out, "\n| {name} | {hours:.1}h |");
        }
    }
    out
}

/// `stats_DD-MM-YYYY.<ext>`
pub fn export_file_name(format: ExportFormat, today: NaiveDate) -> String {
    format!("stats_{}.{}", fmt_date(today), format.extension())
}
