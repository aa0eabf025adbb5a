use std::error::Error;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::export::export_stats;
use crate::io::open_session;
use crate::io::store::Store;
use crate::model::settings::SettingKey;
use crate::ops::Lookup;
use crate::ops::export::ExportFormat;
use crate::ops::stats::{bar_percentages, bar_scale, compute_stats, mood_label};
use crate::ops::{goal_ops, journal_ops, mood_ops, timeline_ops, todo_ops};
use crate::util::text::first_line;
use crate::util::time::{fmt_clock, fmt_date, fmt_duration, parse_date, parse_timestamp};

type CmdResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let Some(command) = cli.command else {
        return Ok(());
    };
    let (mut store, _app) = open_session(cli.data_dir, cli.profile)?;
    if let Some(reason) = store.log_error() {
        eprintln!("warning: logging disabled: {reason}");
    }

    match command {
        Commands::Todo(cmd) => cmd_todo(&mut store, cmd.action, json),
        Commands::Journal(cmd) => cmd_journal(&mut store, cmd.action, json),
        Commands::Mood(cmd) => cmd_mood(&mut store, cmd.action, json),
        Commands::Goal(cmd) => cmd_goal(&mut store, cmd.action, json),
        Commands::Timeline(cmd) => cmd_timeline(&mut store, cmd.action, json),
        Commands::Note(cmd) => cmd_note(&mut store, cmd.action, json),
        Commands::Stats(args) => cmd_stats(&store, args, json),
        Commands::Export(args) => cmd_export(&store, args, json),
        Commands::Settings(cmd) => cmd_settings(&mut store, cmd.action, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Turn a lookup miss into the command's error
fn require<T>(lookup: Lookup<T>, what: &str, id: &str) -> Result<T, Box<dyn Error>> {
    lookup
        .found()
        .ok_or_else(|| format!("{what} not found: {id}").into())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_id(id: String, json: bool) -> CmdResult {
    if json {
        print_json(&IdJson { id })
    } else {
        println!("{id}");
        Ok(())
    }
}

fn print_toggle(id: &str, value: bool, label: (&str, &str), json: bool) -> CmdResult {
    if json {
        return print_json(&ToggleJson {
            id: id.to_string(),
            value,
        });
    }
    println!("{id} {}", if value { label.0 } else { label.1 });
    Ok(())
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

fn cmd_todo(store: &mut Store, action: TodoAction, json: bool) -> CmdResult {
    match action {
        TodoAction::List => {
            let todos = todo_ops::sorted_todos(&store.doc().todos);
            if json {
                return print_json(&todos);
            }
            for t in todos {
                let mark = if t.done { "x" } else { " " };
                println!("{}  [{mark}] {}  {}", t.id, t.priority.letter(), t.text);
            }
            Ok(())
        }
        TodoAction::Add { text, priority } => print_id(store.add_todo(text, priority)?, json),
        TodoAction::Done { id } => {
            let done = require(store.toggle_todo(&id)?, "todo", &id)?;
            print_toggle(&id, done, ("done", "pending"), json)
        }
        TodoAction::Edit { id, text } => {
            require(store.edit_todo(&id, text)?, "todo", &id)?;
            print_id(id, json)
        }
        TodoAction::Priority { id, level } => {
            let level = match level {
                Some(level) => {
                    require(store.set_priority(&id, level)?, "todo", &id)?;
                    level
                }
                None => require(store.cycle_priority(&id)?, "todo", &id)?,
            };
            if json {
                return print_json(&PriorityJson { id, priority: level });
            }
            println!("{id} {}", level.label());
            Ok(())
        }
        TodoAction::Rm { id } => {
            require(store.delete_todo(&id)?, "todo", &id)?;
            print_id(id, json)
        }
        TodoAction::Purge => {
            let removed = store.purge_old_todos()?;
            if json {
                return print_json(&PurgeJson { removed });
            }
            println!("purged {removed} todo(s)");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

fn cmd_journal(store: &mut Store, action: JournalAction, json: bool) -> CmdResult {
    match action {
        JournalAction::List => {
            let entries = journal_ops::newest_first(&store.doc().journal);
            if json {
                return print_json(&entries);
            }
            for e in entries {
                println!(
                    "{}  {}  {}  ({} words)  {}",
                    e.id,
                    fmt_date(e.date),
                    e.display_name(),
                    e.word_count(),
                    first_line(&e.content)
                );
            }
            Ok(())
        }
        JournalAction::Add { content, name } => print_id(store.add_journal(content, name)?, json),
        JournalAction::Edit { id, content, name } => {
            require(store.edit_journal(&id, content, name)?, "journal entry", &id)?;
            print_id(id, json)
        }
        JournalAction::Rm { id } => {
            require(store.delete_journal(&id)?, "journal entry", &id)?;
            print_id(id, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Moods
// ---------------------------------------------------------------------------

fn cmd_mood(store: &mut Store, action: MoodAction, json: bool) -> CmdResult {
    match action {
        MoodAction::List => {
            let groups = mood_ops::mood_groups(&store.doc().moods);
            if json {
                let days: Vec<MoodDayJson> = groups
                    .into_iter()
                    .map(|(date, moods)| MoodDayJson { date, moods })
                    .collect();
                return print_json(&days);
            }
            for (date, moods) in groups {
                println!("{}", fmt_date(date));
                for m in moods {
                    println!(
                        "  {}  {} {:<8} {}  {}",
                        m.id,
                        m.mood.emoji(),
                        m.mood.label(),
                        fmt_clock(m.created_at),
                        m.note
                    );
                }
            }
            Ok(())
        }
        MoodAction::Add { mood, note } => print_id(store.add_mood(mood, note.unwrap_or_default())?, json),
        MoodAction::Rm { id } => {
            require(store.delete_mood(&id)?, "mood", &id)?;
            print_id(id, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Goals
// ---------------------------------------------------------------------------

fn cmd_goal(store: &mut Store, action: GoalAction, json: bool) -> CmdResult {
    let today = store.today();
    match action {
        GoalAction::List => {
            let goals = &store.doc().goals;
            if json {
                let out: Vec<GoalJson> = goals.iter().map(|g| GoalJson::new(g, today)).collect();
                return print_json(&out);
            }
            for g in goals {
                let mark = if g.is_checked_in(today) { "x" } else { " " };
                println!(
                    "{}  [{mark}] {}  streak {}",
                    g.id,
                    g.title,
                    goal_ops::streak(g, today)
                );
            }
            Ok(())
        }
        GoalAction::Add { title, description } => print_id(store.add_goal(title, description)?, json),
        GoalAction::Edit { id, title, description } => {
            require(store.edit_goal(&id, title, description)?, "goal", &id)?;
            print_id(id, json)
        }
        GoalAction::Checkin { id, date } => {
            let day = date.as_deref().map(parse_date).transpose()?;
            let checked = require(store.check_in_goal(&id, day)?, "goal", &id)?;
            print_toggle(&id, checked, ("checked in", "unchecked"), json)
        }
        GoalAction::History { id, days } => {
            let goal = store
                .doc()
                .goals
                .iter()
                .find(|g| g.id == id)
                .ok_or_else(|| format!("goal not found: {id}"))?;
            let days = days.unwrap_or(store.doc().settings.goal_history_days.clamp(0, 365) as u32);
            let history = goal_ops::history(goal, days, today);
            let rate = goal_ops::completion_rate(&history);
            if json {
                return print_json(&GoalHistoryJson {
                    id,
                    completion_rate: rate,
                    days: history
                        .into_iter()
                        .map(|(date, checked_in)| HistoryDayJson { date, checked_in })
                        .collect(),
                });
            }
            println!("{}  {}% of {} day(s)", goal.title, rate, history.len());
            for (date, checked) in history {
                println!("  {}  {}", fmt_date(date), if checked { "■" } else { "·" });
            }
            Ok(())
        }
        GoalAction::Rm { id } => {
            require(store.delete_goal(&id)?, "goal", &id)?;
            print_id(id, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

fn cmd_timeline(store: &mut Store, action: TimelineAction, json: bool) -> CmdResult {
    match action {
        TimelineAction::Show { date, days } => {
            let now = store.now();
            let events = &store.doc().timeline;
            let range = match (date, days) {
                (Some(date), _) => {
                    let day = parse_date(&date)?;
                    vec![(day, timeline_ops::events_for_date(events, day, now))]
                }
                (None, Some(days)) => timeline_ops::events_for_range(events, days, now.date(), now),
                (None, None) => vec![(now.date(), timeline_ops::events_for_date(events, now.date(), now))],
            };
            if json {
                let out: Vec<TimelineDayJson> = range
                    .iter()
                    .map(|(date, evs)| TimelineDayJson {
                        date: *date,
                        total_minutes: timeline_ops::day_total_minutes(evs),
                        events: evs.iter().map(DayEventJson::from).collect(),
                    })
                    .collect();
                return print_json(&out);
            }
            for (date, evs) in range {
                println!(
                    "{}  {}",
                    fmt_date(date),
                    fmt_duration(timeline_ops::day_total_minutes(&evs))
                );
                for de in evs {
                    let end = if de.is_active() { "now".to_string() } else { fmt_clock(de.day_end) };
                    let mut line = format!(
                        "  {}  {}-{}  {}  {}",
                        de.event.id,
                        fmt_clock(de.day_start),
                        end,
                        de.event.name,
                        fmt_duration(de.day_minutes())
                    );
                    if de.is_spillover || de.day_end != de.effective_end {
                        line.push_str(&format!(" ({} total)", fmt_duration(de.total_minutes())));
                    }
                    println!("{line}");
                }
            }
            Ok(())
        }
        TimelineAction::Start { name } => print_id(store.start_event(name)?, json),
        TimelineAction::End { id } => {
            let id = match id {
                Some(id) => id,
                None => timeline_ops::active_event(&store.doc().timeline)
                    .map(|e| e.id.clone())
                    .ok_or("no active event")?,
            };
            require(store.end_event(&id)?, "event", &id)?;
            print_id(id, json)
        }
        TimelineAction::Rename { id, name } => {
            require(store.rename_event(&id, name)?, "event", &id)?;
            print_id(id, json)
        }
        TimelineAction::Edit { id, start, end } => {
            let day = store
                .doc()
                .timeline
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.date)
                .ok_or_else(|| format!("event not found: {id}"))?;
            let start = start.as_deref().map(|s| parse_timestamp(s, day)).transpose()?;
            let end = end.as_deref().map(|s| parse_timestamp(s, day)).transpose()?;
            require(store.edit_event_time(&id, start, end)?, "event", &id)?;
            print_id(id, json)
        }
        TimelineAction::Rm { id } => {
            require(store.delete_event(&id)?, "event", &id)?;
            print_id(id, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

fn cmd_note(store: &mut Store, action: NoteAction, json: bool) -> CmdResult {
    match action {
        NoteAction::List => {
            let notes = &store.doc().notes;
            if json {
                return print_json(notes);
            }
            for n in notes {
                println!("{}  {}  {}", n.id, n.title, first_line(&n.content));
            }
            Ok(())
        }
        NoteAction::Add { title, content } => print_id(store.add_note(title, content)?, json),
        NoteAction::Rm { id } => {
            require(store.delete_note(&id)?, "note", &id)?;
            print_id(id, json)
        }
    }
}

// ---------------------------------------------------------------------------
// Stats, export, settings
// ---------------------------------------------------------------------------

fn cmd_stats(store: &Store, args: StatsArgs, json: bool) -> CmdResult {
    let stats = compute_stats(store.doc(), store.today(), store.now());
    let mode = args.mode.unwrap_or(store.doc().settings.stats_bar_mode);
    let bars = bar_percentages(&stats, mode);

    if json {
        return print_json(&StatsJson {
            stats: &stats,
            bar_mode: mode.into(),
            bar_mode_label: mode.label(),
            bars,
        });
    }

    println!("Stats ({}-day window)", stats.stats_days);
    println!(
        "  Todos    {}/{} done, {} pending",
        stats.done_todos, stats.total_todos, stats.pending_todos
    );
    println!("  Journal  {} entries, {} words", stats.total_journal, stats.total_words);
    match stats.avg_mood_score {
        Some(avg) => println!(
            "  Moods    {} recorded, avg {avg:.2}/5 ({})",
            stats.total_moods,
            mood_label(avg).label()
        ),
        None => println!("  Moods    {} recorded", stats.total_moods),
    }
    println!(
        "  Goals    {}/{} checked in today",
        stats.goals_checked_today, stats.total_goals
    );
    println!("  Time     {:.1}h tracked", stats.total_tracked_hours);
    if !bars.is_empty() {
        println!("  Bars relative to: {}", bar_scale(&stats, mode).describe());
        for bar in bars {
            println!("    {:<20} {:>3}%  {:.1}h", bar.name, bar.pct, bar.hours);
        }
    }
    Ok(())
}

fn cmd_export(store: &Store, args: ExportArgs, json: bool) -> CmdResult {
    let format = match args.format {
        ExportKind::Text => ExportFormat::Text,
        ExportKind::Md => ExportFormat::Markdown,
    };
    let today = store.today();
    let stats = compute_stats(store.doc(), today, store.now());
    let path = export_stats(&store.config().exports_dir(), format, &stats, today)?;
    if json {
        return print_json(&ExportJson {
            path: path.display().to_string(),
        });
    }
    println!("{}", path.display());
    Ok(())
}

fn cmd_settings(store: &mut Store, action: Option<SettingsAction>, json: bool) -> CmdResult {
    if let Some(SettingsAction::Set { key, value }) = action {
        store.set_setting(key, value)?;
    }
    let settings = &store.doc().settings;
    if json {
        return print_json(settings);
    }
    for key in SettingKey::ALL {
        println!("{key} = {}", settings.get(key));
    }
    Ok(())
}
