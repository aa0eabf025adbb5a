//! Aggregate statistics and bar normalization for the stats panel.

use chrono::{Days, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

use crate::model::document::Document;
use crate::model::mood::MoodKind;
use crate::model::settings::BarMode;

use super::goal_ops::checked_in_today;
use super::journal_ops::total_words;
use super::mood_ops::average_score;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total_todos: usize,
    pub done_todos: usize,
    pub pending_todos: usize,
    pub total_journal: usize,
    pub total_words: usize,
    pub total_moods: usize,
    /// Mean mood score inside the window
    pub avg_mood_score: Option<f64>,
    pub total_goals: usize,
    pub goals_checked_today: usize,
    /// Full event durations in hours, keyed by event name, for events that
    /// started inside the window
    pub hours_by_activity: IndexMap<String, f64>,
    pub total_tracked_hours: f64,
    pub stats_days: i64,
}

impl Stats {
    /// Activities by hours descending, ties by name
    pub fn activities_by_hours(&self) -> Vec<(&str, f64)> {
        let mut acts: Vec<(&str, f64)> = self
            .hours_by_activity
            .iter()
            .map(|(name, hours)| (name.as_str(), *hours))
            .collect();
        acts.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        acts
    }

    pub fn avg_words_per_entry(&self) -> Option<f64> {
        (self.total_journal > 0).then(|| self.total_words as f64 / self.total_journal as f64)
    }
}

/// Compute stats over the trailing `settings.stats_days` window.
///
/// Todo, journal and goal counts are all-time. Moods and timeline hours only
/// count records dated on or after `today - stats_days`.
pub fn compute_stats(doc: &Document, today: NaiveDate, now: NaiveDateTime) -> Stats {
    let stats_days = doc.settings.stats_days;
    let cutoff = today
        .checked_sub_days(Days::new(stats_days.max(0) as u64))
        .unwrap_or(NaiveDate::MIN);

    let done_todos = doc.todos.iter().filter(|t| t.done).count();
    let avg_mood_score = average_score(doc.moods.iter().filter(|m| m.date >= cutoff));

    let mut hours_by_activity: IndexMap<String, f64> = IndexMap::new();
    for event in doc.timeline.iter().filter(|e| e.date >= cutoff) {
        *hours_by_activity.entry(event.name.clone()).or_default() += event.total_minutes(now) / 60.0;
    }
    let total_tracked_hours = hours_by_activity.values().sum();

    Stats {
        total_todos: doc.todos.len(),
        done_todos,
        pending_todos: doc.todos.len() - done_todos,
        total_journal: doc.journal.len(),
        total_words: total_words(&doc.journal),
        total_moods: doc.moods.len(),
        avg_mood_score,
        total_goals: doc.goals.len(),
        goals_checked_today: checked_in_today(&doc.goals, today),
        hours_by_activity,
        total_tracked_hours,
        stats_days,
    }
}

/// Nearest mood for an average score
pub fn mood_label(score: f64) -> MoodKind {
    MoodKind::from_score(score.round().clamp(0.0, 5.0) as u8)
}

/// One activity bar: name, hours, and fill percentage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar<'a> {
    pub name: &'a str,
    pub hours: f64,
    pub pct: u8,
}

/// Reference values a bar mode measured against, for the legend line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarScale {
    Logged(f64),
    Window { days: i64, hours: f64 },
    ZScore { mean: f64, sigma: f64 },
    MinMax { min: f64, max: f64 },
}

impl BarScale {
    pub fn describe(&self) -> String {
        match self {
            BarScale::Logged(total) => format!("Logged Time ({total:.1}h)"),
            BarScale::Window { days, hours } => format!("Total Time ({days}d = {hours:.0}h)"),
            BarScale::ZScore { mean, sigma } => {
                format!("Z-Score Percentile (µ={mean:.1}h, σ={sigma:.1}h)")
            }
            BarScale::MinMax { min, max } => {
                format!("Min-Max Normalization (min={min:.1}h, max={max:.1}h)")
            }
        }
    }
}

pub fn bar_scale(stats: &Stats, mode: BarMode) -> BarScale {
    let values: Vec<f64> = stats.hours_by_activity.values().copied().collect();
    match mode {
        BarMode::Logged => BarScale::Logged(stats.total_tracked_hours),
        BarMode::Window => BarScale::Window {
            days: stats.stats_days,
            hours: stats.stats_days.saturating_mul(24) as f64,
        },
        BarMode::ZScore => {
            let (mean, variance) = mean_variance(&values);
            BarScale::ZScore { mean, sigma: variance.sqrt() }
        }
        BarMode::MinMax => {
            let (min, max) = min_max(&values);
            BarScale::MinMax { min, max }
        }
    }
}

/// Bars for every activity in `activities_by_hours` order, each percentage
/// clamped to 0..=100.
pub fn bar_percentages(stats: &Stats, mode: BarMode) -> Vec<Bar<'_>> {
    let acts = stats.activities_by_hours();
    let values: Vec<f64> = acts.iter().map(|(_, h)| *h).collect();
    let (mean, variance) = mean_variance(&values);
    let sigma = variance.sqrt();
    let (min, max) = min_max(&values);

    let fraction_of = |hours: f64, denom: f64| {
        let denom = if denom == 0.0 { 1.0 } else { denom };
        hours / denom * 100.0
    };

    acts.into_iter()
        .map(|(name, hours)| {
            let raw = match mode {
                BarMode::Logged => fraction_of(hours, stats.total_tracked_hours),
                BarMode::Window => fraction_of(hours, stats.stats_days.saturating_mul(24) as f64),
                BarMode::ZScore => {
                    if values.len() <= 1 || sigma == 0.0 {
                        50.0
                    } else {
                        normal_cdf((hours - mean) / sigma) * 100.0
                    }
                }
                BarMode::MinMax => {
                    if max == min {
                        100.0
                    } else {
                        (hours - min) / (max - min) * 100.0
                    }
                }
            };
            Bar {
                name,
                hours,
                pct: raw.trunc().clamp(0.0, 100.0) as u8,
            }
        })
        .collect()
}

/// Population mean and variance, zeros for an empty slice
fn mean_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

fn min_max(values: &[f64]) -> (f64, f64) {
    let mut iter = values.iter().copied();
    let Some(first) = iter.next() else {
        return (0.0, 0.0);
    };
    iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Standard normal CDF
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Abramowitz and Stegun 7.1.26, absolute error below 1.5e-7
pub fn erf(x: f64) -> f64 {
    const P: f64 = 0.327_591_1;
    const A: [f64; 5] = [
        0.254_829_592,
        -0.284_496_736,
        1.421_413_741,
        -1.453_152_027,
        1.061_405_429,
    ];
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = A.iter().rev().fold(0.0, |acc, a| acc * t + a) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mood::Mood;
    use crate::model::timeline::TimelineEvent;
    use crate::model::todo::Priority;
    use crate::ops::{goal_ops, todo_ops};
    use pretty_assertions::assert_eq;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn event(name: &str, day: u32, start: u32, end: u32) -> TimelineEvent {
        TimelineEvent {
            id: format!("{name}{day}{start}"),
            name: name.into(),
            date: ts(day, 0).date(),
            start_time: ts(day, start),
            end_time: Some(ts(day, end)),
        }
    }

    fn mood(kind: MoodKind, day: u32) -> Mood {
        Mood {
            id: format!("m{day}"),
            mood: kind,
            note: String::new(),
            date: ts(day, 0).date(),
            created_at: ts(day, 9),
        }
    }

    fn sample() -> Document {
        let mut doc = Document::default();
        todo_ops::add_todo(&mut doc.todos, "a".into(), Priority::Medium, ts(1, 9));
        let id = todo_ops::add_todo(&mut doc.todos, "b".into(), Priority::High, ts(1, 9));
        todo_ops::toggle_todo(&mut doc.todos, &id, ts(2, 9));
        let goal = goal_ops::add_goal(&mut doc.goals, "Read".into(), String::new(), ts(1, 9));
        goal_ops::check_in(&mut doc.goals, &goal, ts(20, 0).date());
        doc.moods = vec![mood(MoodKind::Terrible, 1), mood(MoodKind::Great, 18), mood(MoodKind::Good, 19)];
        doc.timeline = vec![
            event("Work", 1, 9, 17),
            event("Work", 19, 9, 12),
            event("Gym", 20, 7, 8),
        ];
        doc
    }

    #[test]
    fn windowed_aggregates() {
        let stats = compute_stats(&sample(), ts(20, 0).date(), ts(20, 12));
        assert_eq!(stats.total_todos, 2);
        assert_eq!(stats.done_todos, 1);
        assert_eq!(stats.pending_todos, 1);
        assert_eq!(stats.total_moods, 3);
        assert_eq!(stats.avg_mood_score, Some(3.5));
        assert_eq!(stats.goals_checked_today, 1);
        assert_eq!(stats.activities_by_hours(), vec![("Work", 3.0), ("Gym", 1.0)]);
        assert_eq!(stats.total_tracked_hours, 4.0);
    }

    #[test]
    fn no_moods_in_window() {
        let mut doc = sample();
        doc.moods.truncate(1);
        let stats = compute_stats(&doc, ts(20, 0).date(), ts(20, 12));
        assert_eq!(stats.avg_mood_score, None);
    }

    fn pcts(stats: &Stats, mode: BarMode) -> Vec<u8> {
        bar_percentages(stats, mode).iter().map(|b| b.pct).collect()
    }

    #[test]
    fn bar_modes() {
        let stats = compute_stats(&sample(), ts(20, 0).date(), ts(20, 12));
        assert_eq!(pcts(&stats, BarMode::Logged), vec![75, 25]);
        assert_eq!(pcts(&stats, BarMode::Window), vec![1, 0]);
        assert_eq!(pcts(&stats, BarMode::ZScore), vec![84, 15]);
        assert_eq!(pcts(&stats, BarMode::MinMax), vec![100, 0]);
    }

    #[test]
    fn single_activity_fallbacks() {
        let mut doc = sample();
        doc.timeline.truncate(2);
        let stats = compute_stats(&doc, ts(20, 0).date(), ts(20, 12));
        assert_eq!(pcts(&stats, BarMode::ZScore), vec![50]);
        assert_eq!(pcts(&stats, BarMode::MinMax), vec![100]);
        assert_eq!(pcts(&stats, BarMode::Logged), vec![100]);
    }

    #[test]
    fn huge_window_does_not_overflow() {
        let mut doc = sample();
        doc.settings.stats_days = i64::MAX;
        let stats = compute_stats(&doc, ts(20, 0).date(), ts(20, 12));
        assert_eq!(stats.total_tracked_hours, 12.0);
        assert_eq!(pcts(&stats, BarMode::Window), vec![0, 0]);
        assert!(matches!(bar_scale(&stats, BarMode::Window), BarScale::Window { .. }));
    }

    #[test]
    fn empty_activity_set_has_no_bars() {
        let stats = compute_stats(&Document::default(), ts(20, 0).date(), ts(20, 12));
        for mode in BarMode::ALL {
            assert!(bar_percentages(&stats, mode).is_empty());
        }
    }

    #[test]
    fn erf_matches_known_values() {
        assert!(erf(0.0).abs() < 1e-7);
        assert!((erf(1.0) - 0.842_700_79).abs() < 1e-6);
        assert!((erf(-1.0) + 0.842_700_79).abs() < 1e-6);
        assert!((normal_cdf(1.0) - 0.841_344_7).abs() < 1e-6);
    }

    #[test]
    fn mood_label_rounds_and_clamps() {
        assert_eq!(mood_label(3.6), MoodKind::Great);
        assert_eq!(mood_label(2.2), MoodKind::Okay);
        assert_eq!(mood_label(9.0), MoodKind::Amazing);
        assert_eq!(mood_label(-3.0), MoodKind::Terrible);
    }
}
