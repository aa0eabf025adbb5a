use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::model::timeline::{TimelineEvent, minutes_between};

use super::{Lookup, new_id, remove_by_id};

/// The event with no end time, if any
pub fn active_event(events: &[TimelineEvent]) -> Option<&TimelineEvent> {
    events.iter().find(|e| e.is_active())
}

/// Start a new event at `now`, ending the active one first.
pub fn start_event(events: &mut Vec<TimelineEvent>, name: String, now: NaiveDateTime) -> String {
    for event in events.iter_mut().filter(|e| e.is_active()) {
        event.end_time = Some(now);
    }
    let id = new_id(|candidate| events.iter().any(|e| e.id == candidate));
    events.push(TimelineEvent {
        id: id.clone(),
        name,
        date: now.date(),
        start_time: now,
        end_time: None,
    });
    id
}

pub fn end_event(events: &mut [TimelineEvent], id: &str, now: NaiveDateTime) -> Lookup {
    events
        .iter_mut()
        .find(|e| e.id == id)
        .map(|e| e.end_time = Some(now))
        .into()
}

pub fn rename_event(events: &mut [TimelineEvent], id: &str, name: String) -> Lookup {
    events
        .iter_mut()
        .find(|e| e.id == id)
        .map(|e| e.name = name)
        .into()
}

/// Overwrite start and/or end. No ordering check: an end before the start
/// is stored as given and yields negative durations.
pub fn edit_event_time(
    events: &mut [TimelineEvent],
    id: &str,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Lookup {
    let Some(event) = events.iter_mut().find(|e| e.id == id) else {
        return Lookup::NotFound;
    };
    if let Some(start) = start {
        event.start_time = start;
    }
    if let Some(end) = end {
        event.end_time = Some(end);
    }
    Lookup::Found(())
}

pub fn delete_event(events: &mut Vec<TimelineEvent>, id: &str) -> Lookup {
    remove_by_id(events, id, |e| e.id.as_str())
}

/// An event as seen from one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DayEvent<'a> {
    pub event: &'a TimelineEvent,
    /// `end_time`, or `now` for the active event
    pub effective_end: NaiveDateTime,
    /// Start clamped to the day
    pub day_start: NaiveDateTime,
    /// End clamped to the day; midnight of the next day when the event runs
    /// past the end of this one
    pub day_end: NaiveDateTime,
    /// The event started on another day
    pub is_spillover: bool,
}

impl DayEvent<'_> {
    /// Minutes spent on this day only
    pub fn day_minutes(&self) -> f64 {
        minutes_between(self.day_start, self.day_end)
    }

    /// Minutes for the whole event, unclamped
    pub fn total_minutes(&self) -> f64 {
        minutes_between(self.event.start_time, self.effective_end)
    }

    pub fn is_active(&self) -> bool {
        self.event.is_active()
    }
}

/// Events overlapping `day`, in stored order.
///
/// An event is excluded when its end is at or before the start of the day,
/// or its start is after 23:59:59. Clamped ends are capped at the next
/// midnight.
pub fn events_for_date(events: &[TimelineEvent], day: NaiveDate, now: NaiveDateTime) -> Vec<DayEvent<'_>> {
    let day_start = day.and_time(NaiveTime::MIN);
    let last_second = day_start + TimeDelta::seconds(86_399);
    let next_midnight = last_second + TimeDelta::seconds(1);

    events
        .iter()
        .filter_map(|event| {
            let effective_end = event.effective_end(now);
            if effective_end <= day_start || event.start_time > last_second {
                return None;
            }
            Some(DayEvent {
                event,
                effective_end,
                day_start: event.start_time.max(day_start),
                day_end: effective_end.min(next_midnight),
                is_spillover: event.date != day,
            })
        })
        .collect()
}

/// Events for today and the `days - 1` days before it, newest day first.
/// Days without events are omitted.
pub fn events_for_range(
    events: &[TimelineEvent],
    days: u32,
    today: NaiveDate,
    now: NaiveDateTime,
) -> Vec<(NaiveDate, Vec<DayEvent<'_>>)> {
    (0..days)
        .filter_map(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .map(|day| (day, events_for_date(events, day, now)))
        .filter(|(_, day_events)| !day_events.is_empty())
        .collect()
}

/// Sum of per-day minutes
pub fn day_total_minutes(day_events: &[DayEvent<'_>]) -> f64 {
    day_events.iter().map(DayEvent::day_minutes).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn event(id: &str, start: &str, end: Option<&str>) -> TimelineEvent {
        let start_time = ts(start);
        TimelineEvent {
            id: id.into(),
            name: format!("event {id}"),
            date: start_time.date(),
            start_time,
            end_time: end.map(ts),
        }
    }

    #[test]
    fn cross_midnight_event_is_split_across_days() {
        let events = vec![event("e1", "2026-02-20T22:00:00", Some("2026-02-21T03:00:00"))];
        let now = ts("2026-02-25T12:00:00");

        let first = events_for_date(&events, day("2026-02-20"), now);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].day_end, ts("2026-02-21T00:00:00"));
        assert_eq!(first[0].day_minutes(), 120.0);
        assert_eq!(first[0].total_minutes(), 300.0);
        assert!(!first[0].is_spillover);

        let second = events_for_date(&events, day("2026-02-21"), now);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].day_start, ts("2026-02-21T00:00:00"));
        assert_eq!(second[0].day_minutes(), 180.0);
        assert_eq!(second[0].total_minutes(), 300.0);
        assert!(second[0].is_spillover);

        assert!(events_for_date(&events, day("2026-02-22"), now).is_empty());
    }

    #[test]
    fn boundary_asymmetry() {
        let events = vec![
            event("ends_at_midnight", "2026-02-19T20:00:00", Some("2026-02-20T00:00:00")),
            event("starts_at_midnight", "2026-02-21T00:00:00", Some("2026-02-21T01:00:00")),
        ];
        let now = ts("2026-02-25T12:00:00");
        assert!(events_for_date(&events, day("2026-02-20"), now).is_empty());
        let on_19th = events_for_date(&events, day("2026-02-19"), now);
        assert_eq!(on_19th[0].day_minutes(), 240.0);
    }

    #[test]
    fn active_event_runs_until_now() {
        let events = vec![event("e1", "2026-02-20T23:00:00", None)];
        let now = ts("2026-02-21T01:30:00");
        let today = events_for_date(&events, day("2026-02-21"), now);
        assert_eq!(today.len(), 1);
        assert!(today[0].is_active());
        assert_eq!(today[0].day_minutes(), 90.0);
        assert_eq!(today[0].total_minutes(), 150.0);
    }

    #[test]
    fn starting_ends_previous_active_event() {
        let mut events = Vec::new();
        let first = start_event(&mut events, "Work".into(), ts("2026-02-20T09:00:00"));
        let second = start_event(&mut events, "Lunch".into(), ts("2026-02-20T12:00:00"));

        let open: Vec<_> = events.iter().filter(|e| e.is_active()).collect();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second);
        assert_eq!(events[0].id, first);
        assert_eq!(events[0].end_time, Some(ts("2026-02-20T12:00:00")));
        assert_eq!(active_event(&events).map(|e| e.name.as_str()), Some("Lunch"));
    }

    #[test]
    fn edit_time_keeps_inverted_range() {
        let mut events = vec![event("e1", "2026-02-20T09:00:00", Some("2026-02-20T10:00:00"))];
        let result = edit_event_time(&mut events, "e1", None, Some(ts("2026-02-20T08:00:00")));
        assert!(result.is_found());
        assert_eq!(events[0].total_minutes(ts("2026-02-20T12:00:00")), -60.0);
        assert_eq!(edit_event_time(&mut events, "x", None, None), Lookup::NotFound);
    }

    #[test]
    fn range_is_newest_first_and_skips_empty_days() {
        let events = vec![
            event("a", "2026-02-18T09:00:00", Some("2026-02-18T10:00:00")),
            event("b", "2026-02-20T09:00:00", Some("2026-02-20T11:30:00")),
        ];
        let now = ts("2026-02-20T12:00:00");
        let range = events_for_range(&events, 7, day("2026-02-20"), now);
        let days: Vec<NaiveDate> = range.iter().map(|(d, _)| *d).collect();
        assert_eq!(days, vec![day("2026-02-20"), day("2026-02-18")]);
        assert_eq!(day_total_minutes(&range[0].1), 150.0);
    }

    #[test]
    fn rename_end_and_delete() {
        let mut events = vec![event("e1", "2026-02-20T09:00:00", None)];
        assert!(rename_event(&mut events, "e1", "Deep work".into()).is_found());
        assert!(end_event(&mut events, "e1", ts("2026-02-20T10:00:00")).is_found());
        assert_eq!(events[0].name, "Deep work");
        assert!(active_event(&events).is_none());
        assert!(delete_event(&mut events, "e1").is_found());
        assert_eq!(end_event(&mut events, "e1", ts("2026-02-20T10:00:00")), Lookup::NotFound);
    }
}
