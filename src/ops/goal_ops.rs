use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::model::goal::Goal;

use super::{Lookup, new_id, remove_by_id};

pub fn add_goal(goals: &mut Vec<Goal>, title: String, description: String, now: NaiveDateTime) -> String {
    let id = new_id(|candidate| goals.iter().any(|g| g.id == candidate));
    goals.push(Goal {
        id: id.clone(),
        title,
        description,
        check_ins: Default::default(),
        created_at: now,
    });
    id
}

pub fn edit_goal(
    goals: &mut [Goal],
    id: &str,
    title: Option<String>,
    description: Option<String>,
) -> Lookup {
    let Some(goal) = goals.iter_mut().find(|g| g.id == id) else {
        return Lookup::NotFound;
    };
    if let Some(title) = title {
        goal.title = title;
    }
    if let Some(description) = description {
        goal.description = description;
    }
    Lookup::Found(())
}

pub fn delete_goal(goals: &mut Vec<Goal>, id: &str) -> Lookup {
    remove_by_id(goals, id, |g| g.id.as_str())
}

/// Toggle `day` in the goal's check-ins. Returns whether the day is checked
/// in afterwards.
pub fn check_in(goals: &mut [Goal], id: &str, day: NaiveDate) -> Lookup<bool> {
    let Some(goal) = goals.iter_mut().find(|g| g.id == id) else {
        return Lookup::NotFound;
    };
    if goal.check_ins.remove(&day) {
        Lookup::Found(false)
    } else {
        goal.check_ins.insert(day);
        Lookup::Found(true)
    }
}

/// Consecutive checked-in days ending today, or yesterday when today is not
/// checked in yet.
///
/// The walk does not stop at the goal's creation day: check-ins recorded
/// before it still count.
pub fn streak(goal: &Goal, today: NaiveDate) -> u32 {
    let mut day = if goal.is_checked_in(today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if goal.is_checked_in(yesterday) => yesterday,
            _ => return 0,
        }
    };
    let mut count = 0;
    while goal.is_checked_in(day) {
        count += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

/// `(day, checked_in)` for today and the preceding days, newest first,
/// at most `days` entries and never before the goal was created.
pub fn history(goal: &Goal, days: u32, today: NaiveDate) -> Vec<(NaiveDate, bool)> {
    let created = goal.created_on();
    (0..days)
        .map_while(|offset| today.checked_sub_days(Days::new(offset as u64)))
        .take_while(|day| *day >= created)
        .map(|day| (day, goal.is_checked_in(day)))
        .collect()
}

/// Share of history days checked in, as a whole percentage
pub fn completion_rate(history: &[(NaiveDate, bool)]) -> u32 {
    if history.is_empty() {
        return 0;
    }
    let checked = history.iter().filter(|(_, done)| *done).count();
    (checked * 100 / history.len()) as u32
}

pub fn checked_in_today(goals: &[Goal], today: NaiveDate) -> usize {
    goals.iter().filter(|g| g.is_checked_in(today)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, d).unwrap()
    }

    fn goal_created(d: u32, check_ins: &[u32]) -> Goal {
        Goal {
            id: "g1".into(),
            title: "Read".into(),
            description: String::new(),
            check_ins: check_ins.iter().map(|d| day(*d)).collect(),
            created_at: day(d).and_hms_opt(8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn check_in_toggles() {
        let mut goals = vec![goal_created(1, &[])];
        assert_eq!(check_in(&mut goals, "g1", day(20)), Lookup::Found(true));
        assert_eq!(check_in(&mut goals, "g1", day(20)), Lookup::Found(false));
        assert!(!goals[0].is_checked_in(day(20)));
        assert_eq!(check_in(&mut goals, "nope", day(20)), Lookup::NotFound);
    }

    #[test]
    fn streak_of_five_consecutive_days() {
        let goal = goal_created(1, &[16, 17, 18, 19, 20]);
        assert_eq!(streak(&goal, day(20)), 5);
    }

    #[test]
    fn streak_broken_by_gap_yesterday() {
        let goal = goal_created(1, &[17, 20]);
        assert_eq!(streak(&goal, day(20)), 1);
    }

    #[test]
    fn streak_survives_today_not_yet_checked() {
        let goal = goal_created(1, &[17, 18, 19]);
        assert_eq!(streak(&goal, day(20)), 3);
        assert_eq!(streak(&goal, day(21)), 0);
    }

    #[test]
    fn streak_not_capped_at_creation() {
        let goal = goal_created(19, &[17, 18, 19, 20]);
        assert_eq!(streak(&goal, day(20)), 4);
    }

    #[test]
    fn history_stops_at_creation_day() {
        let goal = goal_created(18, &[18, 20]);
        let hist = history(&goal, 30, day(20));
        assert_eq!(hist, vec![(day(20), true), (day(19), false), (day(18), true)]);
        assert_eq!(completion_rate(&hist), 66);
    }

    #[test]
    fn history_limited_by_days() {
        let goal = goal_created(1, &[20]);
        let hist = history(&goal, 7, day(20));
        assert_eq!(hist.len(), 7);
        assert_eq!(hist[0], (day(20), true));
        assert_eq!(hist[6].0, day(14));
        assert_eq!(completion_rate(&[]), 0);
    }

    #[test]
    fn add_edit_delete() {
        let now = day(5).and_hms_opt(9, 0, 0).unwrap();
        let mut goals = Vec::new();
        let id = add_goal(&mut goals, "Run".into(), String::new(), now);
        assert!(edit_goal(&mut goals, &id, None, Some("5k".into())).is_found());
        assert_eq!(goals[0].title, "Run");
        assert_eq!(goals[0].description, "5k");
        assert_eq!(checked_in_today(&goals, day(5)), 0);
        assert!(delete_goal(&mut goals, &id).is_found());
        assert!(goals.is_empty());
    }
}
