use chrono::{Duration, NaiveDateTime};

use crate::model::todo::{Priority, Todo};

use super::{Lookup, new_id, remove_by_id};

fn find_mut<'a>(todos: &'a mut [Todo], id: &str) -> Option<&'a mut Todo> {
    todos.iter_mut().find(|t| t.id == id)
}

/// Append a new pending todo. Returns its id.
pub fn add_todo(todos: &mut Vec<Todo>, text: String, priority: Priority, now: NaiveDateTime) -> String {
    let id = new_id(|candidate| todos.iter().any(|t| t.id == candidate));
    todos.push(Todo {
        id: id.clone(),
        text,
        done: false,
        priority,
        created_at: now,
        done_at: None,
    });
    id
}

/// Flip done/pending, stamping or clearing `done_at`. Returns the new state.
pub fn toggle_todo(todos: &mut [Todo], id: &str, now: NaiveDateTime) -> Lookup<bool> {
    find_mut(todos, id)
        .map(|todo| {
            todo.done = !todo.done;
            todo.done_at = if todo.done { Some(now) } else { None };
            todo.done
        })
        .into()
}

pub fn edit_todo(todos: &mut [Todo], id: &str, text: String) -> Lookup {
    find_mut(todos, id).map(|todo| todo.text = text).into()
}

/// Advance priority low → medium → high → low. Returns the new priority.
pub fn cycle_priority(todos: &mut [Todo], id: &str) -> Lookup<Priority> {
    find_mut(todos, id)
        .map(|todo| {
            todo.priority = todo.priority.next();
            todo.priority
        })
        .into()
}

pub fn set_priority(todos: &mut [Todo], id: &str, priority: Priority) -> Lookup {
    find_mut(todos, id).map(|todo| todo.priority = priority).into()
}

pub fn delete_todo(todos: &mut Vec<Todo>, id: &str) -> Lookup {
    remove_by_id(todos, id, |t| t.id.as_str())
}

/// Display order: pending by (priority rank, created_at), then done with
/// the most recently completed first.
pub fn sorted_todos(todos: &[Todo]) -> Vec<&Todo> {
    let (mut pending, mut done): (Vec<&Todo>, Vec<&Todo>) = todos.iter().partition(|t| !t.done);
    pending.sort_by_key(|t| (t.priority.rank(), t.created_at));
    done.sort_by(|a, b| b.completed_or_created().cmp(&a.completed_or_created()));
    pending.extend(done);
    pending
}

/// Delete done todos completed more than `purge_days` ago. A window of zero
/// or less disables purging. Returns how many were removed.
pub fn purge_old_done(todos: &mut Vec<Todo>, purge_days: i64, now: NaiveDateTime) -> usize {
    if purge_days <= 0 {
        return 0;
    }
    // A window reaching past the earliest representable time keeps everything.
    let Some(cutoff) = Duration::try_days(purge_days).and_then(|d| now.checked_sub_signed(d)) else {
        return 0;
    };
    let before = todos.len();
    todos.retain(|t| !(t.done && t.completed_or_created() < cutoff));
    before - todos.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn sample() -> Vec<Todo> {
        let mut todos = Vec::new();
        add_todo(&mut todos, "Low".into(), Priority::Low, at(1, 9));
        add_todo(&mut todos, "High".into(), Priority::High, at(1, 10));
        add_todo(&mut todos, "Medium".into(), Priority::Medium, at(1, 11));
        add_todo(&mut todos, "High later".into(), Priority::High, at(1, 12));
        todos
    }

    fn id_of(todos: &[Todo], text: &str) -> String {
        todos.iter().find(|t| t.text == text).unwrap().id.clone()
    }

    #[test]
    fn add_defaults() {
        let mut todos = Vec::new();
        let id = add_todo(&mut todos, "Buy milk".into(), Priority::default(), at(1, 9));
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, id);
        assert_eq!(todos[0].priority, Priority::Medium);
        assert!(!todos[0].done);
        assert_eq!(todos[0].done_at, None);
    }

    #[test]
    fn toggle_sets_and_clears_done_at() {
        let mut todos = sample();
        let id = id_of(&todos, "Low");
        assert_eq!(toggle_todo(&mut todos, &id, at(2, 8)), Lookup::Found(true));
        assert_eq!(todos[0].done_at, Some(at(2, 8)));
        assert_eq!(toggle_todo(&mut todos, &id, at(2, 9)), Lookup::Found(false));
        assert_eq!(todos[0].done_at, None);
        for t in &todos {
            assert_eq!(t.done, t.done_at.is_some());
        }
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut todos = sample();
        let before = todos.clone();
        assert_eq!(toggle_todo(&mut todos, "nope", at(2, 8)), Lookup::NotFound);
        assert_eq!(edit_todo(&mut todos, "nope", "x".into()), Lookup::NotFound);
        assert_eq!(cycle_priority(&mut todos, "nope"), Lookup::NotFound);
        assert_eq!(delete_todo(&mut todos, "nope"), Lookup::NotFound);
        assert_eq!(todos, before);
    }

    #[test]
    fn cycle_priority_three_times_is_identity() {
        let mut todos = sample();
        let id = id_of(&todos, "Medium");
        assert_eq!(cycle_priority(&mut todos, &id), Lookup::Found(Priority::High));
        assert_eq!(cycle_priority(&mut todos, &id), Lookup::Found(Priority::Low));
        assert_eq!(cycle_priority(&mut todos, &id), Lookup::Found(Priority::Medium));
    }

    #[test]
    fn edit_and_delete() {
        let mut todos = sample();
        let id = id_of(&todos, "Low");
        assert!(edit_todo(&mut todos, &id, "Lower".into()).is_found());
        assert_eq!(todos[0].text, "Lower");
        assert!(delete_todo(&mut todos, &id).is_found());
        assert_eq!(todos.len(), 3);
        assert_eq!(todos[0].text, "High");
    }

    #[test]
    fn sort_pending_by_priority_then_age() {
        let todos = sample();
        let order: Vec<&str> = sorted_todos(&todos).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["High", "High later", "Medium", "Low"]);
    }

    #[test]
    fn sort_done_after_pending_newest_first() {
        let mut todos = sample();
        let high = id_of(&todos, "High");
        let low = id_of(&todos, "Low");
        let _ = toggle_todo(&mut todos, &high, at(3, 9));
        let _ = toggle_todo(&mut todos, &low, at(4, 9));
        let sorted = sorted_todos(&todos);
        let order: Vec<&str> = sorted.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["High later", "Medium", "Low", "High"]);
        let first_done = sorted.iter().position(|t| t.done).unwrap();
        assert!(sorted[..first_done].iter().all(|t| !t.done));
        assert!(sorted[first_done..].iter().all(|t| t.done));
    }

    #[test]
    fn purge_removes_only_old_done() {
        let now = at(20, 12);
        let mut todos = Vec::new();
        let old = add_todo(&mut todos, "Old done".into(), Priority::Medium, at(1, 9));
        let recent = add_todo(&mut todos, "Recent done".into(), Priority::Medium, at(1, 9));
        add_todo(&mut todos, "Old pending".into(), Priority::Medium, at(1, 9));
        let _ = toggle_todo(&mut todos, &old, now - Duration::days(10));
        let _ = toggle_todo(&mut todos, &recent, now - Duration::days(1));

        assert_eq!(purge_old_done(&mut todos, 7, now), 1);
        let left: Vec<&str> = todos.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(left, vec!["Recent done", "Old pending"]);
    }

    #[test]
    fn purge_disabled_for_zero_days() {
        let now = at(20, 12);
        let mut todos = Vec::new();
        let id = add_todo(&mut todos, "Ancient".into(), Priority::Medium, at(1, 9));
        let _ = toggle_todo(&mut todos, &id, now - Duration::days(100));
        assert_eq!(purge_old_done(&mut todos, 0, now), 0);
        assert_eq!(purge_old_done(&mut todos, -3, now), 0);
        assert_eq!(todos.len(), 1);
    }

    #[test]
    fn purge_with_huge_window_keeps_everything() {
        let now = at(20, 12);
        let mut todos = Vec::new();
        let id = add_todo(&mut todos, "Ancient".into(), Priority::Medium, at(1, 9));
        let _ = toggle_todo(&mut todos, &id, now - Duration::days(100));
        assert_eq!(purge_old_done(&mut todos, 100_000_000, now), 0);
        assert_eq!(purge_old_done(&mut todos, i64::MAX, now), 0);
        assert_eq!(todos.len(), 1);
    }
}
