use chrono::{NaiveDate, NaiveDateTime};

use crate::model::mood::{Mood, MoodKind};

use super::{Lookup, new_id, remove_by_id};

pub fn add_mood(moods: &mut Vec<Mood>, mood: MoodKind, note: String, now: NaiveDateTime) -> String {
    let id = new_id(|candidate| moods.iter().any(|m| m.id == candidate));
    moods.push(Mood {
        id: id.clone(),
        mood,
        note,
        date: now.date(),
        created_at: now,
    });
    id
}

pub fn delete_mood(moods: &mut Vec<Mood>, id: &str) -> Lookup {
    remove_by_id(moods, id, |m| m.id.as_str())
}

/// Moods grouped by day, newest day first; within a day newest first.
pub fn mood_groups(moods: &[Mood]) -> Vec<(NaiveDate, Vec<&Mood>)> {
    let mut groups: Vec<(NaiveDate, Vec<&Mood>)> = Vec::new();
    for mood in moods.iter().rev() {
        match groups.iter_mut().find(|(day, _)| *day == mood.date) {
            Some((_, group)) => group.push(mood),
            None => groups.push((mood.date, vec![mood])),
        }
    }
    groups
}

/// Mean score of the given moods, `None` when empty
pub fn average_score<'a>(moods: impl IntoIterator<Item = &'a Mood>) -> Option<f64> {
    let (sum, count) = moods
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), m| (sum + m.mood.score() as u32, count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn groups_are_newest_first() {
        let mut moods = Vec::new();
        add_mood(&mut moods, MoodKind::Bad, String::new(), at(1, 8));
        add_mood(&mut moods, MoodKind::Good, "coffee".into(), at(2, 8));
        add_mood(&mut moods, MoodKind::Great, String::new(), at(2, 18));

        let groups = mood_groups(&moods);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, at(2, 0).date());
        assert_eq!(groups[0].1[0].mood, MoodKind::Great);
        assert_eq!(groups[0].1[1].note, "coffee");
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn average_of_scores() {
        let mut moods: Vec<Mood> = Vec::new();
        assert_eq!(average_score(&moods), None);
        add_mood(&mut moods, MoodKind::Amazing, String::new(), at(1, 8));
        add_mood(&mut moods, MoodKind::Okay, String::new(), at(1, 9));
        assert_eq!(average_score(&moods), Some(3.5));
    }

    #[test]
    fn delete_by_id() {
        let mut moods = Vec::new();
        let id = add_mood(&mut moods, MoodKind::Good, String::new(), at(1, 8));
        assert!(delete_mood(&mut moods, &id).is_found());
        assert!(moods.is_empty());
        assert_eq!(delete_mood(&mut moods, &id), Lookup::NotFound);
    }
}
