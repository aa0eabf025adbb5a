use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A goal tracked by daily check-ins.
///
/// `check_ins` is a set, so stored days are always unique and serialize in
/// ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub check_ins: BTreeSet<NaiveDate>,
    pub created_at: NaiveDateTime,
}

impl Goal {
    pub fn is_checked_in(&self, day: NaiveDate) -> bool {
        self.check_ins.contains(&day)
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_ins_dedup_and_sort_on_load() {
        let json = r#"{
            "id": "g1",
            "title": "Read",
            "check_ins": ["2026-02-21", "2026-02-19", "2026-02-21"],
            "created_at": "2026-02-01T08:00:00"
        }"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        let days: Vec<String> = goal.check_ins.iter().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2026-02-19", "2026-02-21"]);
        assert_eq!(goal.description, "");
    }
}
