use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily snapshot of completed vs total routine steps.
///
/// Field names follow the persisted camelCase format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub completed_steps: u32,
    pub total_steps: u32,
}

impl HistoryEntry {
    /// Completion fraction in `[0, 1]`; 0 for a day with no steps.
    pub fn ratio(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            f64::from(self.completed_steps) / f64::from(self.total_steps)
        }
    }

    pub fn percent(&self) -> u32 {
        to_percent(self.ratio())
    }
}

/// Round a fraction to a whole percentage.
pub fn to_percent(fraction: f64) -> u32 {
    (fraction * 100.0).round() as u32
}

/// Insert or overwrite the entry for `date`. Entries keep insertion order.
pub(crate) fn upsert(history: &mut Vec<HistoryEntry>, date: NaiveDate, completed: u32, total: u32) {
    match history.iter_mut().find(|h| h.date == date) {
        Some(entry) => {
            entry.completed_steps = completed;
            entry.total_steps = total;
        }
        None => history.push(HistoryEntry {
            date,
            completed_steps: completed,
            total_steps: total,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn upsert_overwrites_same_day() {
        let mut history = Vec::new();
        upsert(&mut history, day(1), 1, 7);
        upsert(&mut history, day(1), 3, 7);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].completed_steps, 3);
    }

    #[test]
    fn upsert_appends_new_day() {
        let mut history = Vec::new();
        upsert(&mut history, day(1), 1, 7);
        upsert(&mut history, day(2), 0, 6);
        assert_eq!(history.iter().map(|h| h.date).collect::<Vec<_>>(), vec![day(1), day(2)]);
    }

    #[test]
    fn ratio_of_empty_day_is_zero() {
        let entry = HistoryEntry {
            date: day(3),
            completed_steps: 0,
            total_steps: 0,
        };
        assert_eq!(entry.ratio(), 0.0);
        assert_eq!(entry.percent(), 0);
    }

    #[test]
    fn percent_rounds_to_nearest() {
        let entry = HistoryEntry {
            date: day(3),
            completed_steps: 1,
            total_steps: 7,
        };
        assert_eq!(entry.percent(), 14);
        let entry = HistoryEntry {
            date: day(3),
            completed_steps: 2,
            total_steps: 3,
        };
        assert_eq!(entry.percent(), 67);
    }

    #[test]
    fn serializes_camel_case_date_string() {
        let entry = HistoryEntry {
            date: day(18),
            completed_steps: 1,
            total_steps: 7,
        };
        assert_eq!(
            serde_json::to_value(entry).unwrap(),
            serde_json::json!({"date": "2026-10-18", "completedSteps": 1, "totalSteps": 7})
        );
    }
}
