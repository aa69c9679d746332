//! Decoding and validation of persisted routine collections.
//!
//! Stored payloads are JSON text. Anything that parses but breaks a
//! collection invariant is reported as corrupt, the same as unparsable text.

use std::collections::HashSet;

use crate::error::StorageError;
use crate::routine::{HistoryEntry, RoutineStep};

pub fn decode_steps(key: &str, raw: &str) -> Result<Vec<RoutineStep>, StorageError> {
    let steps: Vec<RoutineStep> = serde_json::from_str(raw).map_err(|e| corrupt(key, e))?;
    validate_steps(&steps).map_err(|reason| corrupt(key, reason))?;
    Ok(steps)
}

pub fn decode_history(key: &str, raw: &str) -> Result<Vec<HistoryEntry>, StorageError> {
    let history: Vec<HistoryEntry> = serde_json::from_str(raw).map_err(|e| corrupt(key, e))?;
    validate_history(&history).map_err(|reason| corrupt(key, reason))?;
    Ok(history)
}

pub fn validate_steps(steps: &[RoutineStep]) -> Result<(), String> {
    let mut ids = HashSet::new();
    let mut slots = HashSet::new();
    for step in steps {
        if step.id.is_empty() {
            return Err("step with empty id".into());
        }
        if !ids.insert(step.id.as_str()) {
            return Err(format!("duplicate step id '{}'", step.id));
        }
        if step.name.trim().is_empty() {
            return Err(format!("step '{}' has an empty name", step.id));
        }
        if !slots.insert((step.name.to_lowercase(), step.time)) {
            return Err(format!("duplicate {} step '{}'", step.time, step.name));
        }
        if !step.completed && step.timestamp.is_some() {
            return Err(format!("step '{}' has a timestamp but is not completed", step.id));
        }
    }
    Ok(())
}

pub fn validate_history(history: &[HistoryEntry]) -> Result<(), String> {
    let mut dates = HashSet::new();
    for entry in history {
        if !dates.insert(entry.date) {
            return Err(format!("duplicate history date {}", entry.date));
        }
        if entry.completed_steps > entry.total_steps {
            return Err(format!(
                "history {} has {} completed of {} steps",
                entry.date, entry.completed_steps, entry.total_steps
            ));
        }
    }
    Ok(())
}

fn corrupt(key: &str, reason: impl ToString) -> StorageError {
    StorageError::Corrupt {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_original_step_payload() {
        let raw = r#"[
            {"id":"1","name":"Cleanse","time":"morning","completed":true,"timestamp":"2026-10-18T07:30:00.000Z"},
            {"id":"5","name":"Cleanse","time":"night","completed":false}
        ]"#;
        let steps = decode_steps("routineSteps", raw).unwrap();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].timestamp.is_some());
        assert!(steps[1].timestamp.is_none());
    }

    #[test]
    fn rejects_unparsable_text() {
        let err = decode_steps("routineSteps", "{not json").unwrap_err();
        let StorageError::Corrupt { key, .. } = err;
        assert_eq!(key, "routineSteps");
    }

    #[test]
    fn rejects_unknown_time_of_day() {
        let raw = r#"[{"id":"1","name":"Cleanse","time":"noon","completed":false}]"#;
        assert!(decode_steps("routineSteps", raw).is_err());
    }

    #[test]
    fn rejects_duplicate_slot_ignoring_case() {
        let raw = r#"[
            {"id":"1","name":"Cleanse","time":"morning","completed":false},
            {"id":"2","name":"CLEANSE","time":"morning","completed":false}
        ]"#;
        let err = decode_steps("routineSteps", raw).unwrap_err();
        assert!(err.to_string().contains("duplicate morning step"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let raw = r#"[
            {"id":"1","name":"Cleanse","time":"morning","completed":false},
            {"id":"1","name":"Tone","time":"morning","completed":false}
        ]"#;
        assert!(decode_steps("routineSteps", raw).is_err());
    }

    #[test]
    fn rejects_timestamp_on_incomplete_step() {
        let raw = r#"[{"id":"1","name":"Cleanse","time":"morning","completed":false,"timestamp":"2026-10-18T07:30:00Z"}]"#;
        assert!(decode_steps("routineSteps", raw).is_err());
    }

    #[test]
    fn decodes_history_and_checks_counts() {
        let ok = r#"[{"date":"2026-10-17","completedSteps":3,"totalSteps":7}]"#;
        assert_eq!(decode_history("routineHistory", ok).unwrap().len(), 1);

        let over = r#"[{"date":"2026-10-17","completedSteps":8,"totalSteps":7}]"#;
        assert!(decode_history("routineHistory", over).is_err());

        let dup = r#"[
            {"date":"2026-10-17","completedSteps":1,"totalSteps":7},
            {"date":"2026-10-17","completedSteps":2,"totalSteps":7}
        ]"#;
        assert!(decode_history("routineHistory", dup).is_err());
    }
}
