//! Routine store: the step list, its daily history, and their persistence.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = RoutineStore::open(Database::open()?, CorruptDataPolicy::Reset)?;
//! store.toggle("1")?;
//! let pct = store.progress_percent(RoutineTime::Morning);
//! ```
//!
//! Every mutation writes the affected collection back to storage before
//! returning, and changes in-memory state only once that write succeeded.
//! Operations on unknown ids are no-ops and return `Ok(None)`.

use chrono::{DateTime, Local, SubsecRound, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::history::{self, to_percent, HistoryEntry};
use super::step::{default_steps, RoutineStep, RoutineTime};
use crate::error::{CoreError, ValidationError};
use crate::events::Event;
use crate::storage::{schema, CorruptDataPolicy, KeyValueStore, HISTORY_KEY, STEPS_KEY};

pub struct RoutineStore<S: KeyValueStore> {
    storage: S,
    steps: Vec<RoutineStep>,
    history: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> RoutineStore<S> {
    /// Load both collections from `storage` and write the resolved state back.
    ///
    /// Missing keys start from the default seed (steps) or empty (history).
    /// Payloads that fail to decode follow `policy`.
    ///
    /// # Errors
    /// Returns an error if storage fails, or if data is corrupt under
    /// [`CorruptDataPolicy::Fail`].
    pub fn open(storage: S, policy: CorruptDataPolicy) -> Result<Self, CoreError> {
        let steps = match storage.kv_get(STEPS_KEY)? {
            Some(raw) => recover(schema::decode_steps(STEPS_KEY, &raw), policy, default_steps)?,
            None => {
                info!("no saved routine, seeding default steps");
                default_steps()
            }
        };
        let history = match storage.kv_get(HISTORY_KEY)? {
            Some(raw) => recover(schema::decode_history(HISTORY_KEY, &raw), policy, Vec::new)?,
            None => Vec::new(),
        };

        let store = Self { storage, steps, history };
        store.write_steps(&store.steps)?;
        store.write_history(&store.history)?;
        Ok(store)
    }

    pub fn steps(&self) -> &[RoutineStep] {
        &self.steps
    }

    pub fn steps_for(&self, time: RoutineTime) -> impl Iterator<Item = &RoutineStep> {
        self.steps.iter().filter(move |s| s.time == time)
    }

    pub fn step(&self, id: &str) -> Option<&RoutineStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// All history entries in insertion order.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Last `days` history entries, newest first.
    pub fn recent_history(&self, days: usize) -> Vec<HistoryEntry> {
        self.history.iter().rev().take(days).copied().collect()
    }

    pub fn history_for(&self, date: chrono::NaiveDate) -> Option<&HistoryEntry> {
        self.history.iter().find(|h| h.date == date)
    }

    /// Completion fraction for one time of day, 0 when it has no steps.
    pub fn progress(&self, time: RoutineTime) -> f64 {
        let (completed, total) = self
            .steps_for(time)
            .fold((0u32, 0u32), |(c, t), s| (c + u32::from(s.completed), t + 1));
        if total == 0 {
            0.0
        } else {
            f64::from(completed) / f64::from(total)
        }
    }

    pub fn progress_percent(&self, time: RoutineTime) -> u32 {
        to_percent(self.progress(time))
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn toggle(&mut self, id: &str) -> Result<Option<Event>, CoreError> {
        self.toggle_at(id, Local::now())
    }

    /// Flip a step's completion and record today's totals across both times.
    ///
    /// State changes only after both collections are written; on a storage
    /// error the store is left as it was.
    pub fn toggle_at(
        &mut self,
        id: &str,
        now: DateTime<Local>,
    ) -> Result<Option<Event>, CoreError> {
        let at = now.with_timezone(&Utc).trunc_subsecs(3);
        let Some(index) = self.steps.iter().position(|s| s.id == id) else {
            debug!(id, "toggle ignored: no such step");
            return Ok(None);
        };

        let mut steps = self.steps.clone();
        let step = &mut steps[index];
        step.completed = !step.completed;
        step.timestamp = step.completed.then_some(at);
        let step = step.clone();

        let completed = steps.iter().filter(|s| s.completed).count() as u32;
        let total = steps.len() as u32;
        let today = now.date_naive();
        let mut history = self.history.clone();
        history::upsert(&mut history, today, completed, total);

        self.write_steps(&steps)?;
        if let Err(err) = self.write_history(&history) {
            if let Err(restore) = self.write_steps(&self.steps) {
                warn!("failed to restore steps after history write error: {restore}");
            }
            return Err(err);
        }
        self.steps = steps;
        self.history = history;
        debug!(id, completed = step.completed, %today, "step toggled");

        let history = HistoryEntry {
            date: today,
            completed_steps: completed,
            total_steps: total,
        };
        Ok(Some(Event::StepToggled { step, history, at }))
    }

    pub fn add_step(&mut self, name: &str, time: RoutineTime) -> Result<Event, CoreError> {
        self.add_step_at(name, time, Local::now())
    }

    /// Append a new incomplete step.
    ///
    /// # Errors
    /// [`ValidationError::EmptyName`] for a blank name and
    /// [`ValidationError::DuplicateStep`] when the name (ignoring case)
    /// already exists for `time`. Neither changes any state, and neither
    /// does a failed write.
    pub fn add_step_at(
        &mut self,
        name: &str,
        time: RoutineTime,
        now: DateTime<Local>,
    ) -> Result<Event, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.steps.iter().any(|s| s.same_slot(name, time)) {
            return Err(ValidationError::DuplicateStep {
                name: name.to_string(),
                time,
            }
            .into());
        }

        let step = RoutineStep::new(Uuid::new_v4().to_string(), name, time);
        let mut steps = self.steps.clone();
        steps.push(step.clone());
        self.write_steps(&steps)?;
        self.steps = steps;
        debug!(id = %step.id, name, %time, "step added");

        Ok(Event::StepAdded {
            step,
            at: now.with_timezone(&Utc).trunc_subsecs(3),
        })
    }

    pub fn delete_step(&mut self, id: &str) -> Result<Option<Event>, CoreError> {
        self.delete_step_at(id, Local::now())
    }

    /// Remove a step. Past history entries are left as recorded.
    pub fn delete_step_at(
        &mut self,
        id: &str,
        now: DateTime<Local>,
    ) -> Result<Option<Event>, CoreError> {
        let Some(index) = self.steps.iter().position(|s| s.id == id) else {
            debug!(id, "delete ignored: no such step");
            return Ok(None);
        };
        let mut steps = self.steps.clone();
        let step = steps.remove(index);
        self.write_steps(&steps)?;
        self.steps = steps;
        debug!(id, "step deleted");

        Ok(Some(Event::StepDeleted {
            step,
            at: now.with_timezone(&Utc).trunc_subsecs(3),
        }))
    }

    fn write_steps(&self, steps: &[RoutineStep]) -> Result<(), CoreError> {
        let raw = serde_json::to_string(steps)?;
        self.storage.kv_set(STEPS_KEY, &raw)?;
        Ok(())
    }

    fn write_history(&self, history: &[HistoryEntry]) -> Result<(), CoreError> {
        let raw = serde_json::to_string(history)?;
        self.storage.kv_set(HISTORY_KEY, &raw)?;
        Ok(())
    }
}

fn recover<T>(
    decoded: Result<T, crate::error::StorageError>,
    policy: CorruptDataPolicy,
    fallback: impl FnOnce() -> T,
) -> Result<T, CoreError> {
    match (decoded, policy) {
        (Ok(value), _) => Ok(value),
        (Err(err), CorruptDataPolicy::Reset) => {
            warn!("{err}; falling back to defaults");
            Ok(fallback())
        }
        (Err(err), CorruptDataPolicy::Fail) => Err(err.into()),
    }
}
