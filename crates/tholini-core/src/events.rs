use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::routine::{HistoryEntry, RoutineStep};

/// Every state change in the routine store produces an Event.
/// Front ends render them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StepAdded {
        step: RoutineStep,
        at: DateTime<Utc>,
    },
    /// A step was checked or unchecked; `history` is today's entry after the upsert.
    StepToggled {
        step: RoutineStep,
        history: HistoryEntry,
        at: DateTime<Utc>,
    },
    StepDeleted {
        step: RoutineStep,
        at: DateTime<Utc>,
    },
}
