use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time of day a routine step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineTime {
    Morning,
    Night,
}

impl RoutineTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Night => "night",
        }
    }
}

impl fmt::Display for RoutineTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One action in the skincare routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineStep {
    pub id: String,
    pub name: String,
    pub time: RoutineTime,
    pub completed: bool,
    /// Set when the step was last checked off; cleared when unchecked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RoutineStep {
    pub fn new(id: impl Into<String>, name: impl Into<String>, time: RoutineTime) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time,
            completed: false,
            timestamp: None,
        }
    }

    /// Whether this step collides with `name` in the same time slot.
    pub fn same_slot(&self, name: &str, time: RoutineTime) -> bool {
        self.time == time && self.name.to_lowercase() == name.to_lowercase()
    }
}

/// The routine a new user starts with.
pub fn default_steps() -> Vec<RoutineStep> {
    vec![
        RoutineStep::new("1", "Cleanse", RoutineTime::Morning),
        RoutineStep::new("2", "Tone", RoutineTime::Morning),
        RoutineStep::new("3", "Moisturize", RoutineTime::Morning),
        RoutineStep::new("4", "Sunscreen", RoutineTime::Morning),
        RoutineStep::new("5", "Cleanse", RoutineTime::Night),
        RoutineStep::new("6", "Serum", RoutineTime::Night),
        RoutineStep::new("7", "Night Cream", RoutineTime::Night),
    ]
}
