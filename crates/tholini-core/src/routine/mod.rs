//! Skincare routine tracking: steps, daily history, and the store that owns them.

mod history;
mod step;
mod store;

pub use history::{to_percent, HistoryEntry};
pub use step::{default_steps, RoutineStep, RoutineTime};
pub use store::RoutineStore;
