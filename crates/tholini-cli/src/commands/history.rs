use clap::Subcommand;
use serde::Serialize;
use tholini_core::HistoryEntry;

use super::{CommandResult, Context};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Recent daily completion, newest first
    Show {
        /// Number of days (default: routine.history_days)
        #[arg(long)]
        days: Option<usize>,
    },
}

#[derive(Serialize)]
struct HistoryRow {
    #[serde(flatten)]
    entry: HistoryEntry,
    percent: u32,
}

pub fn run(action: HistoryAction, ctx: &Context) -> CommandResult {
    let store = ctx.open_store()?;

    match action {
        HistoryAction::Show { days } => {
            let days = days.unwrap_or(ctx.config.routine.history_days);
            let rows: Vec<_> = store
                .recent_history(days)
                .into_iter()
                .map(|entry| HistoryRow {
                    percent: entry.percent(),
                    entry,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}
