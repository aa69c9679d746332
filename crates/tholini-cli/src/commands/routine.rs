//! Routine step commands for CLI.

use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use tholini_core::RoutineTime;

use super::{CommandResult, Context};

#[derive(Clone, Copy, ValueEnum)]
pub enum TimeArg {
    Morning,
    Night,
}

impl From<TimeArg> for RoutineTime {
    fn from(arg: TimeArg) -> Self {
        match arg {
            TimeArg::Morning => RoutineTime::Morning,
            TimeArg::Night => RoutineTime::Night,
        }
    }
}

#[derive(Subcommand)]
pub enum RoutineAction {
    /// List routine steps
    List {
        /// Only show one time of day
        #[arg(long, value_enum)]
        time: Option<TimeArg>,
    },
    /// Add a step
    Add {
        /// Step name
        name: String,
        /// Time of day (default: morning)
        #[arg(long, value_enum, default_value = "morning")]
        time: TimeArg,
    },
    /// Check or uncheck a step
    Toggle {
        /// Step ID
        id: String,
    },
    /// Delete a step
    Remove {
        /// Step ID
        id: String,
    },
    /// Completion percentage per time of day
    Progress,
}

#[derive(Serialize)]
struct Progress {
    morning: u32,
    night: u32,
}

pub fn run(action: RoutineAction, ctx: &Context) -> CommandResult {
    let mut store = ctx.open_store()?;

    match action {
        RoutineAction::List { time } => {
            let steps: Vec<_> = match time {
                Some(time) => store.steps_for(time.into()).collect(),
                None => store.steps().iter().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&steps)?);
        }
        RoutineAction::Add { name, time } => {
            let event = store.add_step(&name, time.into())?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        RoutineAction::Toggle { id } => match store.toggle(&id)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("no step with id {id}"),
        },
        RoutineAction::Remove { id } => match store.delete_step(&id)? {
            Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
            None => println!("no step with id {id}"),
        },
        RoutineAction::Progress => {
            let progress = Progress {
                morning: store.progress_percent(RoutineTime::Morning),
                night: store.progress_percent(RoutineTime::Night),
            };
            println!("{}", serde_json::to_string_pretty(&progress)?);
        }
    }
    Ok(())
}
