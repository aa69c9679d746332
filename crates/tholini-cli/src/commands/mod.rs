pub mod chat;
pub mod config;
pub mod history;
pub mod routine;

use tholini_core::{Config, Database, KeyValueStore, MemoryStore, RoutineStore};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// State shared by every subcommand.
pub struct Context {
    pub config: Config,
    pub memory: bool,
}

impl Context {
    /// Open the routine store over the configured backend.
    pub fn open_store(
        &self,
    ) -> Result<RoutineStore<Box<dyn KeyValueStore>>, Box<dyn std::error::Error>> {
        tracing::debug!(memory = self.memory, "opening routine store");
        let storage: Box<dyn KeyValueStore> = if self.memory {
            Box::new(MemoryStore::new())
        } else {
            Box::new(Database::open()?)
        };
        Ok(RoutineStore::open(storage, self.config.routine.on_corrupt)?)
    }
}
