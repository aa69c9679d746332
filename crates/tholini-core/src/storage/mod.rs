mod config;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod schema;

pub use config::{ChatConfig, Config, CorruptDataPolicy, LogConfig, RoutineConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::DatabaseError;

/// Storage key holding the serialized step list.
pub const STEPS_KEY: &str = "routineSteps";
/// Storage key holding the serialized history list.
pub const HISTORY_KEY: &str = "routineHistory";

/// Text key/value persistence, the shape of browser local storage.
///
/// Implementations must make a successful `kv_set` visible to the next
/// `kv_get` of the same key.
pub trait KeyValueStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError>;
    fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).kv_get(key)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).kv_set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        (**self).kv_get(key)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        (**self).kv_set(key, value)
    }
}

/// Returns the data directory, creating it if needed.
///
/// `THOLINI_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/tholini/`, or `~/.config/tholini-dev/` when `THOLINI_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("THOLINI_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("THOLINI_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("tholini-dev")
            } else {
                base_dir.join("tholini")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
