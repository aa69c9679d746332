//! Core error types for tholini-core.
//!
//! This module defines the error hierarchy using thiserror. Each layer
//! (storage, config, routine validation, chat) has its own enum and
//! `CoreError` wraps them for callers that do not care which layer failed.

use std::path::PathBuf;
use thiserror::Error;

use crate::routine::RoutineTime;

/// Core error type for tholini-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted routine data could not be decoded
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// User input rejected by the routine store
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Chat assistant request failed
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Errors raised while decoding persisted routine collections.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Payload under `key` is not valid JSON or violates the schema
    #[error("corrupt data under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

/// Rejections of user input. The messages are shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Step name is empty after trimming
    #[error("Please enter a step name")]
    EmptyName,

    /// A step with the same name (ignoring case) exists for this time of day
    #[error("{name} already exists in your {time} routine")]
    DuplicateStep { name: String, time: RoutineTime },
}

/// Chat assistant errors.
#[derive(Error, Debug)]
pub enum ChatError {
    /// Neither a message nor an image was supplied
    #[error("nothing to send: provide a message or an image")]
    EmptyRequest,

    /// Network-level failure
    #[error("Failed to send message: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success HTTP status
    #[error("chat service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body was not the expected JSON shape
    #[error("invalid chat response: {0}")]
    InvalidResponse(String),

    /// Endpoint answered with `status != "success"`
    #[error("{0}")]
    Rejected(String),

    /// Invalid endpoint URL or attachment metadata
    #[error("invalid chat request: {0}")]
    InvalidRequest(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _msg)
                if e.code == rusqlite::ErrorCode::DatabaseLocked =>
            {
                DatabaseError::Locked
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_user_alerts() {
        assert_eq!(ValidationError::EmptyName.to_string(), "Please enter a step name");
        let dup = ValidationError::DuplicateStep {
            name: "Cleanse".into(),
            time: RoutineTime::Morning,
        };
        assert_eq!(dup.to_string(), "Cleanse already exists in your morning routine");
    }

    #[test]
    fn validation_error_displays_without_prefix_through_core_error() {
        let err: CoreError = ValidationError::EmptyName.into();
        assert_eq!(err.to_string(), "Please enter a step name");
    }

    #[test]
    fn locked_sqlite_failure_maps_to_locked() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ErrorCode::DatabaseLocked,
                extended_code: 6,
            },
            None,
        );
        assert!(matches!(DatabaseError::from(err), DatabaseError::Locked));
    }
}
