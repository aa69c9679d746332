//! # Tholini Core Library
//!
//! This library provides the core logic behind the Tholini skincare
//! assistant. Every operation is available through the standalone `tholini`
//! CLI binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Routine**: morning/night step list with completion state and a
//!   day-indexed completion history
//! - **Storage**: text key/value persistence (SQLite or in-memory) with a
//!   validating schema layer, plus TOML-based configuration
//! - **Chat**: async client for the assistant's multipart chat endpoint
//!
//! ## Key Components
//!
//! - [`RoutineStore`]: routine state and its four operations
//! - [`Database`]: durable key/value storage
//! - [`Config`]: application configuration management
//! - [`ChatClient`]: chat assistant client

pub mod chat;
pub mod error;
pub mod events;
pub mod routine;
pub mod storage;

pub use chat::{ChatClient, ChatReply, ChatRequest, ImageAttachment};
pub use error::{ChatError, ConfigError, CoreError, DatabaseError, StorageError, ValidationError};
pub use events::Event;
pub use routine::{HistoryEntry, RoutineStep, RoutineStore, RoutineTime};
pub use storage::{Config, CorruptDataPolicy, Database, KeyValueStore, MemoryStore};
