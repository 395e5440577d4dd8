//! VaultKV - an in-memory key-value store with snapshot persistence
//!
//! - `store`: strings, lists, hashes and sorted sets with expiry
//! - `commands`: one `Command` per operation, looked up by name
//! - `engine`: the single guarded database and its lifecycle
//! - `snapshot` / `expiry`: background persistence and TTL sweeping
//! - `web`: HTTP/JSON transport

pub mod clock;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod expiry;
pub mod snapshot;
pub mod store;
pub mod web;

/// Re-export commonly used types
pub use commands::{Command, CommandRegistry};
pub use config::Config;
pub use engine::{Engine, EngineRuntime};
pub use error::{EngineError, EngineResult};
pub use snapshot::{Snapshot, SnapshotManager};
pub use store::{Database, Value};
