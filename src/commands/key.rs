//! Key commands (DELETE, EXISTS, KEYS)

use super::{extract_string, value_to_json, Command};
use crate::error::EngineResult;
use crate::store::Database;
use serde_json::Value as Json;

/// DELETE command - Delete a key from the primary keyspace
///
/// Syntax: delete key
///
/// Returns the previous value, or null if the key did not exist.
pub struct DeleteCommand;

impl Command for DeleteCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(db
            .keyspace
            .delete(&key)
            .map(value_to_json)
            .unwrap_or(Json::Null))
    }

    fn name(&self) -> &'static str {
        "delete"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// EXISTS command - Check if a key exists
///
/// Syntax: exists key
pub struct ExistsCommand;

impl Command for ExistsCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::Bool(db.keyspace.exists(&key)))
    }

    fn name(&self) -> &'static str {
        "exists"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// KEYS command - List every live key of the primary keyspace
///
/// Syntax: keys
pub struct KeysCommand;

impl Command for KeysCommand {
    fn execute(&self, db: &mut Database, _args: &[Json]) -> EngineResult<Json> {
        let mut keys = db.keyspace.keys();
        keys.sort();
        Ok(Json::from(keys))
    }

    fn name(&self) -> &'static str {
        "keys"
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
