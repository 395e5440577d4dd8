//! Administrative commands (FLUSHALL)

use super::Command;
use crate::error::EngineResult;
use crate::store::Database;
use serde_json::Value as Json;
use tracing::info;

/// FLUSHALL command - Clear the primary keyspace
///
/// Syntax: flushAll
///
/// Every string, list and hash goes along with its expiry. Sorted sets
/// live in their own namespace and are kept. The engine writes a
/// snapshot right after this command.
pub struct FlushAllCommand;

impl Command for FlushAllCommand {
    fn execute(&self, db: &mut Database, _args: &[Json]) -> EngineResult<Json> {
        let removed = db.keyspace.len();
        db.keyspace.clear();
        info!("Flushed {} keys", removed);
        Ok(Json::from("OK"))
    }

    fn name(&self) -> &'static str {
        "flushAll"
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }

    fn forces_snapshot(&self) -> bool {
        true
    }
}
