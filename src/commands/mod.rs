//! Command execution module
//!
//! Provides a unified interface for all operations through the Command
//! trait. Each family of operations is implemented in its own file.

mod registry;

// Command implementations
mod admin;
mod hash;
mod key;
mod list;
mod string;
mod ttl;
mod zset;

pub use registry::CommandRegistry;

use crate::error::{EngineError, EngineResult};
use crate::store::{Database, Value};
use serde_json::Value as Json;

/// Command execution trait
///
/// All operations implement this trait with a single execute method.
/// The engine validates the argument count against `min_args`/`max_args`
/// before calling `execute`, with the database lock held.
pub trait Command: Send + Sync {
    /// Execute the command against the locked database
    ///
    /// Arguments:
    /// - db: the state behind the engine guard
    /// - args: positional arguments (excluding the operation name itself)
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json>;

    /// Canonical operation name
    fn name(&self) -> &'static str;

    /// Alternative names accepted by the registry
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Get the minimum number of arguments required
    fn min_args(&self) -> usize {
        0
    }

    /// Get the maximum number of arguments (None = unlimited)
    fn max_args(&self) -> Option<usize> {
        None
    }

    /// Whether a snapshot must be written right after this command
    fn forces_snapshot(&self) -> bool {
        false
    }
}

/// Positional argument lookup
pub(crate) fn arg(args: &[Json], index: usize) -> EngineResult<&Json> {
    args.get(index)
        .ok_or_else(|| EngineError::invalid(format!("missing argument #{}", index + 1)))
}

/// Extract a string argument; numbers and booleans are rendered as text
pub(crate) fn extract_string(args: &[Json], index: usize) -> EngineResult<String> {
    match arg(args, index)? {
        Json::String(s) => Ok(s.clone()),
        Json::Number(n) => Ok(n.to_string()),
        Json::Bool(b) => Ok(b.to_string()),
        _ => Err(EngineError::invalid(format!(
            "argument #{} must be a string",
            index + 1
        ))),
    }
}

/// Extract every argument from `from` onwards as strings
pub(crate) fn extract_strings(args: &[Json], from: usize) -> EngineResult<Vec<String>> {
    (from..args.len()).map(|i| extract_string(args, i)).collect()
}

/// Extract an integer from a JSON integer or a numeric string
pub(crate) fn extract_integer(args: &[Json], index: usize) -> EngineResult<i64> {
    let parsed = match arg(args, index)? {
        Json::Number(n) => n.as_i64(),
        Json::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| EngineError::invalid("value is not an integer or out of range"))
}

/// Extract an optional TTL; a missing or null argument means "no TTL"
pub(crate) fn extract_ttl(args: &[Json], index: usize) -> EngineResult<Option<i64>> {
    match args.get(index) {
        None | Some(Json::Null) => Ok(None),
        Some(_) => extract_integer(args, index).map(Some),
    }
}

/// Extract a finite floating-point score
pub(crate) fn extract_score(args: &[Json], index: usize) -> EngineResult<f64> {
    let parsed = match arg(args, index)? {
        Json::Number(n) => n.as_f64(),
        Json::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|score| score.is_finite())
        .ok_or_else(|| EngineError::invalid("score is not a finite number"))
}

/// Render a stored value for the caller
pub(crate) fn value_to_json(value: Value) -> Json {
    match value {
        Value::String(s) => Json::String(s),
        Value::List(list) => Json::Array(list.into_iter().map(Json::String).collect()),
        Value::Hash(hash) => Json::Object(
            hash.into_iter()
                .map(|(field, value)| (field, Json::String(value)))
                .collect(),
        ),
    }
}
