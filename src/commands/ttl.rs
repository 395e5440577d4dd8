//! TTL commands (EXPIRE, PERSIST, TTL)

use super::{extract_integer, extract_string, Command};
use crate::error::EngineResult;
use crate::store::Database;
use serde_json::Value as Json;

/// EXPIRE command - Set a timeout on a key
///
/// Syntax: expire key seconds
///
/// Returns false if the key does not exist.
pub struct ExpireCommand;

impl Command for ExpireCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let seconds = extract_integer(args, 1)?;
        Ok(Json::Bool(db.keyspace.expire(&key, seconds)))
    }

    fn name(&self) -> &'static str {
        "expire"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

/// PERSIST command - Remove the timeout of a key
///
/// Syntax: persist key
///
/// Returns false if the key is absent or has no timeout.
pub struct PersistCommand;

impl Command for PersistCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::Bool(db.keyspace.persist(&key)))
    }

    fn name(&self) -> &'static str {
        "persist"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// TTL command - Get the time to live for a key
///
/// Syntax: ttl key
///
/// Returns:
/// - The TTL in seconds
/// - -1 if the key exists but has no expiration
/// - -2 if the key does not exist
pub struct TtlCommand;

impl Command for TtlCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::from(db.keyspace.ttl(&key)))
    }

    fn name(&self) -> &'static str {
        "ttl"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Value;
    use serde_json::json;

    #[test]
    fn test_expire_ttl() {
        let mut db = Database::new();
        db.keyspace.set("key1", Value::string("value1"), None);

        let result = ExpireCommand.execute(&mut db, &[json!("key1"), json!("100")]);
        assert_eq!(result.unwrap(), json!(true));

        // Check TTL (should be 100 after rounding up, 99 on a slow machine)
        let result = TtlCommand.execute(&mut db, &[json!("key1")]).unwrap();
        let ttl = result.as_i64().unwrap();
        assert!((99..=100).contains(&ttl));
    }

    #[test]
    fn test_expire_missing_key() {
        let mut db = Database::new();
        let result = ExpireCommand.execute(&mut db, &[json!("nope"), json!(100)]);
        assert_eq!(result.unwrap(), json!(false));
    }

    #[test]
    fn test_ttl_no_key() {
        let mut db = Database::new();
        let result = TtlCommand.execute(&mut db, &[json!("nonexistent")]);
        assert_eq!(result.unwrap(), json!(-2));
    }

    #[test]
    fn test_persist() {
        let mut db = Database::new();
        db.keyspace.set("key1", Value::string("value1"), Some(100));

        let result = PersistCommand.execute(&mut db, &[json!("key1")]);
        assert_eq!(result.unwrap(), json!(true));
        assert_eq!(TtlCommand.execute(&mut db, &[json!("key1")]).unwrap(), json!(-1));

        let result = PersistCommand.execute(&mut db, &[json!("key1")]);
        assert_eq!(result.unwrap(), json!(false));
    }
}
