//! String commands (SET, GET, APPEND)

use super::{extract_string, extract_ttl, Command};
use crate::error::EngineResult;
use crate::store::{Database, Value};
use serde_json::Value as Json;

/// SET command - Set a key to a string value
///
/// Syntax: set key value [ttlSeconds]
///
/// Without a TTL any previous expiry is cancelled.
pub struct SetCommand;

impl Command for SetCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let value = extract_string(args, 1)?;
        let ttl = extract_ttl(args, 2)?;

        db.keyspace.set(key, Value::String(value), ttl);
        Ok(Json::from("OK"))
    }

    fn name(&self) -> &'static str {
        "set"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
}

/// GET command - Get the value of a key
///
/// Syntax: get key
pub struct GetCommand;

impl Command for GetCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::from(db.keyspace.get(&key)?))
    }

    fn name(&self) -> &'static str {
        "get"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// APPEND command - Append text to a string value
///
/// Syntax: append key text
///
/// Returns the new length, or null when the key does not exist.
pub struct AppendCommand;

impl Command for AppendCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let text = extract_string(args, 1)?;
        Ok(Json::from(db.keyspace.append(&key, &text)?))
    }

    fn name(&self) -> &'static str {
        "append"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use serde_json::json;

    #[test]
    fn test_set_get() {
        let mut db = Database::new();

        let result = SetCommand.execute(&mut db, &[json!("mykey"), json!("myvalue")]);
        assert_eq!(result.unwrap(), json!("OK"));

        let result = GetCommand.execute(&mut db, &[json!("mykey")]);
        assert_eq!(result.unwrap(), json!("myvalue"));
    }

    #[test]
    fn test_get_nonexistent() {
        let mut db = Database::new();
        let result = GetCommand.execute(&mut db, &[json!("nonexistent")]);
        assert_eq!(result.unwrap(), Json::Null);
    }

    #[test]
    fn test_set_with_ttl() {
        let mut db = Database::new();
        SetCommand
            .execute(&mut db, &[json!("k"), json!("v"), json!(100)])
            .unwrap();
        let ttl = db.keyspace.ttl("k");
        assert!(ttl > 0 && ttl <= 100);

        SetCommand
            .execute(&mut db, &[json!("k"), json!("v"), json!(null)])
            .unwrap();
        assert_eq!(db.keyspace.ttl("k"), -1);
    }

    #[test]
    fn test_append() {
        let mut db = Database::new();
        let result = AppendCommand.execute(&mut db, &[json!("k"), json!("x")]);
        assert_eq!(result.unwrap(), Json::Null);

        SetCommand.execute(&mut db, &[json!("k"), json!("ab")]).unwrap();
        let result = AppendCommand.execute(&mut db, &[json!("k"), json!("cd")]);
        assert_eq!(result.unwrap(), json!(4));

        db.keyspace.set("l", Value::empty_list(), None);
        let result = AppendCommand.execute(&mut db, &[json!("l"), json!("x")]);
        assert!(matches!(result, Err(EngineError::WrongType { .. })));
    }
}
