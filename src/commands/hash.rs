//! Hash commands (HSET, HGET, HDEL, HGETALL, HDELALL)

use super::{extract_string, Command};
use crate::error::EngineResult;
use crate::store::Database;
use serde_json::{Map, Value as Json};

/// HSET command - Set a field in the hash stored at key
///
/// Syntax: hset key field value
pub struct HSetCommand;

impl Command for HSetCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let field = extract_string(args, 1)?;
        let value = extract_string(args, 2)?;

        db.keyspace.hset(&key, &field, &value)?;
        Ok(Json::from("OK"))
    }

    fn name(&self) -> &'static str {
        "hset"
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
}

/// HGET command - Get the value of a hash field
///
/// Syntax: hget key field
pub struct HGetCommand;

impl Command for HGetCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let field = extract_string(args, 1)?;
        Ok(Json::from(db.keyspace.hget(&key, &field)?))
    }

    fn name(&self) -> &'static str {
        "hget"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

/// HDEL command - Delete a hash field
///
/// Syntax: hdel key field
pub struct HDelCommand;

impl Command for HDelCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let field = extract_string(args, 1)?;
        Ok(Json::Bool(db.keyspace.hdel(&key, &field)?))
    }

    fn name(&self) -> &'static str {
        "hdel"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

/// HGETALL command - Get all fields and values in a hash
///
/// Syntax: hgetall key
///
/// Returns an object; an absent key yields `{}`.
pub struct HGetAllCommand;

impl Command for HGetAllCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let object: Map<String, Json> = db
            .keyspace
            .hgetall(&key)?
            .into_iter()
            .map(|(field, value)| (field, Json::String(value)))
            .collect();
        Ok(Json::Object(object))
    }

    fn name(&self) -> &'static str {
        "hgetall"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// HDELALL command - Delete the whole hash
///
/// Syntax: hdelAll key
pub struct HDelAllCommand;

impl Command for HDelAllCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::Bool(db.keyspace.hdel_all(&key)?))
    }

    fn name(&self) -> &'static str {
        "hdelAll"
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
    use crate::error::EngineError;
    use crate::store::Value;
    use serde_json::json;

    #[test]
    fn test_hset_hget() {
        let mut db = Database::new();

        let args = [json!("myhash"), json!("field1"), json!("value1")];
        let result = HSetCommand.execute(&mut db, &args);
        assert_eq!(result.unwrap(), json!("OK"));

        let result = HGetCommand.execute(&mut db, &[json!("myhash"), json!("field1")]);
        assert_eq!(result.unwrap(), json!("value1"));

        let result = HGetCommand.execute(&mut db, &[json!("myhash"), json!("nope")]);
        assert_eq!(result.unwrap(), Json::Null);
    }

    #[test]
    fn test_hgetall_and_hdel() {
        let mut db = Database::new();
        HSetCommand.execute(&mut db, &[json!("h"), json!("a"), json!(1)]).unwrap();
        HSetCommand.execute(&mut db, &[json!("h"), json!("b"), json!("2")]).unwrap();

        let result = HGetAllCommand.execute(&mut db, &[json!("h")]);
        assert_eq!(result.unwrap(), json!({"a": "1", "b": "2"}));

        assert_eq!(HDelCommand.execute(&mut db, &[json!("h"), json!("a")]).unwrap(), json!(true));
        assert_eq!(HDelCommand.execute(&mut db, &[json!("h"), json!("a")]).unwrap(), json!(false));

        let result = HGetAllCommand.execute(&mut db, &[json!("missing")]);
        assert_eq!(result.unwrap(), json!({}));
    }

    #[test]
    fn test_hdel_all() {
        let mut db = Database::new();
        HSetCommand.execute(&mut db, &[json!("h"), json!("a"), json!("1")]).unwrap();

        assert_eq!(HDelAllCommand.execute(&mut db, &[json!("h")]).unwrap(), json!(true));
        assert_eq!(HDelAllCommand.execute(&mut db, &[json!("h")]).unwrap(), json!(false));
    }

    #[test]
    fn test_hash_on_string_key() {
        let mut db = Database::new();
        db.keyspace.set("s", Value::string("v"), None);

        let result = HSetCommand.execute(&mut db, &[json!("s"), json!("f"), json!("v")]);
        assert!(matches!(result, Err(EngineError::WrongType { .. })));
    }
}
