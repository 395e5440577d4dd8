//! List commands (LPUSH, RPUSH, LPOP, RPOP, LRANGE, LLEN, DELETELIST)

use super::{extract_integer, extract_string, extract_strings, Command};
use crate::error::EngineResult;
use crate::store::Database;
use serde_json::Value as Json;

/// LPUSH command - Insert values at the head of the list
///
/// Syntax: lpush key value [value ...]
///
/// The batch keeps its argument order at the head.
pub struct LPushCommand;

impl Command for LPushCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let values = extract_strings(args, 1)?;
        Ok(Json::from(db.keyspace.lpush(&key, values)?))
    }

    fn name(&self) -> &'static str {
        "lpush"
    }

    fn min_args(&self) -> usize {
        2
    }
}

/// RPUSH command - Append values at the tail of the list
///
/// Syntax: rpush key value [value ...]
pub struct RPushCommand;

impl Command for RPushCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let values = extract_strings(args, 1)?;
        Ok(Json::from(db.keyspace.rpush(&key, values)?))
    }

    fn name(&self) -> &'static str {
        "rpush"
    }

    fn min_args(&self) -> usize {
        2
    }
}

/// LPOP command - Remove and return the first element
///
/// Syntax: lpop key
pub struct LPopCommand;

impl Command for LPopCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::from(db.keyspace.lpop(&key)?))
    }

    fn name(&self) -> &'static str {
        "lpop"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// RPOP command - Remove and return the last element
///
/// Syntax: rpop key
pub struct RPopCommand;

impl Command for RPopCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::from(db.keyspace.rpop(&key)?))
    }

    fn name(&self) -> &'static str {
        "rpop"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// LRANGE command - Get a range of elements, both bounds inclusive
///
/// Syntax: lrange key start end
pub struct LRangeCommand;

impl Command for LRangeCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let start = extract_integer(args, 1)?;
        let end = extract_integer(args, 2)?;
        Ok(Json::from(db.keyspace.lrange(&key, start, end)?))
    }

    fn name(&self) -> &'static str {
        "lrange"
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
}

/// LLEN command - Get the length of a list
///
/// Syntax: llen key
pub struct LLenCommand;

impl Command for LLenCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::from(db.keyspace.llen(&key)?))
    }

    fn name(&self) -> &'static str {
        "llen"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// DELETELIST command - Remove the list key entirely
///
/// Syntax: deleteList key
pub struct DeleteListCommand;

impl Command for DeleteListCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        db.keyspace.delete_list(&key)?;
        Ok(Json::from("OK"))
    }

    fn name(&self) -> &'static str {
        "deleteList"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["delpush"]
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
    use serde_json::json;

    #[test]
    fn test_lpush_batch_order() {
        let mut db = Database::new();

        let args = [json!("l"), json!("a"), json!("b"), json!("c")];
        let result = LPushCommand.execute(&mut db, &args);
        assert_eq!(result.unwrap(), json!(3));

        let result = LPushCommand.execute(&mut db, &[json!("l"), json!("d"), json!("e")]);
        assert_eq!(result.unwrap(), json!(5));

        let result = LRangeCommand.execute(&mut db, &[json!("l"), json!(0), json!(-1)]);
        assert_eq!(result.unwrap(), json!(["d", "e", "a", "b", "c"]));
    }

    #[test]
    fn test_rpush_pop() {
        let mut db = Database::new();
        RPushCommand
            .execute(&mut db, &[json!("l"), json!("a"), json!("b"), json!("c")])
            .unwrap();

        assert_eq!(LPopCommand.execute(&mut db, &[json!("l")]).unwrap(), json!("a"));
        assert_eq!(RPopCommand.execute(&mut db, &[json!("l")]).unwrap(), json!("c"));
        assert_eq!(LLenCommand.execute(&mut db, &[json!("l")]).unwrap(), json!(1));

        RPopCommand.execute(&mut db, &[json!("l")]).unwrap();
        assert_eq!(RPopCommand.execute(&mut db, &[json!("l")]).unwrap(), Json::Null);
    }

    #[test]
    fn test_lrange_string_indices() {
        let mut db = Database::new();
        RPushCommand
            .execute(&mut db, &[json!("l"), json!("a"), json!("b"), json!("c")])
            .unwrap();

        let result = LRangeCommand.execute(&mut db, &[json!("l"), json!("1"), json!("5")]);
        assert_eq!(result.unwrap(), json!(["b", "c"]));

        let result = LRangeCommand.execute(&mut db, &[json!("l"), json!("x"), json!("5")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_list() {
        let mut db = Database::new();
        RPushCommand.execute(&mut db, &[json!("l"), json!("a")]).unwrap();

        let result = DeleteListCommand.execute(&mut db, &[json!("l")]);
        assert_eq!(result.unwrap(), json!("OK"));
        assert!(!db.keyspace.exists("l"));
    }
}
