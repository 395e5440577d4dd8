//! Sorted set commands (ZADD, ZRANGE, ZREVRANGE, ZREMVALUE, ZREMKEY, ZRANK, ZGETALL)
//!
//! These operate on the sorted-set namespace only.

use super::{extract_integer, extract_score, extract_string, Command};
use crate::error::EngineResult;
use crate::store::Database;
use serde_json::{json, Value as Json};

/// ZADD command - Add a (score, member) pair
///
/// Syntax: zadd key score member
///
/// Duplicate members are kept as separate entries.
pub struct ZAddCommand;

impl Command for ZAddCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let score = extract_score(args, 1)?;
        let member = extract_string(args, 2)?;
        Ok(Json::from(db.zsets.zadd(&key, score, &member)))
    }

    fn name(&self) -> &'static str {
        "zadd"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["zset"]
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
}

/// ZRANGE command - Members by ascending rank
///
/// Syntax: zrange key start end
pub struct ZRangeCommand;

impl Command for ZRangeCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let start = extract_integer(args, 1)?;
        let end = extract_integer(args, 2)?;
        Ok(Json::from(db.zsets.zrange(&key, start, end)))
    }

    fn name(&self) -> &'static str {
        "zrange"
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
}

/// ZREVRANGE command - Members by descending rank
///
/// Syntax: zrevrange key start end
pub struct ZRevRangeCommand;

impl Command for ZRevRangeCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let start = extract_integer(args, 1)?;
        let end = extract_integer(args, 2)?;
        Ok(Json::from(db.zsets.zrevrange(&key, start, end)))
    }

    fn name(&self) -> &'static str {
        "zrevrange"
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(3)
    }
}

/// ZREMVALUE command - Remove every entry of a member
///
/// Syntax: zremValue key member
pub struct ZRemValueCommand;

impl Command for ZRemValueCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let member = extract_string(args, 1)?;
        Ok(Json::from(db.zsets.zrem_value(&key, &member)))
    }

    fn name(&self) -> &'static str {
        "zremValue"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["zdelvalue"]
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

/// ZREMKEY command - Drop a whole sorted set
///
/// Syntax: zremKey key
pub struct ZRemKeyCommand;

impl Command for ZRemKeyCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        Ok(Json::from(db.zsets.zrem_key(&key)))
    }

    fn name(&self) -> &'static str {
        "zremKey"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["zdelkey"]
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// ZRANK command - Ascending rank of the first entry of a member
///
/// Syntax: zrank key member
pub struct ZRankCommand;

impl Command for ZRankCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let member = extract_string(args, 1)?;
        Ok(Json::from(db.zsets.zrank(&key, &member)))
    }

    fn name(&self) -> &'static str {
        "zrank"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

/// ZGETALL command - Every (score, member) pair, ascending
///
/// Syntax: zgetAll key
pub struct ZGetAllCommand;

impl Command for ZGetAllCommand {
    fn execute(&self, db: &mut Database, args: &[Json]) -> EngineResult<Json> {
        let key = extract_string(args, 0)?;
        let pairs: Vec<Json> = db
            .zsets
            .zgetall(&key)
            .into_iter()
            .map(|(score, member)| json!([score, member]))
            .collect();
        Ok(Json::Array(pairs))
    }

    fn name(&self) -> &'static str {
        "zgetAll"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
