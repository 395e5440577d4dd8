//! On-disk snapshot document
//!
//! ```json
//! {
//!   "data":        { "key": { "type": "string", "value": "v" } },
//!   "expiry":      { "key": 1700000000.5 },
//!   "sorted_sets": { "board": [[20.0, "bob"], [30.0, "carol"]] }
//! }
//! ```
//!
//! Expiry deadlines are absolute unix seconds, so a key that should have
//! died while the process was down is purged on load.

use crate::clock;
use crate::store::{Database, Entry, SortedSet, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Serializable copy of the whole database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Primary keyspace values
    #[serde(default)]
    pub data: BTreeMap<String, Value>,

    /// Absolute deadlines in unix seconds
    #[serde(default)]
    pub expiry: BTreeMap<String, f64>,

    /// Sorted sets as ascending (score, member) pairs
    #[serde(default)]
    pub sorted_sets: BTreeMap<String, Vec<(f64, String)>>,
}

impl Snapshot {
    /// Copy the live state of the database
    ///
    /// Entries whose deadline has already passed are left out.
    pub fn capture(db: &Database) -> Self {
        let now = clock::now_ms();
        let mut snapshot = Snapshot::default();

        for (key, entry) in db.keyspace.iter() {
            if entry.is_expired_at(now) {
                continue;
            }
            snapshot.data.insert(key.clone(), entry.value.clone());
            if let Some(deadline) = entry.expire_at {
                snapshot.expiry.insert(key.clone(), clock::ms_to_secs(deadline));
            }
        }

        for (key, set) in db.zsets.iter() {
            snapshot.sorted_sets.insert(key.clone(), set.pairs());
        }

        snapshot
    }

    /// Rebuild a database from this snapshot
    ///
    /// Deadlines naming a key absent from `data` are dropped, and keys
    /// already past their deadline are purged before returning.
    pub fn restore(self) -> Database {
        let Snapshot {
            data,
            mut expiry,
            sorted_sets,
        } = self;
        let mut db = Database::new();

        for (key, value) in data {
            let deadline = expiry.remove(&key).map(clock::secs_to_ms);
            db.keyspace.insert_entry(key, Entry::with_deadline(value, deadline));
        }

        if !expiry.is_empty() {
            warn!(
                "Dropped {} expiry entries without a matching key",
                expiry.len()
            );
        }

        for (key, pairs) in sorted_sets {
            db.zsets.insert(key, SortedSet::from_pairs(pairs));
        }

        let purged = db.keyspace.purge_expired();
        if purged > 0 {
            debug!("Purged {} keys that expired while offline", purged);
        }

        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_skips_expired_entries() {
        let mut db = Database::new();
        db.keyspace.set("live", Value::string("v"), Some(100));
        db.keyspace.set("dead", Value::string("v"), None);
        db.keyspace.set_deadline("dead", Some(clock::now_ms() - 1));
        db.zsets.zadd("z", 2.0, "b");
        db.zsets.zadd("z", 1.0, "a");

        let snapshot = Snapshot::capture(&db);
        assert_eq!(snapshot.data.len(), 1);
        assert!(snapshot.expiry.contains_key("live"));
        assert!(!snapshot.expiry.contains_key("dead"));
        assert_eq!(
            snapshot.sorted_sets["z"],
            vec![(1.0, "a".to_string()), (2.0, "b".to_string())]
        );
    }

    #[test]
    fn test_restore_drops_dangling_and_past_deadlines() {
        let now_secs = clock::ms_to_secs(clock::now_ms());
        let mut snapshot = Snapshot::default();
        snapshot.data.insert("keep".into(), Value::string("1"));
        snapshot.data.insert("old".into(), Value::string("2"));
        snapshot.expiry.insert("keep".into(), now_secs + 100.0);
        snapshot.expiry.insert("old".into(), now_secs - 10.0);
        snapshot.expiry.insert("ghost".into(), now_secs + 100.0);

        let mut db = snapshot.restore();
        assert_eq!(db.keyspace.len(), 1);
        assert!(db.keyspace.exists("keep"));
        assert!(db.keyspace.ttl("keep") > 0);
        assert!(!db.keyspace.exists("ghost"));
    }

    #[test]
    fn test_document_layout() {
        let mut db = Database::new();
        db.keyspace.rpush("l", vec!["a".into()]).unwrap();
        db.zsets.zadd("z", 5.0, "m");

        let json = serde_json::to_value(Snapshot::capture(&db)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "data": { "l": { "type": "list", "value": ["a"] } },
                "expiry": {},
                "sorted_sets": { "z": [[5.0, "m"]] }
            })
        );
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert!(snapshot.expiry.is_empty());
        assert!(snapshot.sorted_sets.is_empty());
    }
}
