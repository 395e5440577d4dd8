//! The engine: one guarded database, the command registry and snapshots
//!
//! Every operation goes through [`Engine::execute`], which resolves the
//! command, checks its arity and runs it with the database guard held.
//! There is exactly one guard over the primary keyspace, its expiry
//! deadlines and the sorted sets.

mod runtime;

pub use runtime::EngineRuntime;

use crate::commands::CommandRegistry;
use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::snapshot::{Snapshot, SnapshotManager};
use crate::store::{Database, DbStats};
use parking_lot::Mutex;
use serde_json::Value as Json;
use tracing::{debug, error, info, warn};

/// Shared key-value engine
pub struct Engine {
    db: Mutex<Database>,
    registry: CommandRegistry,
    snapshots: SnapshotManager,
}

impl Engine {
    /// Create an engine with empty state
    pub fn new(snapshots: SnapshotManager) -> Self {
        Self::with_database(Database::new(), snapshots)
    }

    /// Create an engine around existing state
    pub fn with_database(db: Database, snapshots: SnapshotManager) -> Self {
        Engine {
            db: Mutex::new(db),
            registry: CommandRegistry::new(),
            snapshots,
        }
    }

    /// Create an engine from configuration, loading the snapshot file
    ///
    /// A missing file starts empty. An unreadable or malformed file is
    /// logged and the engine starts empty as well.
    pub fn open(config: &Config) -> Self {
        let snapshots = SnapshotManager::new(&config.snapshot_path, config.snapshot_interval());

        let db = match snapshots.load() {
            Ok(Some(snapshot)) => {
                let db = snapshot.restore();
                info!(
                    "Loaded snapshot from {} ({} keys, {} sorted sets)",
                    snapshots.path().display(),
                    db.keyspace.len(),
                    db.zsets.len()
                );
                db
            }
            Ok(None) => {
                info!(
                    "No snapshot at {}, starting empty",
                    snapshots.path().display()
                );
                Database::new()
            }
            Err(e) => {
                error!("Failed to load snapshot, starting empty: {:#}", e);
                Database::new()
            }
        };

        Self::with_database(db, snapshots)
    }

    /// Execute an operation by name (case-insensitive)
    pub fn execute(&self, name: &str, args: &[Json]) -> EngineResult<Json> {
        let cmd = match self.registry.get(name) {
            Some(c) => c,
            None => {
                warn!("Unsupported operation: '{}'", name);
                return Err(EngineError::UnsupportedOperation(name.to_string()));
            }
        };

        let too_few = args.len() < cmd.min_args();
        let too_many = cmd.max_args().is_some_and(|max| args.len() > max);
        if too_few || too_many {
            return Err(EngineError::WrongArity(cmd.name().to_string()));
        }

        debug!("Executing {} with {} args", cmd.name(), args.len());
        let result = {
            let mut db = self.db.lock();
            cmd.execute(&mut db, args)?
        };

        if cmd.forces_snapshot() {
            if let Err(e) = self.save_snapshot() {
                error!("Snapshot after {} failed: {:#}", cmd.name(), e);
            }
        }

        Ok(result)
    }

    /// Write a snapshot now
    ///
    /// The state is copied under the guard; the file is written after the
    /// guard is released.
    pub fn save_snapshot(&self) -> anyhow::Result<()> {
        self.snapshots
            .save_with(|| Snapshot::capture(&self.db.lock()))
    }

    /// Remove every expired key. Returns how many went.
    pub fn purge_expired(&self) -> usize {
        self.db.lock().keyspace.purge_expired()
    }

    pub fn stats(&self) -> DbStats {
        self.db.lock().stats()
    }

    pub fn snapshots(&self) -> &SnapshotManager {
        &self.snapshots
    }

    /// Run a closure against the locked database
    pub fn with_db<R>(&self, f: impl FnOnce(&mut Database) -> R) -> R {
        f(&mut self.db.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use tempfile::tempdir;

    fn engine_in(dir: &std::path::Path) -> Engine {
        Engine::new(SnapshotManager::new(
            dir.join("snap.json"),
            Duration::from_secs(30),
        ))
    }

    #[test]
    fn test_execute_round_trip() {
        let dir = tempdir().unwrap();
        let engine = engine_in(dir.path());

        assert_eq!(engine.execute("SET", &[json!("k"), json!("v")]).unwrap(), json!("OK"));
        assert_eq!(engine.execute("get", &[json!("k")]).unwrap(), json!("v"));
        assert_eq!(engine.execute("Delete", &[json!("k")]).unwrap(), json!("v"));
        assert_eq!(engine.execute("get", &[json!("k")]).unwrap(), Json::Null);
    }

    #[test]
    fn test_unsupported_operation() {
        let dir = tempdir().unwrap();
        let engine = engine_in(dir.path());

        let err = engine.execute("incr", &[json!("k")]).unwrap_err();
        assert_eq!(err, EngineError::UnsupportedOperation("incr".into()));
    }

    #[test]
    fn test_arity_is_checked() {
        let dir = tempdir().unwrap();
        let engine = engine_in(dir.path());

        let err = engine.execute("get", &[]).unwrap_err();
        assert_eq!(err.kind(), "wrong_arity");
        let err = engine
            .execute("set", &[json!("k"), json!("v"), json!(1), json!(2)])
            .unwrap_err();
        assert_eq!(err.kind(), "wrong_arity");
        let err = engine.execute("lpush", &[json!("l")]).unwrap_err();
        assert_eq!(err.kind(), "wrong_arity");
    }

    #[test]
    fn test_flushall_forces_snapshot() {
        let dir = tempdir().unwrap();
        let engine = engine_in(dir.path());
        engine.execute("set", &[json!("k"), json!("v")]).unwrap();
        engine.execute("zadd", &[json!("z"), json!(1), json!("m")]).unwrap();

        assert!(!engine.snapshots().path().exists());
        engine.execute("flushAll", &[]).unwrap();

        let saved = engine.snapshots().load().unwrap().unwrap();
        assert!(saved.data.is_empty());
        assert_eq!(saved.sorted_sets.len(), 1);
    }

    #[test]
    fn test_open_with_corrupt_snapshot_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snap.json");
        std::fs::write(&path, "garbage").unwrap();

        let config = Config {
            snapshot_path: path,
            ..Config::default()
        };
        let engine = Engine::open(&config);
        assert_eq!(engine.stats().keys, 0);
    }

    #[test]
    fn test_purge_and_stats() {
        let dir = tempdir().unwrap();
        let engine = engine_in(dir.path());
        engine.execute("set", &[json!("a"), json!("1"), json!(100)]).unwrap();
        engine.execute("set", &[json!("b"), json!("2")]).unwrap();
        engine.execute("expire", &[json!("b"), json!(0)]).unwrap();

        assert_eq!(engine.purge_expired(), 1);
        let stats = engine.stats();
        assert_eq!(stats.keys, 1);
        assert_eq!(stats.volatile_keys, 1);
    }
}
