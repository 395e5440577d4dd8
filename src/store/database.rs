//! The state guarded by the engine lock
//!
//! The primary keyspace (with its expiry deadlines) and the sorted-set
//! keyspace form one unit of consistency: they are only ever reached
//! through a single `&mut Database`.

use super::keyspace::Keyspace;
use super::zset::SortedSetStore;
use serde::Serialize;

/// Everything the engine mutates
#[derive(Debug, Default)]
pub struct Database {
    /// Strings, lists and hashes
    pub keyspace: Keyspace,

    /// Sorted sets (separate namespace)
    pub zsets: SortedSetStore,
}

impl Database {
    /// Create an empty database
    pub fn new() -> Self {
        Database {
            keyspace: Keyspace::new(),
            zsets: SortedSetStore::new(),
        }
    }

    /// Get statistics about the database
    pub fn stats(&self) -> DbStats {
        DbStats {
            keys: self.keyspace.len(),
            volatile_keys: self.keyspace.volatile_len(),
            sorted_sets: self.zsets.len(),
        }
    }
}

/// Statistics about the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbStats {
    /// Entries in the primary keyspace (including not yet swept ones)
    pub keys: usize,
    /// Entries carrying an expiry deadline
    pub volatile_keys: usize,
    /// Sorted sets
    pub sorted_sets: usize,
}
