//! In-memory storage module
//!
//! Provides the core data structures: the primary keyspace (strings,
//! lists, hashes, expiry) and the sorted-set keyspace. This module knows
//! nothing about commands, snapshots or the transport.

mod database;
mod entry;
mod hash;
mod keyspace;
mod list;
mod value;
mod zset;

pub use database::{Database, DbStats};
pub use entry::Entry;
pub use keyspace::Keyspace;
pub use value::Value;
pub use zset::{SortedSet, SortedSetStore};

/// Resolve inclusive `start..=end` indices against a sequence length
///
/// Negative indices count from the end (`-1` is the last element).
/// Out-of-range bounds clamp; an empty selection yields `None`.
pub(crate) fn resolve_range(len: usize, start: i64, end: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let end = if end < 0 { len + end } else { end.min(len - 1) };

    if start > end || start >= len {
        return None;
    }
    Some((start as usize, end as usize))
}
