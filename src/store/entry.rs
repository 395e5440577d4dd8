//! Entry structure for the primary keyspace
//!
//! The expiry deadline lives next to the value it guards, so removing a
//! value always removes its expiry entry with it.

use super::value::Value;
use crate::clock;

/// Represents a single entry in the keyspace
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// The value
    pub value: Value,

    /// Optional absolute expiration time (unix milliseconds)
    pub expire_at: Option<u64>,
}

impl Entry {
    /// Create a new entry without expiration
    pub fn new(value: Value) -> Self {
        Entry {
            value,
            expire_at: None,
        }
    }

    /// Create a new entry with an absolute deadline
    pub fn with_deadline(value: Value, expire_at: Option<u64>) -> Self {
        Entry { value, expire_at }
    }

    /// Check if the entry has expired at the given instant
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        matches!(self.expire_at, Some(deadline) if deadline <= now_ms)
    }

    /// Check if the entry has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(clock::now_ms())
    }

    /// Remaining TTL in whole seconds, rounded up
    ///
    /// - `-1`: no expiration
    /// - `-2`: expired
    pub fn ttl_seconds_at(&self, now_ms: u64) -> i64 {
        match self.expire_at {
            Some(deadline) if deadline > now_ms => ((deadline - now_ms + 999) / 1000) as i64,
            Some(_) => -2,
            None => -1,
        }
    }
}
