//! Primary keyspace: strings, generic key operations and expiry
//!
//! Every accessor performs lazy expiry first, so a caller never observes
//! a key whose deadline has passed, whether or not the sweeper has run.
//! List and hash operations live in `list.rs` and `hash.rs`.

use super::entry::Entry;
use super::value::Value;
use crate::clock;
use crate::error::{EngineError, EngineResult};
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use tracing::debug;

/// Type alias for our hash map with SipHasher
type KeyMap = HashMap<String, Entry, BuildHasherDefault<SipHasher13>>;

/// The primary keyspace
#[derive(Debug, Default)]
pub struct Keyspace {
    entries: KeyMap,
}

impl Keyspace {
    /// Create an empty keyspace
    pub fn new() -> Self {
        Keyspace {
            entries: HashMap::with_capacity_and_hasher(
                1024,
                BuildHasherDefault::<SipHasher13>::default(),
            ),
        }
    }

    /// Remove the key if its deadline has passed. Returns true if removed.
    fn purge_if_expired(&mut self, key: &str) -> bool {
        let now = clock::now_ms();
        let expired = self
            .entries
            .get(key)
            .map(|entry| entry.is_expired_at(now))
            .unwrap_or(false);

        if expired {
            self.entries.remove(key);
            debug!("Key expired on access: {}", key);
        }
        expired
    }

    /// Live entry lookup (lazy expiry applied)
    pub(crate) fn entry(&mut self, key: &str) -> Option<&Entry> {
        self.purge_if_expired(key);
        self.entries.get(key)
    }

    /// Live mutable entry lookup (lazy expiry applied)
    pub(crate) fn entry_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.purge_if_expired(key);
        self.entries.get_mut(key)
    }

    /// Live value lookup
    pub fn value(&mut self, key: &str) -> Option<&Value> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Set a key, replacing any previous value of any type
    ///
    /// Without a TTL the key becomes permanent, cancelling any earlier
    /// expiry.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl_seconds: Option<i64>) {
        let key = key.into();
        let expire_at = ttl_seconds.map(clock::deadline_after);
        match ttl_seconds {
            Some(ttl) => debug!("Set key {} with {} seconds TTL", key, ttl),
            None => debug!("Set key {} without TTL", key),
        }
        self.entries.insert(key, Entry::with_deadline(value, expire_at));
    }

    /// Get a string value. Absent and expired keys yield `None`.
    pub fn get(&mut self, key: &str) -> EngineResult<Option<String>> {
        match self.value(key) {
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(EngineError::wrong_type(key, "string", other.type_name())),
            None => {
                debug!("Key not found: {}", key);
                Ok(None)
            }
        }
    }

    /// Delete a key, returning its previous value
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        if self.purge_if_expired(key) {
            return None;
        }
        let removed = self.entries.remove(key).map(|entry| entry.value);
        if removed.is_some() {
            debug!("Deleted key: {}", key);
        }
        removed
    }

    /// Check if a key exists (and is not expired)
    pub fn exists(&mut self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    /// Append text to a string value, returning the new length in characters
    ///
    /// An absent key is left absent and yields `None`.
    pub fn append(&mut self, key: &str, text: &str) -> EngineResult<Option<usize>> {
        let Some(entry) = self.entry_mut(key) else {
            debug!("Key {} does not exist, nothing to append to", key);
            return Ok(None);
        };

        let found = entry.value.type_name();
        let s = entry
            .value
            .as_string_mut()
            .ok_or_else(|| EngineError::wrong_type(key, "string", found))?;
        s.push_str(text);
        debug!("Appended to key: {}", key);
        Ok(Some(s.chars().count()))
    }

    /// All live keys. Expired entries are skipped but left for the sweeper.
    pub fn keys(&self) -> Vec<String> {
        let now = clock::now_ms();
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Remove all keys and their expiry entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Set expiration on a key. Returns false if the key does not exist.
    pub fn expire(&mut self, key: &str, seconds: i64) -> bool {
        match self.entry_mut(key) {
            Some(entry) => {
                entry.expire_at = Some(clock::deadline_after(seconds));
                debug!("Set TTL for key {}: {} seconds", key, seconds);
                true
            }
            None => {
                debug!("Key {} not found for expire", key);
                false
            }
        }
    }

    /// Remove the expiration of a key
    ///
    /// Returns false if the key is absent or already permanent.
    pub fn persist(&mut self, key: &str) -> bool {
        match self.entry_mut(key) {
            Some(entry) => entry.expire_at.take().is_some(),
            None => false,
        }
    }

    /// Get TTL for a key in seconds
    ///
    /// Returns:
    /// - n > 0: remaining TTL in seconds (rounded up)
    /// - -1: key exists but has no expiration
    /// - -2: key does not exist or has just expired
    pub fn ttl(&mut self, key: &str) -> i64 {
        let now = clock::now_ms();
        let ttl = match self.entries.get(key) {
            Some(entry) => entry.ttl_seconds_at(now),
            None => return -2,
        };

        if ttl == -2 {
            self.entries.remove(key);
            debug!("Key {} expired during TTL check", key);
        }
        ttl
    }

    /// Remove every key whose deadline has passed
    ///
    /// Returns the number of keys removed
    pub fn purge_expired(&mut self) -> usize {
        let now = clock::now_ms();
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                debug!("Key expired and removed: {}", key);
            }
            !expired
        });
        before - self.entries.len()
    }

    /// Insert a fully-formed entry (used when restoring a snapshot)
    pub(crate) fn insert_entry(&mut self, key: String, entry: Entry) {
        self.entries.insert(key, entry);
    }

    /// Iterate over all stored entries, expired or not
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    /// Number of stored entries (including not yet swept expired ones)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the keyspace is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys carrying an expiry deadline
    pub fn volatile_len(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.expire_at.is_some())
            .count()
    }

    /// Force a deadline on a key, bypassing the TTL arithmetic
    #[cfg(test)]
    pub(crate) fn set_deadline(&mut self, key: &str, expire_at: Option<u64>) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.expire_at = expire_at;
        }
    }
}
