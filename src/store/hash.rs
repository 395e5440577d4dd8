//! Hash operations on the primary keyspace

use super::keyspace::Keyspace;
use super::value::Value;
use crate::error::{EngineError, EngineResult};
use std::collections::HashMap;
use tracing::debug;

impl Keyspace {
    /// Live hash lookup; `Ok(None)` when the key is absent
    fn hash(&mut self, key: &str) -> EngineResult<Option<&HashMap<String, String>>> {
        match self.value(key) {
            Some(Value::Hash(hash)) => Ok(Some(hash)),
            Some(other) => Err(EngineError::wrong_type(key, "hash", other.type_name())),
            None => Ok(None),
        }
    }

    /// Set a field, creating the hash if the key is absent
    pub fn hset(&mut self, key: &str, field: &str, value: &str) -> EngineResult<()> {
        if !self.exists(key) {
            self.set(key, Value::empty_hash(), None);
        }

        let entry = self
            .entry_mut(key)
            .ok_or_else(|| EngineError::invalid("hash vanished during HSET"))?;
        let found = entry.value.type_name();
        let hash = entry
            .value
            .as_hash_mut()
            .ok_or_else(|| EngineError::wrong_type(key, "hash", found))?;

        hash.insert(field.to_string(), value.to_string());
        debug!("Set {} in hash {}", field, key);
        Ok(())
    }

    /// Get a single field
    pub fn hget(&mut self, key: &str, field: &str) -> EngineResult<Option<String>> {
        let value = self.hash(key)?.and_then(|hash| hash.get(field).cloned());
        if value.is_none() {
            debug!("Field {} not found in hash {}", field, key);
        }
        Ok(value)
    }

    /// Delete a single field. Returns whether the field existed.
    pub fn hdel(&mut self, key: &str, field: &str) -> EngineResult<bool> {
        let Some(entry) = self.entry_mut(key) else {
            return Ok(false);
        };
        let found = entry.value.type_name();
        let hash = entry
            .value
            .as_hash_mut()
            .ok_or_else(|| EngineError::wrong_type(key, "hash", found))?;

        let removed = hash.remove(field).is_some();
        if removed {
            debug!("Deleted field {} from hash {}", field, key);
        }
        Ok(removed)
    }

    /// Copy of every field/value pair
    ///
    /// The returned map is detached from the store; mutating it has no
    /// effect on later reads.
    pub fn hgetall(&mut self, key: &str) -> EngineResult<HashMap<String, String>> {
        Ok(self.hash(key)?.cloned().unwrap_or_default())
    }

    /// Remove the whole hash key. Returns whether the key existed.
    pub fn hdel_all(&mut self, key: &str) -> EngineResult<bool> {
        if self.hash(key)?.is_none() {
            debug!("Hash {} does not exist", key);
            return Ok(false);
        }
        self.delete(key);
        debug!("Deleted all fields from hash {}", key);
        Ok(true)
    }
}
