//! List operations on the primary keyspace
//!
//! Any list operation against an absent key creates an empty list first;
//! against a key holding another type it fails without touching the value.

use super::keyspace::Keyspace;
use super::resolve_range;
use super::value::Value;
use crate::error::{EngineError, EngineResult};
use std::collections::VecDeque;
use tracing::debug;

impl Keyspace {
    /// Get or create the list stored at `key`
    fn list_mut(&mut self, key: &str) -> EngineResult<&mut VecDeque<String>> {
        if !self.exists(key) {
            self.set(key, Value::empty_list(), None);
        }

        let entry = self
            .entry_mut(key)
            .ok_or_else(|| EngineError::invalid("list vanished during access"))?;
        let found = entry.value.type_name();
        entry
            .value
            .as_list_mut()
            .ok_or_else(|| EngineError::wrong_type(key, "list", found))
    }

    /// Insert values at the head; the batch keeps its argument order
    ///
    /// `lpush(l, [a, b, c])` then `lpush(l, [d, e])` yields `[d, e, a, b, c]`.
    pub fn lpush(&mut self, key: &str, values: Vec<String>) -> EngineResult<usize> {
        let list = self.list_mut(key)?;
        for value in values.into_iter().rev() {
            list.push_front(value);
        }
        debug!("LPUSH {} -> len {}", key, list.len());
        Ok(list.len())
    }

    /// Append values at the tail in argument order
    pub fn rpush(&mut self, key: &str, values: Vec<String>) -> EngineResult<usize> {
        let list = self.list_mut(key)?;
        list.extend(values);
        debug!("RPUSH {} -> len {}", key, list.len());
        Ok(list.len())
    }

    /// Pop from the head
    pub fn lpop(&mut self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.list_mut(key)?.pop_front())
    }

    /// Pop from the tail
    pub fn rpop(&mut self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.list_mut(key)?.pop_back())
    }

    /// Copy of the elements between `start` and `end`, both inclusive
    ///
    /// Negative indices count from the tail; out-of-range bounds clamp.
    pub fn lrange(&mut self, key: &str, start: i64, end: i64) -> EngineResult<Vec<String>> {
        let list = self.list_mut(key)?;
        Ok(match resolve_range(list.len(), start, end) {
            Some((from, to)) => list.range(from..=to).cloned().collect(),
            None => Vec::new(),
        })
    }

    /// Length of the list
    pub fn llen(&mut self, key: &str) -> EngineResult<usize> {
        Ok(self.list_mut(key)?.len())
    }

    /// Remove the list key entirely
    pub fn delete_list(&mut self, key: &str) -> EngineResult<()> {
        if let Some(value) = self.value(key) {
            if value.as_list().is_none() {
                return Err(EngineError::wrong_type(key, "list", value.type_name()));
            }
        }
        self.delete(key);
        Ok(())
    }
}
