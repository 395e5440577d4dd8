//! Sorted-set keyspace
//!
//! Each sorted set is a `Vec<(OrderedFloat<f64>, String)>` kept sorted by
//! `(score, member)`. Members are not unique: the same member may appear
//! several times with different (or equal) scores. Insertion uses a binary
//! search for the slot, so lookups stay O(log n) and only the shift is
//! linear.
//!
//! This namespace is disjoint from the primary keyspace; a name can hold a
//! primary value and a sorted set at the same time.

use super::resolve_range;
use ordered_float::OrderedFloat;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use tracing::debug;

type SetMap = HashMap<String, SortedSet, BuildHasherDefault<SipHasher13>>;

/// A score-ordered sequence of members
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedSet {
    entries: Vec<(OrderedFloat<f64>, String)>,
}

impl SortedSet {
    /// Build from arbitrary pairs, sorting them
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, String)>) -> Self {
        let mut entries: Vec<_> = pairs
            .into_iter()
            .map(|(score, member)| (OrderedFloat(score), member))
            .collect();
        entries.sort();
        SortedSet { entries }
    }

    /// Insert a pair after any equal pairs already present
    pub fn add(&mut self, score: f64, member: String) {
        let score = OrderedFloat(score);
        let idx = self
            .entries
            .partition_point(|(s, m)| (*s, m.as_str()) <= (score, member.as_str()));
        self.entries.insert(idx, (score, member));
    }

    /// Members between ranks `start` and `end` (inclusive), ascending
    pub fn range(&self, start: i64, end: i64) -> Vec<String> {
        match resolve_range(self.entries.len(), start, end) {
            Some((from, to)) => self.entries[from..=to]
                .iter()
                .map(|(_, member)| member.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Members between ranks `start` and `end` (inclusive) of the
    /// descending order
    pub fn rev_range(&self, start: i64, end: i64) -> Vec<String> {
        match resolve_range(self.entries.len(), start, end) {
            Some((from, to)) => self
                .entries
                .iter()
                .rev()
                .skip(from)
                .take(to - from + 1)
                .map(|(_, member)| member.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Remove every entry with the given member. Returns how many went.
    pub fn remove_member(&mut self, member: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, m)| m != member);
        before - self.entries.len()
    }

    /// Rank of the first entry with the given member, ascending
    pub fn rank(&self, member: &str) -> Option<usize> {
        self.entries.iter().position(|(_, m)| m == member)
    }

    /// Copy of every (score, member) pair, ascending
    pub fn pairs(&self) -> Vec<(f64, String)> {
        self.entries
            .iter()
            .map(|(score, member)| (score.into_inner(), member.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// All sorted sets, keyed by name
#[derive(Debug, Default)]
pub struct SortedSetStore {
    sets: SetMap,
}

impl SortedSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a (score, member) pair, creating the set if needed. Always 1.
    pub fn zadd(&mut self, key: &str, score: f64, member: &str) -> i64 {
        self.sets
            .entry(key.to_string())
            .or_default()
            .add(score, member.to_string());
        debug!("Added value {} with score {} to ZSET {}", member, score, key);
        1
    }

    pub fn zrange(&self, key: &str, start: i64, end: i64) -> Vec<String> {
        match self.sets.get(key) {
            Some(set) => set.range(start, end),
            None => {
                debug!("ZSET {} does not exist", key);
                Vec::new()
            }
        }
    }

    pub fn zrevrange(&self, key: &str, start: i64, end: i64) -> Vec<String> {
        match self.sets.get(key) {
            Some(set) => set.rev_range(start, end),
            None => {
                debug!("ZSET {} does not exist", key);
                Vec::new()
            }
        }
    }

    /// Remove every entry for `member`
    ///
    /// Returns 1 when the set exists (even with no match), 0 otherwise.
    pub fn zrem_value(&mut self, key: &str, member: &str) -> i64 {
        match self.sets.get_mut(key) {
            Some(set) => {
                let removed = set.remove_member(member);
                debug!("Removed {} entries of {} from ZSET {}", removed, member, key);
                1
            }
            None => 0,
        }
    }

    /// Drop the whole sorted set. 1 if it existed, 0 otherwise.
    pub fn zrem_key(&mut self, key: &str) -> i64 {
        match self.sets.remove(key) {
            Some(_) => {
                debug!("Deleted entire ZSET {}", key);
                1
            }
            None => 0,
        }
    }

    pub fn zrank(&self, key: &str, member: &str) -> Option<usize> {
        self.sets.get(key).and_then(|set| set.rank(member))
    }

    pub fn zgetall(&self, key: &str) -> Vec<(f64, String)> {
        self.sets.get(key).map(SortedSet::pairs).unwrap_or_default()
    }

    pub(crate) fn insert(&mut self, key: String, set: SortedSet) {
        self.sets.insert(key, set);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &SortedSet)> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
