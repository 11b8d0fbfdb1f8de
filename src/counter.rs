//! Insertion-ordered occurrence multiset
//!
//! Keys keep the position of their first insertion, so ranking by count
//! can break ties deterministically without depending on hash order.

use fnv::FnvHashMap;
use std::hash::Hash;

/// Multiset of keys with occurrence counts, iterated in first-insertion order
#[derive(Debug, Clone)]
pub struct Counter<K> {
    /// Map from key to its slot in `entries`
    slots: FnvHashMap<K, usize>,
    /// (key, count) pairs in first-insertion order
    entries: Vec<(K, u64)>,
    total: u64,
}

impl<K> Default for Counter<K> {
    fn default() -> Self {
        Self {
            slots: FnvHashMap::default(),
            entries: Vec::new(),
            total: 0,
        }
    }
}

impl<K: Clone + Eq + Hash> Counter<K> {
    /// Create an empty counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `by` occurrences of `key`, returning its new count
    pub fn increment(&mut self, key: K, by: u64) -> u64 {
        self.total += by;
        match self.slots.get(&key) {
            Some(&slot) => {
                self.entries[slot].1 += by;
                self.entries[slot].1
            }
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, by));
                by
            }
        }
    }

    /// Occurrence count of `key` (0 if never inserted)
    pub fn get(&self, key: &K) -> u64 {
        self.slots
            .get(key)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate (key, count) pairs in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(key, count)| (key, *count))
    }

    /// Top `n` keys (all if `None`) by descending count
    ///
    /// Ties keep first-insertion order (the sort is stable).
    pub fn most_common(&self, n: Option<usize>) -> Vec<(K, u64)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = n {
            ranked.truncate(n);
        }
        ranked
    }
}
