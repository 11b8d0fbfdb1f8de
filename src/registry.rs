//! Bijective id registry with occurrence counting
//!
//! Values get dense ids in first-occurrence order. The registry owns both
//! directions of the mapping plus one occurrence count per id; callers
//! only ever hold ids.

use crate::error::{CombiError, Result};
use fnv::FnvHashMap;
use std::hash::Hash;

/// Dense id assigned to a registered value
pub type Id = usize;

/// Generic value registry: value <-> id bijection plus occurrence counts
#[derive(Debug, Clone)]
pub struct Registry<T> {
    forward: FnvHashMap<T, Id>,
    backward: Vec<T>,
    /// Occurrence count per id
    counts: Vec<u64>,
    total: u64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            forward: FnvHashMap::default(),
            backward: Vec::new(),
            counts: Vec::new(),
            total: 0,
        }
    }
}

impl<T: Clone + Eq + Hash> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one occurrence of `value`, returning its (new or existing) id
    pub fn add(&mut self, value: T) -> Id {
        let id = match self.forward.get(&value) {
            Some(&id) => id,
            None => {
                let id = self.backward.len();
                self.forward.insert(value.clone(), id);
                self.backward.push(value);
                self.counts.push(0);
                id
            }
        };
        self.counts[id] += 1;
        self.total += 1;
        id
    }

    /// Number of distinct registered values
    pub fn count(&self) -> usize {
        self.backward.len()
    }

    /// Number of `add` calls ever made
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Id of an already registered value
    pub fn value_to_index(&self, value: &T) -> Option<Id> {
        self.forward.get(value).copied()
    }

    /// Reverse lookup of a registered id
    pub fn index_to_value(&self, id: Id) -> Result<&T> {
        self.backward.get(id).ok_or(CombiError::UnknownId(id))
    }

    /// Occurrence count of the value registered under `id`
    pub fn get_count_for_index(&self, id: Id) -> Result<u64> {
        self.counts.get(id).copied().ok_or(CombiError::UnknownId(id))
    }

    /// Top `n` values (all if `None`) by descending count, ties in id order
    pub fn most_common(&self, n: Option<usize>) -> Vec<(T, u64)> {
        let mut ranked: Vec<(T, u64)> = self
            .entries()
            .map(|(_, value, count)| (value.clone(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(n) = n {
            ranked.truncate(n);
        }
        ranked
    }

    /// Iterate (id, value, count) in id order
    pub fn entries(&self) -> impl Iterator<Item = (Id, &T, u64)> {
        self.backward
            .iter()
            .zip(&self.counts)
            .enumerate()
            .map(|(id, (value, &count))| (id, value, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_assigns_sequential_ids() {
        let mut registry = Registry::new();
        assert_eq!(registry.add("x".to_string()), 0);
        assert_eq!(registry.add("y".to_string()), 1);
        assert_eq!(registry.add("x".to_string()), 0);
        assert_eq!(registry.add("z".to_string()), 2);
    }

    #[test]
    fn test_registry_count_and_total() {
        let mut registry = Registry::new();
        for value in ["a", "b", "a", "a", "c"] {
            registry.add(value);
        }
        assert_eq!(registry.count(), 3);
        assert_eq!(registry.total(), 5);
    }

    #[test]
    fn test_registry_lookups() {
        let mut registry = Registry::new();
        let id = registry.add("a");
        registry.add("b");
        registry.add("a");

        assert_eq!(*registry.index_to_value(id).unwrap(), "a");
        assert_eq!(registry.get_count_for_index(id).unwrap(), 2);
        assert_eq!(registry.value_to_index(&"b"), Some(1));
        assert_eq!(registry.value_to_index(&"q"), None);
    }

    #[test]
    fn test_registry_unknown_id() {
        let registry: Registry<String> = Registry::new();
        assert!(matches!(
            registry.index_to_value(3),
            Err(CombiError::UnknownId(3))
        ));
        assert!(matches!(
            registry.get_count_for_index(0),
            Err(CombiError::UnknownId(0))
        ));
    }

    #[test]
    fn test_registry_most_common() {
        let mut registry = Registry::new();
        for value in ["a", "b", "b", "c", "c"] {
            registry.add(value);
        }
        assert_eq!(
            registry.most_common(None),
            vec![("b", 2), ("c", 2), ("a", 1)]
        );
        assert_eq!(registry.most_common(Some(1)), vec![("b", 2)]);
    }

    #[test]
    fn test_registry_entries_match_ids() {
        let mut registry = Registry::new();
        for value in ["k", "j", "k"] {
            registry.add(value);
        }
        let entries: Vec<_> = registry.entries().collect();
        assert_eq!(entries, vec![(0, &"k", 2), (1, &"j", 1)]);
    }

    #[test]
    fn test_registry_counts_follow_ids() {
        let mut registry = Registry::new();
        for value in ["p", "q", "r", "q", "r", "r"] {
            registry.add(value);
        }
        let counts: Vec<u64> = (0..registry.count())
            .map(|id| registry.get_count_for_index(id).unwrap())
            .collect();
        assert_eq!(counts, vec![1, 2, 3]);
        assert_eq!(counts.iter().sum::<u64>(), registry.total());
        assert!(matches!(
            registry.get_count_for_index(3),
            Err(CombiError::UnknownId(3))
        ));
    }
}
