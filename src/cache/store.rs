//! Bounded store of rendered result sets.

use indexmap::IndexMap;

use crate::source::types::{Query, ResultSet};

/// Default number of result sets kept before eviction begins.
pub const DEFAULT_CACHE_LENGTH: usize = 20;

/// FIFO cache keyed by query.
///
/// Entries are evicted strictly in insertion order: reading an entry never
/// refreshes its position. Writes are first-write-wins, so a duplicate
/// completion for a key already present cannot churn the store.
#[derive(Debug)]
pub struct ResultCache {
    entries: IndexMap<Query, ResultSet>,
    max_length: usize,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_LENGTH)
    }
}

impl ResultCache {
    /// Create a cache holding at most `max_length` entries (floor of 1).
    pub fn new(max_length: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            max_length: max_length.max(1),
        }
    }

    pub fn has(&self, query: &Query) -> bool {
        self.entries.contains_key(query)
    }

    pub fn get(&self, query: &Query) -> Option<&ResultSet> {
        self.entries.get(query)
    }

    /// Store a result set. Returns false without touching the store when
    /// the key is already present. Inserting at capacity evicts the single
    /// oldest entry first.
    pub fn insert(&mut self, query: Query, results: ResultSet) -> bool {
        if self.entries.contains_key(&query) {
            return false;
        }
        if self.entries.len() >= self.max_length {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(query, results);
        true
    }

    /// Drop every entry, keeping the configured capacity.
    pub fn refresh(&mut self) {
        self.entries.clear();
    }

    /// Change capacity (floor of 1), evicting oldest entries until the
    /// store fits the new limit.
    pub fn set_max_length(&mut self, max_length: usize) {
        self.max_length = max_length.max(1);
        while self.entries.len() > self.max_length {
            self.entries.shift_remove_index(0);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
