//! Split counters keyed by token or rule site.
//!
//! Works like a `HashMap<K, u64>` tally but remembers the order in which
//! keys were first counted, so rankings break ties the same way on every
//! run instead of following hash order.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy)]
struct CountEntry {
    count: u64,
    first_seen: usize,
}

/// Tally of splits per key
#[derive(Debug, Clone)]
pub struct SplitCounter<K> {
    counts: HashMap<K, CountEntry>,
    next_order: usize,
}

impl<K: Eq + Hash + Clone> SplitCounter<K> {
    /// Create an empty counter
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
            next_order: 0,
        }
    }

    /// Count one split for `key`
    pub fn increment(&mut self, key: K) {
        let next_order = &mut self.next_order;
        let entry = self.counts.entry(key).or_insert_with(|| {
            let first_seen = *next_order;
            *next_order += 1;
            CountEntry {
                count: 0,
                first_seen,
            }
        });
        entry.count += 1;
    }

    /// Splits counted for `key` (0 if never seen)
    pub fn count<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(key).map(|e| e.count).unwrap_or(0)
    }

    /// Sum over all keys
    pub fn total(&self) -> u64 {
        self.counts.values().map(|e| e.count).sum()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `n` most frequent keys, highest count first
    ///
    /// Equal counts keep first-encountered order.
    pub fn top(&self, n: usize) -> Vec<(K, u64)> {
        let mut entries: Vec<(&K, &CountEntry)> = self.counts.iter().collect();
        entries.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });

        entries
            .into_iter()
            .take(n)
            .map(|(key, entry)| (key.clone(), entry.count))
            .collect()
    }
}

impl<K: Eq + Hash + Clone> Default for SplitCounter<K> {
    fn default() -> Self {
        Self::new()
    }
}
