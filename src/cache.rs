use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;
use tokio::time::Instant;

/// In-memory cache whose entries expire a fixed delay after insertion.
///
/// Inserting an existing key overwrites it and restarts its clock, so the
/// last write wins. Owned by whoever needs it; there is no global instance.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (Instant, V)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Live value for `key`; an expired entry is evicted on access
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some((inserted, _)) => inserted.elapsed() >= self.ttl,
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|(_, value)| value.clone())
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(key, (Instant::now(), value));
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries
            .retain(|_, (inserted, _)| inserted.elapsed() < ttl);
        before - self.entries.len()
    }

    /// Entry count, including entries that expired but were not yet evicted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
