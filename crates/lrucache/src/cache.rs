//! LruCache: fixed-capacity recency cache over keys

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::order::{Iter, RecencyList};
use crate::stats::CacheStats;

/// Outcome of a single [`LruCache::touch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Touch<K> {
    /// Key was resident and is now the most recent
    Promoted,
    /// Key was absent and fit without eviction
    Inserted,
    /// Key was absent; the carried key was evicted to make room
    Evicted(K),
}

/// Least-recently-used cache with a fixed capacity
///
/// Combines a hash index (key -> arena slot) with a doubly-linked recency
/// list, so membership, promotion and eviction are all O(1).
pub struct LruCache<K> {
    /// Key -> slot in the recency list
    index: HashMap<K, usize, RandomState>,

    /// Recency order, LRU at the head
    order: RecencyList<K>,

    /// Touch counters
    stats: CacheStats,

    /// Maximum number of resident keys
    capacity: usize,
}

impl<K> LruCache<K>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` keys
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of resident keys, must be non-zero
    ///
    /// # Returns
    /// * `Result<LruCache<K>>` - `Error::Configuration` if capacity is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Configuration(
                "capacity must be greater than 0".to_string(),
            ));
        }

        debug!(capacity, "creating LRU cache");

        Ok(Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            order: RecencyList::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Mark `item` as the most recently used key
    ///
    /// A resident key is moved to the most-recent end. An absent key is
    /// inserted there, evicting the least-recently-used key first when the
    /// cache is full.
    pub fn touch(&mut self, item: K) -> Touch<K> {
        let outcome = if let Some(&idx) = self.index.get(&item) {
            self.order.move_to_tail(idx);
            self.stats.record_hit();
            trace!(len = self.order.len(), "promoted resident key");
            Touch::Promoted
        } else {
            let evicted = if self.order.len() >= self.capacity {
                self.evict()
            } else {
                None
            };

            let idx = self.order.push_tail(item.clone());
            self.index.insert(item, idx);
            self.stats.record_miss();
            trace!(len = self.order.len(), "inserted new key");

            match evicted {
                Some(key) => Touch::Evicted(key),
                None => Touch::Inserted,
            }
        };

        assert_eq!(
            self.index.len(),
            self.order.len(),
            "index and recency list out of sync"
        );
        assert!(self.order.len() <= self.capacity, "capacity exceeded");
        debug_assert!(self.is_consistent(), "recency list links are broken");

        outcome
    }

    /// Resident keys from most recently used to least recently used
    pub fn snapshot(&self) -> Vec<K> {
        self.order.iter().cloned().collect()
    }

    /// Check whether `key` is resident without changing its recency
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Drop every resident key and reset statistics (capacity unchanged)
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.stats.reset();
    }

    fn evict(&mut self) -> Option<K> {
        let key = self.order.pop_head()?;
        self.index.remove(&key);
        self.stats.record_eviction();
        debug!(
            capacity = self.capacity,
            len = self.order.len(),
            "evicted least-recently-used key"
        );
        Some(key)
    }

    pub(crate) fn is_consistent(&self) -> bool {
        self.order.is_consistent()
            && self.index.len() == self.order.len()
            && self
                .index
                .iter()
                .all(|(key, &idx)| self.order.key(idx) == Some(key))
    }
}

impl<K> LruCache<K> {
    /// Iterate resident keys from most recent to least recent
    pub fn iter(&self) -> Iter<'_, K> {
        self.order.iter()
    }

    /// The most recently used key
    pub fn most_recent(&self) -> Option<&K> {
        self.order.tail_key()
    }

    /// The key that would be evicted next
    pub fn least_recent(&self) -> Option<&K> {
        self.order.head_key()
    }

    /// Get current number of resident keys
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.order.len() == 0
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<'a, K> IntoIterator for &'a LruCache<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K: fmt::Debug> fmt::Debug for LruCache<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("entries", &self.order.iter().collect::<Vec<_>>())
            .finish()
    }
}
