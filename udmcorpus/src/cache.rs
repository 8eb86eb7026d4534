//! Bounded least-recently-used map for memoized lookups.
//!
//! Every access stamps the entry with a monotonically increasing tick. When an
//! insert would exceed the capacity, the entry with the oldest tick is evicted.
//! Capacities are small (hundreds of entries), so eviction scans the map
//! instead of maintaining a linked list.
use hashbrown::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Slot<V> {
    value: V,
    last_used: u64,
}

/// Hit/miss counters of a cache since creation or the last [`LruCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// lookups that found an entry
    pub hits: u64,
    /// lookups that found nothing
    pub misses: u64,
    /// entries dropped to stay within capacity
    pub evictions: u64,
    /// entries currently held
    pub len: usize,
    /// maximum number of entries, 0 when caching is off
    pub capacity: usize,
}

/// Map holding at most `capacity` entries, evicting the least recently used.
#[derive(Debug)]
pub struct LruCache<K, V> {
    map: HashMap<K, Slot<V>>,
    capacity: usize,
    tick: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// A cache holding at most `capacity` entries. Zero disables storage.
    pub fn new(capacity: usize) -> LruCache<K, V> {
        LruCache {
            map: HashMap::with_capacity(capacity.min(1024)),
            capacity,
            tick: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Returns a clone of the cached value and marks it as most recently used.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let tick = self.next_tick();
        match self.map.get_mut(key) {
            Some(slot) => {
                slot.last_used = tick;
                self.hits += 1;
                Some(slot.value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts or replaces `key`, evicting the least recently used entry when full.
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }

        let tick = self.next_tick();

        if !self.map.contains_key(&key) && self.map.len() >= self.capacity {
            self.evict_lru();
        }

        self.map.insert(
            key,
            Slot {
                value,
                last_used: tick,
            },
        );
    }

    fn evict_lru(&mut self) {
        let oldest = self
            .map
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(k, _)| k.clone());

        if let Some(key) = oldest {
            self.map.remove(&key);
            self.evictions += 1;
            log::trace!("cache full ({}), evicted least recently used entry", self.capacity);
        }
    }

    /// whether `key` is cached, without touching its recency
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// number of cached entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops all entries and resets the counters.
    pub fn clear(&mut self) {
        self.map.clear();
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    /// Snapshot of the counters and current size.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            len: self.map.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        // touch "a" so "b" becomes the oldest
        assert_eq!(cache.get(&"a"), Some(1));
        cache.insert("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn replacing_does_not_evict() {
        let mut cache = LruCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"b"), Some(2));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = LruCache::new(0);
        cache.insert("a", 1);
        assert!(cache.is_empty());
        assert_eq!(cache.get(&"a"), None);
    }

    #[test]
    fn counts_hits_and_misses() {
        let mut cache = LruCache::new(4);
        assert_eq!(cache.get(&1), None::<&str>);
        cache.insert(1, "one");
        cache.get(&1);
        cache.get(&1);

        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.len), (2, 1, 1));

        cache.clear();
        assert_eq!(cache.stats(), CacheStats { capacity: 4, ..Default::default() });
    }
}
