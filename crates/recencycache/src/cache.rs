//! UnboundedLruCache: thread-safe recency cache with explicit eviction

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use parking_lot::Mutex;
use tracing::trace;

use crate::config::CacheBuilder;
use crate::error::{ListenerError, Result};
use crate::event::{EvictedEntry, EvictionEvent, PutEvent};
use crate::listener::Listeners;
use crate::lru::{LruList, Upsert};
use crate::stats::CacheStats;

/// Key-value cache ordered by access recency
///
/// Nothing is ever evicted automatically: the caller decides when to drop the
/// least recently used entry through [`evict_oldest`](Self::evict_oldest).
///
/// Every operation takes one exclusive lock covering the hash index and the
/// recency chain. Listeners run under that same lock after the mutation has
/// been applied, and must not call back into the cache.
pub struct UnboundedLruCache<K, V> {
    /// Hash index and recency chain
    inner: Mutex<LruList<K, V>>,

    /// Callbacks fired on mutation
    listeners: Listeners<K, V>,

    /// Cache statistics
    stats: CacheStats,
}

impl<K, V> UnboundedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache without listeners
    pub fn new() -> Self {
        Self::from_parts(Listeners::default(), 0)
    }

    /// Create a cache that reports evictions to `eviction_listener`
    pub fn with_eviction_listener<E>(eviction_listener: E) -> Self
    where
        E: Fn(&EvictionEvent<K, V>) -> std::result::Result<(), ListenerError>
            + Send
            + Sync
            + 'static,
    {
        Self::builder().eviction_listener(eviction_listener).build()
    }

    /// Create a cache that reports evictions and puts
    ///
    /// # Arguments
    /// * `eviction_listener` - Invoked once per evicted entry
    /// * `put_listener` - Invoked once per insert or update
    pub fn with_listeners<E, P>(eviction_listener: E, put_listener: P) -> Self
    where
        E: Fn(&EvictionEvent<K, V>) -> std::result::Result<(), ListenerError>
            + Send
            + Sync
            + 'static,
        P: Fn(&PutEvent<K, V>) -> std::result::Result<(), ListenerError> + Send + Sync + 'static,
    {
        Self::builder()
            .eviction_listener(eviction_listener)
            .put_listener(put_listener)
            .build()
    }

    /// Start configuring a cache
    pub fn builder() -> CacheBuilder<K, V> {
        CacheBuilder::new()
    }

    pub(crate) fn from_parts(listeners: Listeners<K, V>, initial_capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruList::with_capacity(initial_capacity)),
            listeners,
            stats: CacheStats::new(),
        }
    }

    /// Get a value, marking its entry most recently used
    ///
    /// # Returns
    /// * `Option<V>` - A copy of the value, or `None` if the key is absent
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut list = self.inner.lock();
        match list.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Some(value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert a value or overwrite the existing one
    ///
    /// The entry becomes the most recently used. Exactly one [`PutEvent`] is
    /// delivered to the put listener, if one is registered.
    ///
    /// # Returns
    /// * `Result<()>` - Err only if the put listener failed; the write is
    ///   applied either way
    pub fn put(&self, key: K, value: V) -> Result<()> {
        let mut list = self.inner.lock();

        let captured = if self.listeners.wants_put() {
            Some((key.clone(), value.clone()))
        } else {
            None
        };

        let previous = match list.put(key, value) {
            Upsert::Inserted => {
                self.stats.record_insert();
                None
            }
            Upsert::Updated(previous) => {
                self.stats.record_update();
                Some(previous)
            }
        };
        trace!(len = list.len(), update = previous.is_some(), "put");

        // Lock stays held through delivery
        if let Some((key, value)) = captured {
            self.listeners.notify_put(&PutEvent::new(key, value, previous))?;
        }

        Ok(())
    }

    /// Evict the least recently used entry
    ///
    /// # Returns
    /// * `Result<Option<EvictedEntry>>` - The removed entry, `None` if the cache
    ///   was empty. Err only if the eviction listener failed; the entry is
    ///   removed either way
    pub fn evict_oldest(&self) -> Result<Option<EvictedEntry<K, V>>> {
        let mut list = self.inner.lock();

        let Some((key, value)) = list.pop_front() else {
            trace!("evict on empty cache");
            return Ok(None);
        };
        self.stats.record_eviction();
        trace!(len = list.len(), "evicted least recently used entry");

        let event = EvictionEvent::new(key, value);
        self.listeners.notify_eviction(&event)?;

        Ok(Some(event.into()))
    }

    /// Copy of the entry `evict_oldest` would remove next, without touching recency
    pub fn peek_oldest(&self) -> Option<(K, V)> {
        self.inner
            .lock()
            .peek_front()
            .map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Check for a key without touching recency
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains_key(key)
    }

    /// Keys ordered from least to most recently used
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().iter().map(|(key, _)| key.clone()).collect()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl<K, V> Default for UnboundedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for UnboundedLruCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnboundedLruCache")
            .field("listeners", &self.listeners)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
