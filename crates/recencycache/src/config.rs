//! Builder for [`UnboundedLruCache`]

use std::hash::Hash;
use std::sync::Arc;

use crate::cache::UnboundedLruCache;
use crate::error::ListenerError;
use crate::event::{EvictionEvent, PutEvent};
use crate::listener::Listeners;

/// Configures listeners and preallocation before building a cache
///
/// ```
/// use recencycache::UnboundedLruCache;
///
/// let cache = UnboundedLruCache::<String, u64>::builder()
///     .initial_capacity(1024)
///     .eviction_listener(|event| {
///         println!("evicted {}", event.key());
///         Ok(())
///     })
///     .build();
///
/// cache.put("a".to_string(), 1).unwrap();
/// assert_eq!(cache.get("a"), Some(1));
/// ```
pub struct CacheBuilder<K, V> {
    listeners: Listeners<K, V>,
    initial_capacity: usize,
}

impl<K, V> CacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a builder with no listeners and no preallocation
    pub fn new() -> Self {
        Self {
            listeners: Listeners::default(),
            initial_capacity: 0,
        }
    }

    /// Preallocate room for `capacity` entries
    ///
    /// This only sizes the backing storage. The cache never evicts on its own.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Register the callback invoked once per eviction
    pub fn eviction_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&EvictionEvent<K, V>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listeners.eviction = Some(Arc::new(listener));
        self
    }

    /// Register the callback invoked once per insert or update
    pub fn put_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&PutEvent<K, V>) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listeners.put = Some(Arc::new(listener));
        self
    }

    /// Build the cache
    pub fn build(self) -> UnboundedLruCache<K, V> {
        UnboundedLruCache::from_parts(self.listeners, self.initial_capacity)
    }
}

impl<K, V> Default for CacheBuilder<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
