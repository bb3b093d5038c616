//! Records describing cache mutations
//!
//! Each record is built at the moment of the mutation and stamped with the
//! wall-clock time of its construction.

use std::fmt;
use chrono::{DateTime, SecondsFormat, Utc};

/// Raised when the least recently used entry is evicted
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EvictionEvent<K, V> {
    key: K,
    value: V,
    timestamp: DateTime<Utc>,
}

impl<K, V> EvictionEvent<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            timestamp: Utc::now(),
        }
    }

    /// Key of the evicted entry
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Value the evicted entry held
    pub fn value(&self) -> &V {
        &self.value
    }

    /// When the entry was removed
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for EvictionEvent<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "evict key={} value={} at={}",
            self.key,
            self.value,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// Raised when an entry is inserted or overwritten
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PutEvent<K, V> {
    key: K,
    value: V,
    previous_value: Option<V>,
    timestamp: DateTime<Utc>,
}

impl<K, V> PutEvent<K, V> {
    pub(crate) fn new(key: K, value: V, previous_value: Option<V>) -> Self {
        Self {
            key,
            value,
            previous_value,
            timestamp: Utc::now(),
        }
    }

    /// Key that was written
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Value now stored under the key
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Value replaced by this write, `None` for a fresh insert
    pub fn previous_value(&self) -> Option<&V> {
        self.previous_value.as_ref()
    }

    /// When the write happened
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// True when the write overwrote an existing key
    pub fn is_update(&self) -> bool {
        self.previous_value.is_some()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for PutEvent<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "put key={} value={}", self.key, self.value)?;
        if let Some(previous) = &self.previous_value {
            write!(f, " previous={}", previous)?;
        }
        write!(
            f,
            " at={}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }
}

/// Entry handed back to the caller of
/// [`UnboundedLruCache::evict_oldest`](crate::UnboundedLruCache::evict_oldest)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EvictedEntry<K, V> {
    key: K,
    value: V,
    evicted_at: DateTime<Utc>,
}

impl<K, V> EvictedEntry<K, V> {
    /// Key of the evicted entry
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Value the evicted entry held
    pub fn value(&self) -> &V {
        &self.value
    }

    /// When the entry was removed
    pub fn evicted_at(&self) -> DateTime<Utc> {
        self.evicted_at
    }

    /// Take ownership of the key and value
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<EvictionEvent<K, V>> for EvictedEntry<K, V> {
    fn from(event: EvictionEvent<K, V>) -> Self {
        Self {
            key: event.key,
            value: event.value,
            evicted_at: event.timestamp,
        }
    }
}
