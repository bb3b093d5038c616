//! Mutation listeners
//!
//! Listeners are plain callbacks registered when the cache is built. They run
//! synchronously while the cache lock is held, so a listener must never call
//! back into the cache that invoked it: the lock is not reentrant and the call
//! would deadlock.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, ListenerError, Result};
use crate::event::{EvictionEvent, PutEvent};

/// Callback invoked once per eviction
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use recencycache::{EvictionEvent, EvictionListener};
///
/// let listener: EvictionListener<String, String> = Arc::new(|event: &EvictionEvent<String, String>| {
///     println!("evicted {}", event.key());
///     Ok(())
/// });
/// ```
pub type EvictionListener<K, V> =
    Arc<dyn Fn(&EvictionEvent<K, V>) -> std::result::Result<(), ListenerError> + Send + Sync>;

/// Callback invoked once per insert or update
pub type PutListener<K, V> =
    Arc<dyn Fn(&PutEvent<K, V>) -> std::result::Result<(), ListenerError> + Send + Sync>;

/// The listeners registered on one cache
pub(crate) struct Listeners<K, V> {
    pub(crate) eviction: Option<EvictionListener<K, V>>,
    pub(crate) put: Option<PutListener<K, V>>,
}

impl<K, V> Listeners<K, V> {
    /// Whether put events need to be built at all
    pub(crate) fn wants_put(&self) -> bool {
        self.put.is_some()
    }

    pub(crate) fn notify_put(&self, event: &PutEvent<K, V>) -> Result<()> {
        let Some(listener) = &self.put else {
            return Ok(());
        };

        listener(event).map_err(|e| {
            debug!(error = %e, update = event.is_update(), "put listener failed");
            Error::PutListener(e)
        })
    }

    pub(crate) fn notify_eviction(&self, event: &EvictionEvent<K, V>) -> Result<()> {
        let Some(listener) = &self.eviction else {
            return Ok(());
        };

        listener(event).map_err(|e| {
            debug!(error = %e, "eviction listener failed");
            Error::EvictionListener(e)
        })
    }
}

impl<K, V> Default for Listeners<K, V> {
    fn default() -> Self {
        Self {
            eviction: None,
            put: None,
        }
    }
}

impl<K, V> fmt::Debug for Listeners<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("eviction", &self.eviction.is_some())
            .field("put", &self.put.is_some())
            .finish()
    }
}
