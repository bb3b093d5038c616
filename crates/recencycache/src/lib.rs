//! # recencycache
//!
//! Unbounded in-memory cache that tracks access recency and evicts only when
//! asked to.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena slot (O(1))
//! - **Recency list**: Doubly-linked chain over the same slots, least recently
//!   used at the head (O(1) promotion and eviction)
//! - **Listeners**: Optional callbacks fired synchronously on put and eviction
//!
//! ## Example
//!
//! ```
//! use recencycache::UnboundedLruCache;
//!
//! let cache = UnboundedLruCache::new();
//! cache.put("test", "test").unwrap();
//! cache.put("test1", "test1").unwrap();
//! cache.put("test", "newTest").unwrap();
//!
//! let evicted = cache.evict_oldest().unwrap().unwrap();
//! assert_eq!(evicted.into_parts(), ("test1", "test1"));
//! assert_eq!(cache.get(&"test"), Some("newTest"));
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod event;
mod listener;
mod lru;
mod stats;

pub use cache::UnboundedLruCache;
pub use config::CacheBuilder;
pub use error::{Error, ListenerError, Result};
pub use event::{EvictedEntry, EvictionEvent, PutEvent};
pub use listener::{EvictionListener, PutListener};
pub use stats::CacheStats;
