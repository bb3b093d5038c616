//! Scripted walk through the cache operations

use recencycache::{EvictedEntry, Result, UnboundedLruCache};
use tracing::info;

/// Writes performed before the first eviction
const SCRIPT: [(&str, &str); 4] = [
    ("test", "test"),
    ("test1", "test1"),
    ("test2", "test2"),
    ("test", "newTest"),
];

/// What to do around the scripted writes
#[derive(Debug, Clone, Copy, Default)]
pub struct Plan {
    /// Numbered entries inserted after the script
    pub extra: usize,
    /// Evict everything once the script has run
    pub drain: bool,
}

/// Run the script and return every entry it evicted, oldest first
pub fn run(
    cache: &UnboundedLruCache<String, String>,
    plan: Plan,
) -> Result<Vec<EvictedEntry<String, String>>> {
    for (key, value) in SCRIPT {
        cache.put(key.to_string(), value.to_string())?;
    }

    for i in 0..plan.extra {
        cache.put(format!("extra{}", i), i.to_string())?;
    }

    let mut evicted = Vec::new();
    evicted.extend(cache.evict_oldest()?);

    if plan.drain {
        while let Some(entry) = cache.evict_oldest()? {
            evicted.push(entry);
        }
    }

    info!(
        evicted = evicted.len(),
        remaining = cache.len(),
        hits = cache.stats().hits(),
        updates = cache.stats().updates(),
        "Scenario finished"
    );

    Ok(evicted)
}
