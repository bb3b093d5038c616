use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use recencycache::{Error, PutEvent, UnboundedLruCache};

fn assert_consistent<K, V>(cache: &UnboundedLruCache<K, V>)
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
{
    let keys = cache.keys();
    let unique: HashSet<_> = keys.iter().cloned().collect();

    assert_eq!(keys.len(), cache.len());
    assert_eq!(unique.len(), keys.len());
    for key in &keys {
        assert!(cache.contains_key(key));
    }
}

#[test]
fn test_put_then_get() {
    let cache = UnboundedLruCache::new();

    for i in 0..32u32 {
        cache.put(i, i * 10).unwrap();
    }
    for i in 0..32u32 {
        assert_eq!(cache.get(&i), Some(i * 10));
    }
    assert_eq!(cache.get(&99), None);
    assert_consistent(&cache);
}

#[test]
fn test_evicted_key_is_gone() {
    let cache = UnboundedLruCache::new();

    cache.put("k", 1).unwrap();
    cache.evict_oldest().unwrap();

    assert_eq!(cache.get(&"k"), None);
    assert!(!cache.contains_key(&"k"));

    cache.put("k", 2).unwrap();
    assert_eq!(cache.get(&"k"), Some(2));
}

#[test]
fn test_insertion_order_drives_eviction() {
    let cache = UnboundedLruCache::new();

    cache.put("k1", 1).unwrap();
    cache.put("k2", 2).unwrap();
    cache.put("k3", 3).unwrap();

    let order: Vec<_> = std::iter::from_fn(|| cache.evict_oldest().unwrap())
        .map(|entry| *entry.key())
        .collect();

    assert_eq!(order, vec!["k1", "k2", "k3"]);
    assert!(cache.evict_oldest().unwrap().is_none());
}

#[test]
fn test_empty_eviction_is_idempotent() {
    let cache: UnboundedLruCache<u32, u32> = UnboundedLruCache::new();

    for _ in 0..3 {
        assert!(cache.evict_oldest().unwrap().is_none());
    }
    assert!(cache.is_empty());
    assert_eq!(cache.stats().evictions(), 0);
}

#[test]
fn test_update_reports_previous_value() {
    let events: Arc<Mutex<Vec<PutEvent<&str, &str>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let cache = UnboundedLruCache::with_listeners(
        |_| Ok(()),
        move |event| {
            sink.lock().push(event.clone());
            Ok(())
        },
    );

    cache.put("k1", "a").unwrap();
    cache.put("k2", "b").unwrap();
    cache.put("k1", "c").unwrap();

    {
        let events = events.lock();
        let last = events.last().unwrap();
        assert_eq!(last.previous_value(), Some(&"a"));
        assert_eq!(last.value(), &"c");
        assert!(last.is_update());
        assert_eq!(events.iter().filter(|e| e.is_update()).count(), 1);
    }

    assert_eq!(cache.evict_oldest().unwrap().unwrap().key(), &"k2");
}

#[test]
fn test_demo_scenario() {
    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let cache: UnboundedLruCache<String, String> =
        UnboundedLruCache::with_eviction_listener(move |event| {
            assert_eq!(event.key(), "test1");
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

    cache.put("test".to_string(), "test".to_string()).unwrap();
    cache.put("test1".to_string(), "test1".to_string()).unwrap();
    cache.put("test2".to_string(), "test2".to_string()).unwrap();
    cache.put("test".to_string(), "newTest".to_string()).unwrap();

    let (key, value) = cache.evict_oldest().unwrap().unwrap().into_parts();
    assert_eq!((key.as_str(), value.as_str()), ("test1", "test1"));
    assert_eq!(evictions.load(Ordering::SeqCst), 1);

    assert_eq!(cache.keys(), vec!["test2".to_string(), "test".to_string()]);
    assert_eq!(cache.get("test2").as_deref(), Some("test2"));
    assert_eq!(cache.get("test").as_deref(), Some("newTest"));
}

#[test]
fn test_listener_error_propagates() {
    let cache = UnboundedLruCache::builder()
        .put_listener(|event: &PutEvent<u32, u32>| {
            if *event.key() == 13 {
                Err("unlucky key".into())
            } else {
                Ok(())
            }
        })
        .build();

    cache.put(1, 1).unwrap();
    let err = cache.put(13, 13).unwrap_err();

    assert!(matches!(err, Error::PutListener(_)));
    assert_eq!(err.to_string(), "Put listener failed: unlucky key");
    assert_eq!(cache.get(&13), Some(13));
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_listener_panic_releases_lock() {
    let cache = Arc::new(UnboundedLruCache::with_eviction_listener(|_| {
        panic!("listener blew up");
    }));

    cache.put(1u32, 1u32).unwrap();

    let worker = Arc::clone(&cache);
    let joined = thread::spawn(move || worker.evict_oldest()).join();
    assert!(joined.is_err());

    assert!(cache.is_empty());
    cache.put(2, 2).unwrap();
    assert_eq!(cache.get(&2), Some(2));
}

#[test]
fn test_concurrent_access_stays_consistent() {
    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let cache = Arc::new(UnboundedLruCache::with_eviction_listener(move |event| {
        sink.lock().push(*event.key());
        Ok(())
    }));

    let handles: Vec<_> = (0..8u64)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..500u64 {
                    let key = t * 1000 + i;
                    cache.put(key, i).unwrap();
                    cache.get(&(t * 1000 + i / 2));
                    if i % 3 == 0 {
                        cache.evict_oldest().unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let evicted = evicted.lock();
    let remaining = cache.keys();
    assert_consistent(&cache);
    assert_eq!(evicted.len() as u64, cache.stats().evictions());
    assert_eq!(evicted.len() + remaining.len(), 8 * 500);

    let all: HashSet<u64> = evicted.iter().chain(remaining.iter()).copied().collect();
    assert_eq!(all.len(), 8 * 500);
}
