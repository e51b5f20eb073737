//! Keyed storage for computed tokens.
//!
//! Encoding is cheap but not free, and galleries tend to ask for the same
//! placeholder many times. [`ThumbHashCache`] is the seam callers plug their
//! own store into; [`LruThumbHashCache`] is a bounded in-memory default.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::token::ThumbHash;

/// A thread-safe store of tokens keyed by caller-chosen strings (a path, a
/// content digest, a URL).
pub trait ThumbHashCache: Send + Sync {
    /// The token stored under `key`, if any.
    fn get(&self, key: &str) -> Option<ThumbHash>;

    /// Store `hash` under `key`, replacing any previous entry.
    fn insert(&self, key: String, hash: ThumbHash);

    /// Return the cached token for `key`, computing and storing it on a miss.
    ///
    /// Nothing is stored when `compute` fails. Callers holding a
    /// `dyn ThumbHashCache` use the free [`get_or_try_insert_with`] instead.
    fn get_or_try_insert_with<E, F>(&self, key: &str, compute: F) -> Result<ThumbHash, E>
    where
        Self: Sized,
        F: FnOnce() -> Result<ThumbHash, E>,
    {
        get_or_try_insert_with(self, key, compute)
    }
}

/// Return the cached token for `key`, computing and storing it on a miss.
///
/// Works with trait objects as well as concrete caches. Nothing is stored
/// when `compute` fails.
pub fn get_or_try_insert_with<C, E, F>(cache: &C, key: &str, compute: F) -> Result<ThumbHash, E>
where
    C: ThumbHashCache + ?Sized,
    F: FnOnce() -> Result<ThumbHash, E>,
{
    if let Some(hash) = cache.get(key) {
        return Ok(hash);
    }
    let hash = compute()?;
    cache.insert(key.to_owned(), hash.clone());
    Ok(hash)
}

/// Least-recently-used cache bounded by entry count.
#[derive(Debug)]
pub struct LruThumbHashCache {
    entries: Mutex<LruCache<String, ThumbHash>>,
}

impl LruThumbHashCache {
    /// An empty cache holding at most `capacity` tokens.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Number of cached tokens.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of tokens kept before eviction.
    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.lock().cap()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl ThumbHashCache for LruThumbHashCache {
    fn get(&self, key: &str) -> Option<ThumbHash> {
        let hit = self.entries.lock().get(key).cloned();
        if hit.is_some() {
            log::trace!("thumbhash cache hit: {key}");
        } else {
            log::trace!("thumbhash cache miss: {key}");
        }
        hit
    }

    fn insert(&self, key: String, hash: ThumbHash) {
        self.entries.lock().put(key, hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_impl::encode;
    use crate::error::{InputError, ThumbHashError};
    use std::cell::Cell;
    use std::sync::Arc;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn solid(value: u8) -> ThumbHash {
        encode(2, 2, &[value, value, value, 255].repeat(4)).unwrap()
    }

    #[test]
    fn test_get_or_insert_computes_once() {
        let cache = LruThumbHashCache::new(cap(4));
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok::<_, ThumbHashError>(solid(10))
        };

        let first = cache.get_or_try_insert_with("a.png", compute).unwrap();
        let second = cache.get_or_try_insert_with("a.png", compute).unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failure_is_not_cached() {
        let cache = LruThumbHashCache::new(cap(4));
        let result = cache.get_or_try_insert_with("broken.png", || encode(0, 0, &[]));
        assert!(matches!(
            result,
            Err(ThumbHashError::InvalidInput(InputError::ZeroDimension { .. }))
        ));
        assert!(cache.is_empty());
        assert!(cache.get("broken.png").is_none());
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = LruThumbHashCache::new(cap(2));
        cache.insert("a".into(), solid(0));
        cache.insert("b".into(), solid(100));
        // Touch "a" so "b" becomes the eviction candidate.
        assert!(cache.get("a").is_some());
        cache.insert("c".into(), solid(200));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert_eq!(cache.get("c"), Some(solid(200)));
        assert_eq!(cache.capacity(), cap(2));
    }

    #[test]
    fn test_get_or_insert_through_trait_object() {
        let cache: Box<dyn ThumbHashCache> = Box::new(LruThumbHashCache::new(cap(4)));
        let first = get_or_try_insert_with(cache.as_ref(), "a.png", || {
            Ok::<_, ThumbHashError>(solid(40))
        })
        .unwrap();
        assert_eq!(first, solid(40));

        // A hit never runs the computation.
        let second = get_or_try_insert_with(cache.as_ref(), "a.png", || {
            Err(ThumbHashError::Preview("not called".into()))
        })
        .unwrap();
        assert_eq!(second, first);

        let failed = get_or_try_insert_with(cache.as_ref(), "b.png", || encode(0, 1, &[]));
        assert!(failed.is_err());
        assert!(cache.get("b.png").is_none());
    }

    #[test]
    fn test_clear() {
        let cache = LruThumbHashCache::new(cap(2));
        cache.insert("a".into(), solid(0));
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(LruThumbHashCache::new(cap(16)));
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let key = format!("img-{i}");
                    cache
                        .get_or_try_insert_with(&key, || encode(1, 1, &[i * 50, 0, 0, 255]))
                        .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 4);
    }
}
