use std::num::NonZeroUsize;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use lru::LruCache;
use tracing::warn;

const MAX_ENTRIES: usize = 256;

/// Stable cache key for a request: method, URL, and the encoded body. Two
/// requests that differ in any field never collide.
pub fn request_key(method: &str, url: &str, fields: &[(String, String)]) -> String {
    let mut key = format!("{method} {url}");
    for (name, value) in fields {
        key.push_str(" &");
        key.push_str(name);
        key.push('=');
        key.push_str(value);
    }
    key
}

struct Entry {
    body: String,
    expires_at: Instant,
}

/// Read-through response cache with one fixed time-to-live. Not
/// domain-aware: expiry is the only invalidation.
pub struct ResponseCache {
    inner: RwLock<LruCache<String, Entry>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        let cap = NonZeroUsize::new(MAX_ENTRIES).expect("nonzero capacity");
        Self {
            inner: RwLock::new(LruCache::new(cap)),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let Ok(mut cache) = self.inner.write() else {
            warn!("cache lock poisoned, treating as miss");
            return None;
        };
        let entry = cache.get(key)?;
        if Instant::now() > entry.expires_at {
            cache.pop(key);
            return None;
        }
        Some(entry.body.clone())
    }

    pub fn put(&self, key: &str, body: &str) {
        let Ok(mut cache) = self.inner.write() else {
            warn!("cache lock poisoned, skipping write");
            return;
        };
        cache.put(
            key.to_string(),
            Entry {
                body: body.to_string(),
                expires_at: Instant::now() + self.ttl,
            },
        );
    }
}
