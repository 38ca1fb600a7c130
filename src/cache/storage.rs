//! In-memory response cache with a fixed freshness window
//!
//! Entries are never evicted in the background; a stale entry is dropped the
//! next time it is looked up.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;

/// How long a stored response stays fresh.
pub const CACHE_DURATION_MS: i64 = 30_000;

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    stored_at: i64,
}

impl CacheEntry {
    fn is_stale(&self, now: i64) -> bool {
        now - self.stored_at >= CACHE_DURATION_MS
    }
}

/// Fingerprint-keyed store of the last successful payload.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fresh payload for `key`, if any.
    pub fn get(&self, key: &str, now: i64) -> Option<Value> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if !entry.is_stale(now) => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `payload`, replacing any previous entry and its timestamp.
    pub fn put(&self, key: &str, payload: Value, now: i64) {
        self.lock().insert(
            key.to_string(),
            CacheEntry {
                payload,
                stored_at: now,
            },
        );
    }

    /// Remove all entries, returning how many were dropped.
    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let count = entries.len();
        entries.clear();
        count
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_get() {
        let cache = ResponseCache::new();
        cache.put("k1", json!({"a": 1}), 1_000);

        assert_eq!(cache.get("k1", 1_000), Some(json!({"a": 1})));
        assert_eq!(cache.get("missing", 1_000), None);
    }

    #[test]
    fn test_fresh_just_before_window() {
        let cache = ResponseCache::new();
        cache.put("k1", json!(1), 0);

        assert!(cache.get("k1", CACHE_DURATION_MS - 1).is_some());
    }

    #[test]
    fn test_stale_at_window_boundary() {
        let cache = ResponseCache::new();
        cache.put("k1", json!(1), 0);

        assert_eq!(cache.get("k1", CACHE_DURATION_MS), None);
        // Stale entry removed on lookup
        assert!(cache.is_empty());
    }

    #[test]
    fn test_put_refreshes_timestamp() {
        let cache = ResponseCache::new();
        cache.put("k1", json!("old"), 0);
        cache.put("k1", json!("new"), 20_000);

        assert_eq!(cache.get("k1", 40_000), Some(json!("new")));
    }

    #[test]
    fn test_clear() {
        let cache = ResponseCache::new();
        cache.put("k1", json!(1), 0);
        cache.put("k2", json!(2), 0);

        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.get("k1", 0), None);
        assert_eq!(cache.len(), 0);
    }
}
