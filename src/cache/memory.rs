//
//  apigee-mint
//  cache/memory.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::CacheStore;
use crate::mapper::RawPayload;

struct Entry {
    stored_at: Instant,
    items: Vec<RawPayload>,
}

/// In-process cache store.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    ttl: Option<Duration>,
}

impl MemoryCache {
    /// A store whose entries never expire.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            entries: Mutex::default(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drops every expired entry.
    pub fn cleanup_expired(&self) {
        let mut entries = self.lock();
        self.cleanup_expired_internal(&mut entries);
    }

    fn cleanup_expired_internal(&self, entries: &mut HashMap<String, Entry>) {
        let Some(ttl) = self.ttl else {
            return;
        };
        entries.retain(|key, entry| {
            let live = entry.stored_at.elapsed() < ttl;
            if !live {
                tracing::debug!("Dropping expired cache entry {}", key);
            }
            live
        });
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<RawPayload>> {
        let mut entries = self.lock();
        let expired = match (entries.get(key), self.ttl) {
            (None, _) => return None,
            (Some(entry), Some(ttl)) => entry.stored_at.elapsed() >= ttl,
            (Some(_), None) => false,
        };
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|e| e.items.clone())
    }

    fn set(&self, key: &str, items: Vec<RawPayload>) {
        let mut entries = self.lock();
        // Sweep while holding the lock
        self.cleanup_expired_internal(&mut entries);
        entries.insert(
            key.to_string(),
            Entry {
                stored_at: Instant::now(),
                items,
            },
        );
    }

    fn remove(&self, key: &str) {
        self.lock().remove(key);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<RawPayload> {
        serde_json::from_str(r#"[{"id":"a"}]"#).unwrap()
    }

    #[test]
    fn test_set_get_remove() {
        let cache = MemoryCache::new();
        assert!(cache.get("k").is_none());

        cache.set("k", items());
        assert_eq!(cache.get("k"), Some(items()));

        cache.remove("k");
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_clear() {
        let cache = MemoryCache::new();
        cache.set("a", items());
        cache.set("b", items());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_set_sweeps_expired_keys() {
        let cache = MemoryCache::with_ttl(Some(Duration::ZERO));
        for key in ["a", "b", "c"] {
            cache.set(key, items());
        }
        // Only the entry written last survives the sweep
        assert_eq!(cache.len(), 1);

        cache.cleanup_expired();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_sweep_keeps_live_entries() {
        let cache = MemoryCache::with_ttl(Some(Duration::from_secs(3600)));
        cache.set("a", items());
        cache.set("b", items());
        cache.cleanup_expired();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let cache = MemoryCache::with_ttl(Some(Duration::ZERO));
        cache.set("k", items());
        assert!(cache.get("k").is_none());
        assert!(cache.is_empty());
    }
}
