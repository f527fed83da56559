//
//  apigee-mint
//  cache/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! On-disk cache store.
//!
//! Each key is stored as one JSON document:
//!
//! ```json
//! {"key": "developer_accepted_rateplan:dev@example.com", "stored_at": "2026-01-12T10:00:00Z", "items": [...]}
//! ```
//!
//! I/O and decode failures are logged and treated as misses.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CacheStore;
use crate::mapper::RawPayload;

const EXTENSION: &str = "json";

#[derive(Serialize, Deserialize)]
struct Document {
    key: String,
    stored_at: DateTime<Utc>,
    items: Vec<RawPayload>,
}

/// Cache store keeping one file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Option<Duration>,
}

impl FileCache {
    /// A store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", file_stem(key), EXTENSION))
    }

    fn is_expired(&self, stored_at: DateTime<Utc>) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => Utc::now() - stored_at >= ttl,
            Err(_) => false,
        }
    }

    fn read(&self, path: &Path) -> Option<Document> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Could not read cache file {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Ignoring corrupt cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn delete(path: &Path) {
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Could not remove cache file {}: {}", path.display(), e);
            }
        }
    }
}

/// Maps a cache key to a safe file stem.
///
/// Alphanumerics, `-`, `_` and `.` are kept; every other byte becomes `%XX`.
pub fn file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                stem.push(byte as char)
            }
            other => stem.push_str(&format!("%{:02X}", other)),
        }
    }
    stem
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Option<Vec<RawPayload>> {
        let path = self.path_for(key);
        let document = self.read(&path)?;

        if document.key != key {
            return None;
        }
        if self.is_expired(document.stored_at) {
            tracing::debug!("Cache entry {} expired", key);
            Self::delete(&path);
            return None;
        }
        Some(document.items)
    }

    fn set(&self, key: &str, items: Vec<RawPayload>) {
        let document = Document {
            key: key.to_string(),
            stored_at: Utc::now(),
            items,
        };
        let content = match serde_json::to_string(&document) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Could not encode cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            tracing::warn!("Could not create cache directory {}: {}", self.dir.display(), e);
            return;
        }
        let path = self.path_for(key);
        if let Err(e) = std::fs::write(&path, content) {
            tracing::warn!("Could not write cache file {}: {}", path.display(), e);
        }
    }

    fn remove(&self, key: &str) {
        Self::delete(&self.path_for(key));
    }

    fn clear(&self) {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
            Err(e) => {
                tracing::warn!("Could not list cache directory {}: {}", self.dir.display(), e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == EXTENSION) {
                Self::delete(&path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<RawPayload> {
        serde_json::from_str(r#"[{"id":"a","ratePlan":{"id":"gold"}},{"id":"b"}]"#).unwrap()
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(
            file_stem("developer_accepted_rateplan:dev@example.com"),
            "developer_accepted_rateplan%3Adev%40example.com"
        );
        assert_eq!(file_stem("../x"), "..%2Fx");
    }

    #[test]
    fn test_set_get_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().join("cache"));

        cache.set("developer_accepted_rateplan:dev", items());
        let got = cache.get("developer_accepted_rateplan:dev").unwrap();

        assert_eq!(got, items());
        assert_eq!(
            got[0].keys().collect::<Vec<_>>(),
            vec!["id", "ratePlan"]
        );
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());

        cache.set("a", items());
        cache.set("b", items());
        cache.remove("a");
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());

        std::fs::write(dir.path().join("keep.txt"), "x").unwrap();
        cache.clear();
        assert!(cache.get("b").is_none());
        assert!(dir.path().join("keep.txt").exists());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path()).with_ttl(Some(Duration::ZERO));

        cache.set("k", items());
        assert!(cache.get("k").is_none());
        assert!(!cache.path_for("k").exists());
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path());
        std::fs::write(cache.path_for("k"), "{not json").unwrap();

        assert!(cache.get("k").is_none());
    }

    #[test]
    fn test_clear_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        FileCache::new(dir.path().join("never-created")).clear();
    }
}
