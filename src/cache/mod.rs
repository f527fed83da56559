//
//  apigee-mint
//  cache/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Cache-Aside List Reads
//!
//! Some list reads (a developer's accepted rate plans) are served through a
//! keyed cache. The cache holds the raw payloads as received from the server,
//! before hydration, so a hit hydrates fresh entities every time.
//!
//! ## Overview
//!
//! - [`CacheStore`] - Keyed storage of raw payload lists
//! - [`MemoryCache`] - In-process map with optional TTL
//! - [`FileCache`] - One JSON file per key with optional TTL
//! - [`NullCache`] - Never stores anything
//! - [`CacheAside`] - The read path: hit returns, miss fetches and populates
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use apigee_mint::api::mint::DeveloperRatePlan;
//! use apigee_mint::cache::{CacheAside, MemoryCache};
//! use apigee_mint::mapper::{Mapper, RawPayload};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cache = CacheAside::new(Arc::new(MemoryCache::new()), Mapper::default());
//! let prototype = DeveloperRatePlan::new("dev");
//!
//! let plans = cache
//!     .get_list("developer_accepted_rateplan:dev", &prototype, || async {
//!         let item: RawPayload = serde_json::from_str(r#"{"id":"rp1"}"#).unwrap();
//!         Ok(vec![item])
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(plans.len(), 1);
//! # }
//! ```
//!
//! ## Notes
//!
//! - Nothing in the read path invalidates entries; staleness is bounded by
//!   the store's TTL or an explicit [`CacheStore::remove`]/[`CacheStore::clear`]
//! - Concurrent misses on one key both fetch; the last write wins

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::api::common::ApiError;
use crate::config::{CacheBackend, CacheConfig};
use crate::mapper::{Entity, Mapper, RawPayload};

/// Keyed storage of raw payload lists.
pub trait CacheStore: Send + Sync {
    /// Returns the cached list, or `None` on a miss or expired entry.
    fn get(&self, key: &str) -> Option<Vec<RawPayload>>;

    /// Stores a list, replacing any previous entry.
    fn set(&self, key: &str, items: Vec<RawPayload>);

    /// Drops one entry.
    fn remove(&self, key: &str);

    /// Drops every entry.
    fn clear(&self);
}

/// A store that never holds anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

impl CacheStore for NullCache {
    fn get(&self, _key: &str) -> Option<Vec<RawPayload>> {
        None
    }

    fn set(&self, _key: &str, _items: Vec<RawPayload>) {}

    fn remove(&self, _key: &str) {}

    fn clear(&self) {}
}

/// Builds the store selected by configuration.
///
/// # Parameters
///
/// * `config` - The `[cache]` section
/// * `dir` - Directory for the file backend
pub fn store_from_config(config: &CacheConfig, dir: std::path::PathBuf) -> Arc<dyn CacheStore> {
    let ttl = config.ttl_secs.map(Duration::from_secs);
    match config.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::with_ttl(ttl)),
        CacheBackend::File => Arc::new(FileCache::new(dir).with_ttl(ttl)),
        CacheBackend::None => Arc::new(NullCache),
    }
}

/// Cache-aside accessor over a [`CacheStore`].
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    mapper: Mapper,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, mapper: Mapper) -> Self {
        Self { store, mapper }
    }

    /// An accessor that always fetches.
    pub fn disabled(mapper: Mapper) -> Self {
        Self::new(Arc::new(NullCache), mapper)
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// Returns the entities cached under `key`, fetching them on a miss.
    ///
    /// On a hit, one entity is hydrated per cached payload, each starting from
    /// `prototype.instantiate_new()`, in cache order. On a miss, `fetch` runs
    /// once, its raw payloads are written to the store under `key` and then
    /// hydrated in order.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error (nothing is cached) or a hydration error.
    pub async fn get_list<E, F, Fut>(
        &self,
        key: &str,
        prototype: &E,
        fetch: F,
    ) -> Result<Vec<E>, ApiError>
    where
        E: Entity,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<RawPayload>, ApiError>>,
    {
        let items = match self.store.get(key) {
            Some(items) => {
                tracing::debug!("Cache hit for {} ({} items)", key, items.len());
                items
            }
            None => {
                tracing::debug!("Cache miss for {}", key);
                let items = fetch().await?;
                self.store.set(key, items.clone());
                items
            }
        };

        items
            .iter()
            .map(|item| self.mapper.hydrate_new(prototype, item).map_err(ApiError::from))
            .collect()
    }
}
