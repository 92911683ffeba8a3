//! In-process key/value cache with a uniform TTL.
//!
//! [`LocalCacheStore`] is the storage itself: a sharded `DashMap` keyed by a
//! 64-bit hash of the cache key. [`LocalCache`] is the replaceable handle the
//! rest of the service holds; it tolerates a store that failed to build and
//! can rebuild it when the liveness monitor asks.

use async_trait::async_trait;
use bytes::Bytes;
use clientele_config::CacheConfig;
use clientele_core::{ClienteleError, ClienteleResult, MonitoredResource};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::hash::BuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Errors raised by the cache store. They never leave the service layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CacheError {
    /// The store could not be built from the given settings.
    #[error("invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// The value is larger than `max_entry_bytes`.
    #[error("entry of {size} bytes exceeds the {max} byte limit")]
    EntryTooLarge { size: usize, max: usize },

    /// The store holds `max_entries` live entries.
    #[error("cache is full ({0} entries)")]
    Full(usize),

    /// The handle has no store.
    #[error("cache is not initialized")]
    NotInitialized,

    /// A value just written could not be read back.
    #[error("entry {0} could not be read back")]
    ReadBackFailed(String),
}

/// Snapshot of the cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that returned a value.
    pub hits: u64,
    /// Lookups that found nothing or an expired entry.
    pub misses: u64,
    /// Lookups whose hash slot held a different key.
    pub collisions: u64,
    /// Deletes that removed an entry.
    pub del_hits: u64,
    /// Deletes that found nothing to remove.
    pub del_misses: u64,
}

#[derive(Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    collisions: AtomicU64,
    del_hits: AtomicU64,
    del_misses: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            collisions: self.collisions.load(Ordering::Relaxed),
            del_hits: self.del_hits.load(Ordering::Relaxed),
            del_misses: self.del_misses.load(Ordering::Relaxed),
        }
    }
}

struct CacheEntry {
    key: Box<str>,
    value: Bytes,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Sharded in-memory store.
///
/// Entries live for exactly `ttl` after their last write. A lookup at or
/// after that instant reports absence and drops the entry.
pub struct LocalCacheStore<S = ahash::RandomState> {
    entries: DashMap<u64, CacheEntry, ahash::RandomState>,
    key_hasher: S,
    ttl: Duration,
    max_entries: usize,
    max_entry_bytes: usize,
    counters: Counters,
}

impl LocalCacheStore {
    /// Builds a store from configuration.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        Self::with_hasher(config, ahash::RandomState::new())
    }
}

impl<S: BuildHasher> LocalCacheStore<S> {
    /// Builds a store that hashes keys with `key_hasher`.
    pub fn with_hasher(config: &CacheConfig, key_hasher: S) -> Result<Self, CacheError> {
        if config.ttl_secs == 0 {
            return Err(CacheError::InvalidConfig("ttl_secs must be positive".to_string()));
        }
        if config.shards < 2 || !config.shards.is_power_of_two() {
            return Err(CacheError::InvalidConfig(format!(
                "shards must be a power of two greater than one, got {}",
                config.shards
            )));
        }
        if config.max_entries == 0 {
            return Err(CacheError::InvalidConfig("max_entries must be positive".to_string()));
        }
        if config.max_entry_bytes == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entry_bytes must be positive".to_string(),
            ));
        }

        Ok(Self {
            entries: DashMap::with_capacity_and_hasher_and_shard_amount(
                0,
                ahash::RandomState::new(),
                config.shards,
            ),
            key_hasher,
            ttl: config.ttl(),
            max_entries: config.max_entries,
            max_entry_bytes: config.max_entry_bytes,
            counters: Counters::default(),
        })
    }

    /// Returns the value stored under `key` if it has not expired.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let hash = self.key_hasher.hash_one(key);
        let now = Instant::now();

        let Some(entry) = self.entries.get(&hash) else {
            Counters::bump(&self.counters.misses);
            return None;
        };

        if &*entry.key != key {
            Counters::bump(&self.counters.collisions);
            return None;
        }

        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove_if(&hash, |_, e| e.is_expired(now));
            Counters::bump(&self.counters.misses);
            return None;
        }

        Counters::bump(&self.counters.hits);
        Some(entry.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous entry and
    /// restarting its TTL.
    pub fn put(&self, key: &str, value: impl Into<Bytes>) -> Result<(), CacheError> {
        let value = value.into();
        if value.len() > self.max_entry_bytes {
            return Err(CacheError::EntryTooLarge {
                size: value.len(),
                max: self.max_entry_bytes,
            });
        }

        let hash = self.key_hasher.hash_one(key);
        if !self.entries.contains_key(&hash) && self.entries.len() >= self.max_entries {
            self.purge_expired();
            if self.entries.len() >= self.max_entries {
                return Err(CacheError::Full(self.max_entries));
            }
        }

        self.insert(hash, key, value);
        Ok(())
    }

    /// Stores `value` under `key` without the size and capacity limits.
    ///
    /// Only for short-lived liveness entries that are deleted right after;
    /// a full store must still pass its round trip.
    fn put_unchecked(&self, key: &str, value: Bytes) {
        self.insert(self.key_hasher.hash_one(key), key, value);
    }

    fn insert(&self, hash: u64, key: &str, value: Bytes) {
        self.entries.insert(
            hash,
            CacheEntry {
                key: key.into(),
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Removes the entry stored under `key`. Returns true if one was removed.
    pub fn delete(&self, key: &str) -> bool {
        let hash = self.key_hasher.hash_one(key);
        let removed = self.entries.remove_if(&hash, |_, e| &*e.key == key).is_some();

        if removed {
            Counters::bump(&self.counters.del_hits);
        } else {
            Counters::bump(&self.counters.del_misses);
        }
        removed
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Returns the counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }

    /// Returns the number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the TTL applied to every entry.
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Replaceable handle on the cache store.
///
/// When the store could not be built every read is a miss and every write is
/// dropped; callers never see an error.
pub struct LocalCache {
    config: CacheConfig,
    store: RwLock<Option<Arc<LocalCacheStore>>>,
}

impl LocalCache {
    /// Component name reported by the liveness monitor.
    pub const COMPONENT: &'static str = "local-cache";

    /// Builds the cache. A failed build is logged and leaves the handle empty.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let store = match LocalCacheStore::new(&config) {
            Ok(store) => {
                info!(
                    ttl_secs = config.ttl_secs,
                    shards = config.shards,
                    max_entries = config.max_entries,
                    "Local cache initialized"
                );
                Some(Arc::new(store))
            }
            Err(e) => {
                error!(error = %e, "Could not create local cache, continuing without it");
                None
            }
        };

        Self {
            config,
            store: RwLock::new(store),
        }
    }

    /// Returns true if a store is installed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.store.read().is_some()
    }

    /// Returns the current store, if any.
    #[must_use]
    pub fn store(&self) -> Option<Arc<LocalCacheStore>> {
        self.store.read().clone()
    }

    /// Looks up `key`. Absent, expired and uninitialized all read as `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Bytes> {
        let value = self.store()?.get(key);
        debug!(key, hit = value.is_some(), "Local cache lookup");
        value
    }

    /// Stores `value` under `key`. Failures are logged, never returned.
    pub fn put(&self, key: &str, value: impl Into<Bytes>) {
        let Some(store) = self.store() else {
            debug!(key, "Local cache not initialized, skipping write");
            return;
        };

        match store.put(key, value) {
            Ok(()) => debug!(key, "Local cache write"),
            Err(e) => warn!(key, error = %e, "Local cache write failed"),
        }
    }

    /// Removes `key`. Returns false when nothing was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.store().is_some_and(|store| store.delete(key))
    }

    /// Returns the counters of the current store.
    #[must_use]
    pub fn stats(&self) -> Option<CacheStats> {
        self.store().map(|store| store.stats())
    }

    /// Replaces the store with a fresh, empty one.
    pub fn reinitialize(&self) -> Result<(), CacheError> {
        let store = LocalCacheStore::new(&self.config)?;
        *self.store.write() = Some(Arc::new(store));
        info!("Local cache reinitialized");
        Ok(())
    }

    /// Writes a synthetic entry, reads it back and deletes it.
    fn round_trip(&self) -> Result<(), CacheError> {
        let store = self.store().ok_or(CacheError::NotInitialized)?;

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let key = format!("{stamp}-liveness");

        store.put_unchecked(&key, Bytes::from(key.clone()));
        let read_back = store.get(&key);
        store.delete(&key);

        match read_back {
            Some(value) if value == key.as_bytes() => {
                let stats = store.stats();
                debug!(
                    collisions = stats.collisions,
                    del_hits = stats.del_hits,
                    del_misses = stats.del_misses,
                    hits = stats.hits,
                    misses = stats.misses,
                    entries = store.len(),
                    "Local cache stats"
                );
                Ok(())
            }
            _ => Err(CacheError::ReadBackFailed(key)),
        }
    }
}

#[async_trait]
impl MonitoredResource for LocalCache {
    fn name(&self) -> &str {
        Self::COMPONENT
    }

    async fn probe(&self) -> ClienteleResult<()> {
        self.round_trip()
            .map_err(|e| ClienteleError::Cache(e.to_string()))
    }

    async fn reconnect(&self) -> ClienteleResult<()> {
        self.reinitialize()
            .map_err(|e| ClienteleError::Cache(e.to_string()))
    }
}
