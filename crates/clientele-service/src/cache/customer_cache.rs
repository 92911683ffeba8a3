//! Customer-typed view over the local cache.

use crate::cache::{cache_keys, EntityCodec, JsonCodec, LocalCache};
use clientele_core::Customer;
use std::sync::Arc;
use tracing::{debug, warn};

/// Typed cache for customers keyed by name.
///
/// Both operations swallow every failure: a value that cannot be decoded
/// reads as a miss, a value that cannot be encoded is not written.
pub trait CustomerCache: Send + Sync {
    /// Returns the cached customer named `name`, if any.
    fn retrieve(&self, name: &str) -> Option<Customer>;

    /// Caches `customer` under its name.
    fn persist(&self, customer: &Customer);
}

/// [`CustomerCache`] backed by the in-process [`LocalCache`].
pub struct LocalCustomerCache<C = JsonCodec> {
    cache: Arc<LocalCache>,
    codec: C,
}

impl LocalCustomerCache {
    /// Creates a JSON-encoded customer cache.
    #[must_use]
    pub fn new(cache: Arc<LocalCache>) -> Self {
        Self::with_codec(cache, JsonCodec)
    }
}

impl<C: EntityCodec<Customer>> LocalCustomerCache<C> {
    /// Creates a customer cache with a custom codec.
    #[must_use]
    pub fn with_codec(cache: Arc<LocalCache>, codec: C) -> Self {
        Self { cache, codec }
    }
}

impl<C: EntityCodec<Customer>> CustomerCache for LocalCustomerCache<C> {
    fn retrieve(&self, name: &str) -> Option<Customer> {
        let key = cache_keys::customer_by_name(name);
        let bytes = self.cache.get(&key)?;

        match self.codec.decode(&bytes) {
            Ok(customer) => Some(customer),
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    fn persist(&self, customer: &Customer) {
        let key = cache_keys::customer_by_name(&customer.name);

        match self.codec.encode(customer) {
            Ok(bytes) => {
                self.cache.put(&key, bytes);
                debug!(key = %key, "Customer cached");
            }
            Err(e) => warn!(key = %key, error = %e, "Could not encode customer for cache"),
        }
    }
}

/// [`CustomerCache`] used when caching is switched off: every read misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCustomerCache;

impl CustomerCache for DisabledCustomerCache {
    fn retrieve(&self, _name: &str) -> Option<Customer> {
        None
    }

    fn persist(&self, _customer: &Customer) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use clientele_config::CacheConfig;
    use clientele_core::{ClienteleError, ClienteleResult, CustomerId};

    struct BrokenEncoder;

    impl EntityCodec<Customer> for BrokenEncoder {
        fn encode(&self, _entity: &Customer) -> ClienteleResult<Bytes> {
            Err(ClienteleError::internal("encoder offline"))
        }

        fn decode(&self, bytes: &[u8]) -> ClienteleResult<Customer> {
            JsonCodec.decode(bytes)
        }
    }

    fn amanda() -> Customer {
        Customer {
            id: CustomerId::new(),
            name: "Amanda".to_string(),
            city: "Campinas".to_string(),
        }
    }

    #[test]
    fn test_persist_then_retrieve() {
        let cache = LocalCustomerCache::new(Arc::new(LocalCache::new(CacheConfig::default())));
        let customer = amanda();

        assert!(cache.retrieve("Amanda").is_none());
        cache.persist(&customer);
        assert_eq!(cache.retrieve("Amanda"), Some(customer));
    }

    #[test]
    fn test_undecodable_entry_reads_as_miss() {
        let local = Arc::new(LocalCache::new(CacheConfig::default()));
        local.put("customer-Amanda", "definitely not json");

        let cache = LocalCustomerCache::new(local);
        assert!(cache.retrieve("Amanda").is_none());
    }

    #[test]
    fn test_encode_failure_skips_write() {
        let local = Arc::new(LocalCache::new(CacheConfig::default()));
        let cache = LocalCustomerCache::with_codec(Arc::clone(&local), BrokenEncoder);

        cache.persist(&amanda());
        assert!(local.get("customer-Amanda").is_none());
    }

    #[test]
    fn test_disabled_cache_never_hits() {
        let cache = DisabledCustomerCache;
        cache.persist(&amanda());
        assert!(cache.retrieve("Amanda").is_none());
    }

    #[test]
    fn test_uninitialized_cache_is_silent() {
        let local = Arc::new(LocalCache::new(CacheConfig {
            shards: 3,
            ..CacheConfig::default()
        }));
        let cache = LocalCustomerCache::new(local);

        cache.persist(&amanda());
        assert!(cache.retrieve("Amanda").is_none());
    }
}
