//! Caching infrastructure for the service layer.
//!
//! A single-process cache with a uniform TTL sits in front of the customer
//! lookup path. Nothing here ever fails a request: a broken, full or missing
//! cache behaves like an empty one.

pub mod cache_keys;
mod codec;
mod customer_cache;
mod local_cache;

pub use codec::{EntityCodec, JsonCodec};
pub use customer_cache::{CustomerCache, DisabledCustomerCache, LocalCustomerCache};
pub use local_cache::{CacheError, CacheStats, LocalCache, LocalCacheStore};
