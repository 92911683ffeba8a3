//! Customer service trait definition.

use crate::dto::{ComponentStatus, CreateCustomerRequest, CustomerResponse};
use async_trait::async_trait;
use clientele_core::ClienteleResult;

/// Customer service trait.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Validates and registers a new customer.
    ///
    /// Fails with `InvalidName` / `InvalidCity` before touching the backing
    /// store, or with `CreationFailed` when the insert fails.
    async fn create_customer(&self, request: CreateCustomerRequest) -> ClienteleResult<CustomerResponse>;

    /// Looks a customer up by exact name, reading through the cache.
    ///
    /// `Ok(None)` means no such customer; `LookupFailed` means the backing
    /// store could not answer.
    async fn lookup_customer_by_name(&self, name: &str) -> ClienteleResult<Option<CustomerResponse>>;

    /// Lists every customer straight from the backing store.
    async fn list_customers(&self) -> ClienteleResult<Vec<CustomerResponse>>;

    /// Returns true if the cache passed its last liveness probe.
    fn is_cache_healthy(&self) -> bool;

    /// Returns true if the backing store passed its last liveness probe.
    fn is_backing_store_healthy(&self) -> bool;

    /// Reports every monitored component.
    fn component_statuses(&self) -> Vec<ComponentStatus>;
}
