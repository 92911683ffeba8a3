//! Customer service implementation.

use crate::cache::{CustomerCache, LocalCache};
use crate::customer_service::CustomerService;
use crate::dto::{ComponentStatus, CreateCustomerRequest, CustomerResponse};
use async_trait::async_trait;
use clientele_core::{ClienteleError, ClienteleResult};
use clientele_repository::{CustomerRepository, DatabaseConnection};
use clientele_resilience::LivenessHandle;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Customer service with a read-through cache on name lookups.
///
/// Only lookups by name touch the cache. Creates and listings go straight
/// to the backing store, and nothing is ever invalidated: cached entries
/// live until their TTL runs out.
pub struct CustomerServiceImpl {
    repository: Arc<dyn CustomerRepository>,
    cache: Arc<dyn CustomerCache>,
    cache_liveness: LivenessHandle,
    store_liveness: LivenessHandle,
}

impl CustomerServiceImpl {
    /// Creates a new customer service.
    pub fn new(
        repository: Arc<dyn CustomerRepository>,
        cache: Arc<dyn CustomerCache>,
        cache_liveness: LivenessHandle,
        store_liveness: LivenessHandle,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_liveness,
            store_liveness,
        }
    }
}

#[async_trait]
impl CustomerService for CustomerServiceImpl {
    async fn create_customer(&self, request: CreateCustomerRequest) -> ClienteleResult<CustomerResponse> {
        debug!("Creating customer: {}", request.name);

        request.validate()?;

        let customer = self
            .repository
            .insert_customer(&request)
            .await
            .map_err(|e| {
                warn!(name = %request.name, error = %e, "Customer registration failed");
                ClienteleError::creation_failed(e)
            })?;

        info!(customer_id = %customer.id, "Customer created");
        Ok(CustomerResponse::from(customer))
    }

    async fn lookup_customer_by_name(&self, name: &str) -> ClienteleResult<Option<CustomerResponse>> {
        if let Some(customer) = self.cache.retrieve(name) {
            debug!(name, "Customer served from cache");
            return Ok(Some(CustomerResponse::from(customer)));
        }

        let found = self
            .repository
            .find_customer_by_name(name)
            .await
            .map_err(|e| {
                warn!(name, error = %e, "Customer lookup failed");
                ClienteleError::lookup_failed(e)
            })?;

        let Some(customer) = found else {
            debug!(name, "Customer not found");
            return Ok(None);
        };

        self.cache.persist(&customer);
        Ok(Some(CustomerResponse::from(customer)))
    }

    async fn list_customers(&self) -> ClienteleResult<Vec<CustomerResponse>> {
        debug!("Listing customers");

        let customers = self.repository.find_all_customers().await.map_err(|e| {
            warn!(error = %e, "Customer listing failed");
            ClienteleError::listing_failed(e)
        })?;

        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    fn is_cache_healthy(&self) -> bool {
        self.cache_liveness.is_alive()
    }

    fn is_backing_store_healthy(&self) -> bool {
        self.store_liveness.is_alive()
    }

    fn component_statuses(&self) -> Vec<ComponentStatus> {
        vec![
            ComponentStatus::new(DatabaseConnection::COMPONENT, self.is_backing_store_healthy()),
            ComponentStatus::new(LocalCache::COMPONENT, self.is_cache_healthy()),
        ]
    }
}
