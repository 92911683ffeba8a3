//! Application state for Axum handlers.

use clientele_service::CustomerService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<dyn CustomerService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(customer_service: Arc<dyn CustomerService>) -> Self {
        Self { customer_service }
    }
}
