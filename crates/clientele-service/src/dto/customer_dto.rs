//! Customer-related DTOs.

use clientele_core::{Customer, CustomerId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use clientele_core::NewCustomer as CreateCustomerRequest;

/// Customer as returned to API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub name: String,
    pub city: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            city: customer.city,
        }
    }
}

/// Status of one monitored component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    /// Component name.
    pub component: String,
    /// `OK` when alive, `ERROR` otherwise.
    pub status: String,
}

impl ComponentStatus {
    /// Creates a status entry from a liveness flag.
    #[must_use]
    pub fn new(component: impl Into<String>, alive: bool) -> Self {
        Self {
            component: component.into(),
            status: if alive { "OK" } else { "ERROR" }.to_string(),
        }
    }

    /// Returns true if the component reported `OK`.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_from_customer() {
        let id = CustomerId::new();
        let response = CustomerResponse::from(Customer {
            id,
            name: "Fernanda Lima".to_string(),
            city: "Limeira".to_string(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["name"], "Fernanda Lima");
        assert_eq!(json["city"], "Limeira");
    }

    #[test]
    fn test_component_status() {
        assert_eq!(ComponentStatus::new("database", true).status, "OK");
        assert!(!ComponentStatus::new("local-cache", false).is_ok());
    }
}
