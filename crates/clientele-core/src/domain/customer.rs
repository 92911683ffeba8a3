//! Customer entity.

use crate::{rules, ClienteleError, ClienteleResult, CustomerId};
use serde::{Deserialize, Serialize};

/// A registered customer.
///
/// `name` is unique across the backing store and doubles as the lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Customer {
    /// Identifier assigned by the backing store.
    pub id: CustomerId,
    /// Customer name.
    pub name: String,
    /// City the customer lives in.
    pub city: String,
}

impl Customer {
    /// Materializes a customer from a validated request and its assigned id.
    #[must_use]
    pub fn from_new(id: CustomerId, new_customer: NewCustomer) -> Self {
        Self {
            id,
            name: new_customer.name,
            city: new_customer.city,
        }
    }
}

/// Input for registering a customer. Carries no identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewCustomer {
    /// Customer name (must not be blank).
    #[serde(default)]
    pub name: String,
    /// Customer city (must not be blank).
    #[serde(default)]
    pub city: String,
}

impl NewCustomer {
    /// Creates a new customer request.
    #[must_use]
    pub fn new(name: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            city: city.into(),
        }
    }

    /// Validates the request.
    ///
    /// The name is checked before the city, so a request with both fields
    /// blank reports `InvalidName`.
    pub fn validate(&self) -> ClienteleResult<()> {
        rules::not_blank(&self.name).map_err(|_| ClienteleError::InvalidName)?;
        rules::not_blank(&self.city).map_err(|_| ClienteleError::InvalidCity)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_customer() {
        assert!(NewCustomer::new("Fernanda Lima", "Limeira").validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let result = NewCustomer::new("   ", "Limeira").validate();
        assert!(matches!(result, Err(ClienteleError::InvalidName)));
    }

    #[test]
    fn test_blank_city_is_rejected() {
        let result = NewCustomer::new("Fernanda Lima", "\t").validate();
        assert!(matches!(result, Err(ClienteleError::InvalidCity)));
    }

    #[test]
    fn test_name_checked_before_city() {
        let result = NewCustomer::new("", "").validate();
        assert!(matches!(result, Err(ClienteleError::InvalidName)));
    }

    #[test]
    fn test_missing_fields_deserialize_as_blank() {
        let parsed: NewCustomer = serde_json::from_str(r#"{"city":"Limeira"}"#).unwrap();
        assert!(parsed.name.is_empty());
        assert!(matches!(parsed.validate(), Err(ClienteleError::InvalidName)));
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let id = CustomerId::new();
        let customer = Customer::from_new(id, NewCustomer::new("Amanda", "Campinas"));
        assert_eq!(customer.id, id);
        assert_eq!(customer.name, "Amanda");
        assert_eq!(customer.city, "Campinas");
    }
}
