//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Clientele.
///
/// Validation variants are produced before anything touches the backing
/// store. Infrastructure variants describe why the backing store could not
/// answer. The `*Failed` variants are what the customer service hands back
/// to its callers: they wrap the underlying cause so the HTTP layer can
/// still pick a meaningful status code.
#[derive(Error, Debug)]
pub enum ClienteleError {
    // ============ Validation Errors ============
    /// Customer name missing or blank
    #[error("Invalid value 'name'")]
    InvalidName,

    /// Customer city missing or blank
    #[error("Invalid value 'city'")]
    InvalidCity,

    /// Generic validation error (malformed payloads, bad parameters)
    #[error("Validation error: {0}")]
    Validation(String),

    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with key {key}")]
    NotFound {
        resource_type: &'static str,
        key: String,
    },

    /// Conflict error (e.g., duplicate customer name)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Infrastructure Errors ============
    /// No live connection to the backing store
    #[error("could not communicate with database")]
    BackingStoreUnavailable,

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Local cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Service Errors ============
    /// Customer creation failed after validation
    #[error("could not complete customer registration")]
    CreationFailed(#[source] Box<ClienteleError>),

    /// Customer lookup failed (distinct from "not found")
    #[error("could not find customer")]
    LookupFailed(#[source] Box<ClienteleError>),

    /// Customer listing failed
    #[error("could not find customers")]
    ListingFailed(#[source] Box<ClienteleError>),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClienteleError {
    /// Returns the HTTP status code for this error.
    ///
    /// Service-level wrappers report the status of their cause.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidName | Self::InvalidCity | Self::Validation(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Conflict(_) => 409,
            Self::BackingStoreUnavailable | Self::Timeout(_) => 503,
            Self::CreationFailed(cause) | Self::LookupFailed(cause) | Self::ListingFailed(cause) => {
                cause.status_code()
            }
            Self::Database(_) | Self::Configuration(_) | Self::Cache(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidName => "INVALID_NAME",
            Self::InvalidCity => "INVALID_CITY",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BackingStoreUnavailable => "BACKING_STORE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::CreationFailed(_) => "CUSTOMER_CREATION_FAILED",
            Self::LookupFailed(_) => "CUSTOMER_LOOKUP_FAILED",
            Self::ListingFailed(_) => "CUSTOMER_LISTING_FAILED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, key: T) -> Self {
        Self::NotFound {
            resource_type,
            key: key.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Wraps a backing store failure raised while creating a customer.
    #[must_use]
    pub fn creation_failed(cause: Self) -> Self {
        Self::CreationFailed(Box::new(cause))
    }

    /// Wraps a backing store failure raised while looking a customer up.
    #[must_use]
    pub fn lookup_failed(cause: Self) -> Self {
        Self::LookupFailed(Box::new(cause))
    }

    /// Wraps a backing store failure raised while listing customers.
    #[must_use]
    pub fn listing_failed(cause: Self) -> Self {
        Self::ListingFailed(Box::new(cause))
    }

    /// Returns the innermost error, skipping service-level wrappers.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::CreationFailed(cause) | Self::LookupFailed(cause) | Self::ListingFailed(cause) => {
                cause.root_cause()
            }
            other => other,
        }
    }

    /// Returns true for input errors that are the caller's fault.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidName | Self::InvalidCity | Self::Validation(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for ClienteleError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    return Self::Conflict(db_err.message().to_string());
                }
                Self::Database(err.to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::BackingStoreUnavailable
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClienteleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {err}"))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `ClienteleError`.
    #[must_use]
    pub fn from_error(error: &ClienteleError) -> Self {
        let details = match error {
            ClienteleError::InvalidName => Some(vec![FieldError::blank("name")]),
            ClienteleError::InvalidCity => Some(vec![FieldError::blank("city")]),
            _ => None,
        };

        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

impl FieldError {
    fn blank(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("Invalid value '{field}'"),
            code: "not_blank".to_string(),
        }
    }
}

impl From<&ClienteleError> for ErrorResponse {
    fn from(error: &ClienteleError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ClienteleError::InvalidName.status_code(), 400);
        assert_eq!(ClienteleError::InvalidCity.status_code(), 400);
        assert_eq!(ClienteleError::validation("bad payload").status_code(), 400);
        assert_eq!(ClienteleError::not_found("Customer", "Thiago").status_code(), 404);
        assert_eq!(ClienteleError::conflict("duplicate").status_code(), 409);
        assert_eq!(ClienteleError::BackingStoreUnavailable.status_code(), 503);
        assert_eq!(ClienteleError::Timeout("slow".to_string()).status_code(), 503);
        assert_eq!(ClienteleError::Database("db".to_string()).status_code(), 500);
    }

    #[test]
    fn test_wrapped_errors_report_cause_status() {
        let dup = ClienteleError::creation_failed(ClienteleError::conflict("name taken"));
        assert_eq!(dup.status_code(), 409);

        let down = ClienteleError::listing_failed(ClienteleError::BackingStoreUnavailable);
        assert_eq!(down.status_code(), 503);

        let broken = ClienteleError::lookup_failed(ClienteleError::Database("boom".to_string()));
        assert_eq!(broken.status_code(), 500);
    }

    #[test]
    fn test_service_error_messages() {
        let err = ClienteleError::creation_failed(ClienteleError::BackingStoreUnavailable);
        assert_eq!(err.to_string(), "could not complete customer registration");

        let err = ClienteleError::lookup_failed(ClienteleError::BackingStoreUnavailable);
        assert_eq!(err.to_string(), "could not find customer");

        let err = ClienteleError::listing_failed(ClienteleError::BackingStoreUnavailable);
        assert_eq!(err.to_string(), "could not find customers");

        assert_eq!(
            ClienteleError::BackingStoreUnavailable.to_string(),
            "could not communicate with database"
        );
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ClienteleError::InvalidName.to_string(), "Invalid value 'name'");
        assert_eq!(ClienteleError::InvalidCity.to_string(), "Invalid value 'city'");
        assert!(ClienteleError::InvalidName.is_validation());
        assert!(!ClienteleError::BackingStoreUnavailable.is_validation());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ClienteleError::InvalidName.error_code(), "INVALID_NAME");
        assert_eq!(ClienteleError::conflict("dup").error_code(), "CONFLICT");
        assert_eq!(ClienteleError::internal("err").error_code(), "INTERNAL_ERROR");
        assert_eq!(
            ClienteleError::lookup_failed(ClienteleError::BackingStoreUnavailable).error_code(),
            "CUSTOMER_LOOKUP_FAILED"
        );
    }

    #[test]
    fn test_root_cause() {
        let err = ClienteleError::lookup_failed(ClienteleError::Timeout("1s".to_string()));
        assert!(matches!(err.root_cause(), ClienteleError::Timeout(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = ClienteleError::not_found("Customer", "Thiago");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(response.message.contains("Thiago"));
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_carries_field_details() {
        let response = ErrorResponse::from(&ClienteleError::InvalidCity);
        let details = response.details.expect("details");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "city");
    }
}
