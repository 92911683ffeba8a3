//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use clientele_core::{CustomerId, ErrorResponse, FieldError, NewCustomer};
use clientele_service::{ComponentStatus, CustomerResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Clientele API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clientele API",
        version = "1.0.0",
        description = "Customer registration and lookup with a read-through local cache",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        // Customer endpoints
        crate::controllers::customer_controller::list_customers,
        crate::controllers::customer_controller::get_customer,
        crate::controllers::customer_controller::create_customer,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
        crate::controllers::health_controller::monitor,
    ),
    components(
        schemas(
            CustomerId,
            NewCustomer,
            CustomerResponse,
            ComponentStatus,
            HealthResponse,
            ErrorResponse,
            FieldError,
        )
    ),
    tags(
        (name = "customers", description = "Customer registration and lookup"),
        (name = "health", description = "Health and component monitoring")
    )
)]
pub struct ApiDoc;
