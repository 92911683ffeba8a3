//! Customer controller.

use crate::{
    extractors::{AppJson, ValidatedQuery},
    responses::{created, ok, ApiResponse, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clientele_core::ClienteleError;
use clientele_service::{CreateCustomerRequest, CustomerResponse};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;
use validator::Validate;

/// Creates the customer router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route("/:name", get(get_customer))
}

/// Query parameters for the customer collection.
#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    /// When present and non-empty, look up this exact name instead of listing.
    #[validate(length(max = 255))]
    pub name: Option<String>,
}

/// List customers, or look one up with `?name=`.
#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Customer list, or the named customer", body = [CustomerResponse]),
        (status = 400, description = "Invalid query"),
        (status = 404, description = "Named customer not found"),
        (status = 503, description = "Backing store unavailable")
    )
)]
pub async fn list_customers(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CustomerQuery>,
) -> Result<Response, AppError> {
    match query.name.filter(|name| !name.is_empty()) {
        Some(name) => Ok(ok(find_customer(&state, &name).await?)?.into_response()),
        None => {
            debug!("List customers request");
            let customers = state.customer_service.list_customers().await?;
            Ok(ok(customers)?.into_response())
        }
    }
}

/// Look up a customer by name.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{name}",
    tag = "customers",
    params(("name" = String, Path, description = "Exact customer name")),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found"),
        (status = 503, description = "Backing store unavailable")
    )
)]
pub async fn get_customer(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<CustomerResponse>>, AppError> {
    ok(find_customer(&state, &name).await?)
}

/// Register a new customer.
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid payload, name or city"),
        (status = 409, description = "Name already registered"),
        (status = 503, description = "Backing store unavailable")
    )
)]
pub async fn create_customer(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponse>>), AppError> {
    debug!("Create customer request: {}", request.name);

    let response = state.customer_service.create_customer(request).await?;
    Ok(created(response))
}

async fn find_customer(state: &AppState, name: &str) -> Result<CustomerResponse, AppError> {
    debug!("Get customer request: {}", name);

    state
        .customer_service
        .lookup_customer_by_name(name)
        .await?
        .ok_or_else(|| AppError(ClienteleError::not_found("Customer", name)))
}
