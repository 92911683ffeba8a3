//! Extractors that report bad input through the API error envelope.
//!
//! Axum's own `Json` and `Query` rejections answer with plain-text bodies.
//! These wrappers turn them into `ClienteleError::Validation` so every 400
//! carries the same `{success, error}` shape as the rest of the API.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use clientele_core::{ClienteleError, ValidateExt};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

/// Message reported for any body that cannot be decoded into the target type.
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// JSON body extractor with enveloped rejections.
///
/// Domain validation is left to the service; this only guarantees the body
/// decoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(error = %rejection, "Rejected request body");
            AppError(ClienteleError::validation(INVALID_PAYLOAD))
        })?;

        Ok(AppJson(value))
    }
}

/// Query string extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T> std::ops::Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(ClienteleError::validation(rejection.body_text())))?;

        value.validate_request()?;

        Ok(ValidatedQuery(value))
    }
}
