//! Axum extractor for validated request bodies
//!
//! This module provides the `ValidJson<T>` extractor that filters,
//! deserializes and validates request payloads before they reach handlers.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use super::filters::{FieldFilter, apply_filters};
use crate::core::error::{ApiError, ValidationError};

/// Trait for request bodies accepted by [`ValidJson`]
pub trait RequestBody: DeserializeOwned + Validate + Send {
    /// Filters applied to the raw JSON, in order
    const FILTERS: &'static [(&'static str, FieldFilter)] = &[];
}

/// Axum extractor that filters and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_category(
///     ValidJson(body): ValidJson<CreateCategory>,
/// ) -> ApiResult<ApiResponse<Category>> {
///     // body.name is already trimmed and non-empty
/// }
/// ```
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: RequestBody,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            ApiError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        let payload = apply_filters(payload, T::FILTERS).map_err(ApiError::internal)?;
        let body: T = serde_json::from_value(payload)?;
        body.validate()?;

        Ok(ValidJson(body))
    }
}
