//! Custom Axum extractors
//!
//! Both map axum's own rejections into [`ApiError::Validation`] so every
//! client input failure gets the same 422 JSON shape.

use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON body whose rejections become validation errors
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "body",
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(value))
    }
}

/// Extract and validate an integer memo id from path
pub struct MemoId(pub i64);

impl<S> FromRequestParts<S> for MemoId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer".into(),
            })
        };

        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        let id = raw.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self(id))
    }
}
