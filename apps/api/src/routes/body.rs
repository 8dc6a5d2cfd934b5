//! JSON body extractor whose rejections are client errors in our own error shape.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Like `axum::Json`, but an empty body yields `T::default()` and any other
/// rejection (bad JSON, wrong shape) becomes `AppError::Validation` (400).
/// The `Content-Type` header is not checked.
pub struct LenientJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(LenientJson(T::default()));
        }

        serde_json::from_slice(&bytes)
            .map(LenientJson)
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))
    }
}
