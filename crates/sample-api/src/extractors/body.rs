//! JSON body extractor with problem-shaped rejections.
//!
//! Axum's stock `Json` rejection renders plain text; this wrapper turns any
//! unreadable body into the bare `Bad Request` problem shape instead, so a
//! request missing a required field gets the same error format as every other
//! failure.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body wrapper used in place of `axum::Json` for request extraction.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| ApiError::bad_request(format!("Unreadable body: {err}")))?;

        let value = serde_json::from_slice(&bytes)
            .map_err(|err| ApiError::bad_request(format!("Invalid JSON: {err}")))?;

        Ok(ApiJson(value))
    }
}
