//! Query string extractor with problem-shaped rejections.
//!
//! Axum's stock `Query` rejection renders plain text; this wrapper turns an
//! undeserializable query string into the bare `Bad Request` problem shape,
//! matching what the body extractor does for unreadable JSON.

use axum::extract::{FromRequestParts, Query};
use http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Query wrapper used in place of `axum::extract::Query`.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::from_request_parts(parts, state)
            .await
            .map_err(|err| ApiError::bad_request(format!("Invalid query: {err}")))?;

        Ok(ApiQuery(params))
    }
}
