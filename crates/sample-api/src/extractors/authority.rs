//! Per-route authority guard.
//!
//! [`Authorized`] authenticates the caller and checks one route authority as
//! part of request-parts extraction. Handlers that also read a body list it
//! before their body extractor, so an unauthenticated or unauthorized request
//! is rejected with 401/403 before any body is read or parsed.

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use http::request::Parts;

use crate::error::ApiError;
use crate::extractors::Authenticated;

/// A route authority name.
///
/// Implemented by the marker types in [`crate::handlers::authority`], one per
/// interaction.
pub trait Authority {
    /// The `{resource}:{action}` authority string demanded by the route.
    const NAME: &'static str;
}

/// Extractor proving the caller holds the authority `A` names.
#[derive(Debug)]
pub struct Authorized<A> {
    auth: Authenticated,
    authority: PhantomData<A>,
}

impl<A> Authorized<A> {
    /// Returns the verified caller identity.
    pub fn authenticated(&self) -> &Authenticated {
        &self.auth
    }
}

impl<S, A> FromRequestParts<S> for Authorized<A>
where
    S: Send + Sync,
    A: Authority,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Authenticated::from_request_parts(parts, state).await?;
        auth.require(A::NAME)?;

        Ok(Self {
            auth,
            authority: PhantomData,
        })
    }
}
