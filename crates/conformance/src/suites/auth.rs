//! Authentication and authorization scenarios.
//!
//! Every protected route must answer 401 to a tokenless request and 403 to a
//! token whose roles grant no authority for the operation. These two
//! scenarios are generic over method and path so a concrete suite can apply
//! them to each capability route it exposes.

use http::Method;

use crate::asserts;
use crate::harness::Harness;
use crate::token;

/// Clears the token cell and expects 401 with an accepted localized detail.
pub async fn rejects_missing_token(harness: &Harness, method: Method, path: &str) {
    harness.reset_token();
    harness.client().token().clear();

    let response = harness.client().send(method, path, None).await;

    asserts::assert_unauthorized(&response);
}

/// Installs a token whose roles carry no authority and expects 403 with an
/// accepted localized detail.
pub async fn rejects_insufficient_authority(harness: &Harness, method: Method, path: &str) {
    harness
        .client()
        .token()
        .set(token::access_token_with_roles(&[token::INSUFFICIENT_ROLE]));

    let response = harness.client().send(method, path, None).await;

    asserts::assert_forbidden(&response);
}
