//! Truncate capability scenarios.
//!
//! Truncate is DELETE on the collection path and answers 204 with an empty
//! body whether or not anything was stored.

use http::Method;

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::auth;

/// Truncating an empty collection: 204, empty body.
pub async fn empty_collection(harness: &Harness) {
    harness.reset_token();

    let response = harness.client().delete(harness.path()).await;

    asserts::assert_no_content(&response);
}

/// Truncating a populated collection: 204, empty body.
pub async fn populated_collection<F: ResourceFixture>(harness: &Harness, fixture: &F) {
    harness.reset_token();
    fixture.create_many(10).await;

    let response = harness.client().delete(harness.path()).await;

    asserts::assert_no_content(&response);
}

/// A tokenless truncate request answers 401.
pub async fn rejects_missing_token(harness: &Harness) {
    auth::rejects_missing_token(harness, Method::DELETE, harness.path()).await;
}

/// A truncate request without the truncate authority answers 403.
pub async fn rejects_insufficient_authority(harness: &Harness) {
    auth::rejects_insufficient_authority(harness, Method::DELETE, harness.path()).await;
}
