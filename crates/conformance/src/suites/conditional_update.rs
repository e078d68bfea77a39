//! Conditional update scenarios (optimistic locking).
//!
//! A conditional update carries the caller's expected version as a `version`
//! query parameter. Fresh resources are at version 0, so `version=0` matches
//! and `version=1` must trip the optimistic lock.

use tracing::info;

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::update::UpdateHooks;
use crate::suites::{ABSENT_ID, require_id};

/// Updating with the current version: 200 with the updated body.
pub async fn version_matched<F: ResourceFixture>(
    harness: &Harness,
    fixture: &F,
    hooks: &UpdateHooks<'_>,
) {
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    let path = format!("{}?version=0", harness.resource_path(&id));
    let response = harness.client().post(&path, &hooks.valid_request).await;

    asserts::assert_ok(&response);
    (hooks.assert_updated)(&asserts::json_body(&response));
}

/// Updating a fresh resource with `version=1` trips the optimistic lock:
/// 409 with the exact lock detail, double space included.
pub async fn version_mismatched_conflict<F: ResourceFixture>(
    harness: &Harness,
    fixture: &F,
    hooks: &UpdateHooks<'_>,
) {
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    let path = format!("{}?version=1", harness.resource_path(&id));
    let response = harness.client().post(&path, &hooks.valid_request).await;

    let expected = format!(
        "Failed to update: optimistic lock for {id} is failed.  Expected version is 1"
    );
    asserts::assert_conflict(
        &response,
        Some(&|detail| {
            assert_eq!(detail, expected, "Unexpected optimistic-lock detail");
        }),
    );
}

/// Conditionally updating an id that never existed answers 404.
pub async fn absent_not_found(harness: &Harness, hooks: &UpdateHooks<'_>) {
    harness.reset_token();

    let path = format!("{}?version=0", harness.resource_path(ABSENT_ID));
    let response = harness.client().post(&path, &hooks.valid_request).await;

    let expected = format!("Failed to update: {ABSENT_ID} is not found");
    asserts::assert_not_found(
        &response,
        Some(&|detail| {
            assert_eq!(detail, expected, "Unexpected not-found detail");
        }),
    );
}

/// Every invalid payload answers as a constraint violation even when the
/// version matches.
pub async fn invalid_request_rejected<F: ResourceFixture>(
    harness: &Harness,
    fixture: &F,
    hooks: &UpdateHooks<'_>,
) {
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    for (description, request) in &hooks.invalid_requests {
        info!(case = description, "posting invalid conditional update payload");

        let path = format!("{}?version=0", harness.resource_path(&id));
        let response = harness.client().post(&path, request).await;

        asserts::assert_constraint_violation(&response, None);
    }
}
