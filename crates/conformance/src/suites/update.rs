//! Update capability scenarios.
//!
//! Updates ride on POST to the instance path, matching the surface under
//! test. The same hook struct feeds the conditional-update scenarios, which
//! add a `version` query parameter.

use serde_json::Value;
use tracing::info;

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::{ABSENT_ID, require_id};

/// Hooks a concrete test supplies to the update scenarios.
pub struct UpdateHooks<'a> {
    /// A payload the service must accept as a full update.
    pub valid_request: Value,
    /// Described payloads the service must reject as constraint violations.
    pub invalid_requests: Vec<(&'static str, Value)>,
    /// Body assertion run against the updated resource.
    pub assert_updated: &'a (dyn Fn(&Value) + Send + Sync),
}

/// Updates an existing resource: 200 with the updated body.
pub async fn updated<F: ResourceFixture>(harness: &Harness, fixture: &F, hooks: &UpdateHooks<'_>) {
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    let response = harness
        .client()
        .post(&harness.resource_path(&id), &hooks.valid_request)
        .await;

    asserts::assert_ok(&response);
    (hooks.assert_updated)(&asserts::json_body(&response));
}

/// Updating an id that never existed answers 404.
pub async fn absent_not_found(harness: &Harness, hooks: &UpdateHooks<'_>) {
    harness.reset_token();

    let response = harness
        .client()
        .post(&harness.resource_path(ABSENT_ID), &hooks.valid_request)
        .await;

    let expected = format!("Failed to update: {ABSENT_ID} is not found");
    asserts::assert_not_found(
        &response,
        Some(&|detail| {
            assert_eq!(detail, expected, "Unexpected not-found detail");
        }),
    );
}

/// Every invalid payload answers as a constraint violation.
pub async fn invalid_request_rejected<F: ResourceFixture>(
    harness: &Harness,
    fixture: &F,
    hooks: &UpdateHooks<'_>,
) {
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    for (description, request) in &hooks.invalid_requests {
        info!(case = description, "posting invalid update payload");

        let response = harness
            .client()
            .post(&harness.resource_path(&id), request)
            .await;

        asserts::assert_constraint_violation(&response, None);
    }
}
