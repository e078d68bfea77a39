//! Upsert capability scenarios.
//!
//! Upsert is PUT to a fixed target instance path: it creates when the target
//! id is absent and updates when present, so both arms run against the same
//! [`UpsertHooks::target_id`].

use serde_json::Value;
use tracing::info;

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::assert_location_targets_collection;

/// Hooks a concrete test supplies to the upsert scenarios.
pub struct UpsertHooks<'a> {
    /// Target instance id both arms PUT to.
    pub target_id: String,
    /// Payload establishing the resource when the target is absent.
    pub create_request: Value,
    /// Payload rewriting the resource when the target exists.
    pub update_request: Value,
    /// Described payloads the service must reject as constraint violations.
    pub invalid_requests: Vec<(&'static str, Value)>,
    /// Body assertion for the create arm.
    pub assert_created: &'a (dyn Fn(&Value) + Send + Sync),
    /// Body assertion for the update arm.
    pub assert_updated: &'a (dyn Fn(&Value) + Send + Sync),
}

/// Upserting an absent target creates it: 201 with Location and the created
/// body.
pub async fn creates_when_absent(harness: &Harness, hooks: &UpsertHooks<'_>) {
    harness.reset_token();

    let response = harness
        .client()
        .put(
            &harness.resource_path(&hooks.target_id),
            &hooks.create_request,
        )
        .await;

    asserts::assert_created(&response);
    assert_location_targets_collection(harness, &response);
    (hooks.assert_created)(&asserts::json_body(&response));
}

/// Upserting an existing target rewrites it: 200 with the updated body.
pub async fn updates_when_present<F: ResourceFixture>(
    harness: &Harness,
    fixture: &F,
    hooks: &UpsertHooks<'_>,
) {
    harness.reset_token();
    fixture.create_with_id(&hooks.target_id).await;

    let response = harness
        .client()
        .put(
            &harness.resource_path(&hooks.target_id),
            &hooks.update_request,
        )
        .await;

    asserts::assert_ok(&response);
    (hooks.assert_updated)(&asserts::json_body(&response));
}

/// Every invalid payload answers as a constraint violation.
pub async fn invalid_request_rejected(harness: &Harness, hooks: &UpsertHooks<'_>) {
    for (description, request) in &hooks.invalid_requests {
        harness.reset_token();
        info!(case = description, "putting invalid upsert payload");

        let response = harness
            .client()
            .put(&harness.resource_path(&hooks.target_id), request)
            .await;

        asserts::assert_constraint_violation(&response, None);
    }
}
