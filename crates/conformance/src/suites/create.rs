//! Create capability scenarios.

use serde_json::Value;
use tracing::info;

use crate::asserts;
use crate::harness::Harness;
use crate::suites::{REQUIRED_MISSING, assert_location_targets_collection};

/// Hooks a concrete test supplies to the create scenarios.
pub struct CreateHooks<'a> {
    /// A payload the service must accept.
    pub valid_request: Value,
    /// Described payloads the service must reject with a 400-class response.
    pub invalid_requests: Vec<(&'static str, Value)>,
    /// Body assertion run against the created resource.
    pub assert_created: &'a (dyn Fn(&Value) + Send + Sync),
}

/// Creates a resource: 201, a Location header targeting the collection, and
/// a body the concrete test recognizes as the created resource.
pub async fn created(harness: &Harness, hooks: &CreateHooks<'_>) {
    harness.reset_token();

    let response = harness
        .client()
        .post(harness.path(), &hooks.valid_request)
        .await;

    asserts::assert_created(&response);
    assert_location_targets_collection(harness, &response);
    (hooks.assert_created)(&asserts::json_body(&response));
}

/// Submitting the same create payload twice answers 409 with the
/// duplicated-id detail on the second attempt.
pub async fn duplicate_id_conflict(harness: &Harness, hooks: &CreateHooks<'_>) {
    harness.reset_token();

    let first = harness
        .client()
        .post(harness.path(), &hooks.valid_request)
        .await;
    asserts::assert_created(&first);

    let second = harness
        .client()
        .post(harness.path(), &hooks.valid_request)
        .await;
    asserts::assert_conflict(
        &second,
        Some(&|detail| {
            assert!(
                detail.starts_with("The ID of the entity"),
                "Expected duplicated-id detail, got {:?}",
                detail
            );
            assert!(
                detail.ends_with(" is duplicated."),
                "Expected duplicated-id detail, got {:?}",
                detail
            );
        }),
    );
}

/// Every invalid payload answers with a 400-class response: the
/// [`REQUIRED_MISSING`] entry as a bare 400 (the body never deserializes),
/// all others as constraint violations.
pub async fn invalid_request_rejected(harness: &Harness, hooks: &CreateHooks<'_>) {
    for (description, request) in &hooks.invalid_requests {
        harness.reset_token();
        info!(case = description, "posting invalid create payload");

        let response = harness.client().post(harness.path(), request).await;

        if *description == REQUIRED_MISSING {
            asserts::assert_bad_request(&response, None);
        } else {
            asserts::assert_constraint_violation(&response, None);
        }
    }
}
