//! Patch capability scenarios.
//!
//! Patch support is optional: a concrete test signals "not implemented" by
//! leaving [`PatchHooks::patch_request`] unset, and a service may answer 501.
//! Either signal turns the scenario into a logged skip instead of a failure,
//! so partially-implemented resources can still run the full suite.

use http::StatusCode;
use serde_json::Value;
use tracing::info;

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::{ABSENT_ID, require_id};

/// Hooks a concrete test supplies to the patch scenarios.
pub struct PatchHooks<'a> {
    /// A patch document the service must accept; `None` marks the capability
    /// unimplemented and skips every patch scenario.
    pub patch_request: Option<Value>,
    /// Described patch documents the service must reject as constraint
    /// violations.
    pub invalid_requests: Vec<(&'static str, Value)>,
    /// Body assertion run against the patched resource.
    pub assert_patched: &'a (dyn Fn(&Value) + Send + Sync),
}

/// Patches an existing resource: 200 with the patched body.
pub async fn patched<F: ResourceFixture>(harness: &Harness, fixture: &F, hooks: &PatchHooks<'_>) {
    let Some(request) = &hooks.patch_request else {
        skip("patched");
        return;
    };
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    let response = harness
        .client()
        .patch(&harness.resource_path(&id), request)
        .await;

    if response.status_code() == StatusCode::NOT_IMPLEMENTED {
        skip("patched");
        return;
    }
    asserts::assert_ok(&response);
    (hooks.assert_patched)(&asserts::json_body(&response));
}

/// Patching an id that never existed answers 404.
pub async fn absent_not_found(harness: &Harness, hooks: &PatchHooks<'_>) {
    let Some(request) = &hooks.patch_request else {
        skip("absent_not_found");
        return;
    };
    harness.reset_token();

    let response = harness
        .client()
        .patch(&harness.resource_path(ABSENT_ID), request)
        .await;

    if response.status_code() == StatusCode::NOT_IMPLEMENTED {
        skip("absent_not_found");
        return;
    }
    let expected = format!("Failed to update: {ABSENT_ID} is not found");
    asserts::assert_not_found(
        &response,
        Some(&|detail| {
            assert_eq!(detail, expected, "Unexpected not-found detail");
        }),
    );
}

/// Every invalid patch document answers as a constraint violation.
pub async fn invalid_request_rejected<F: ResourceFixture>(
    harness: &Harness,
    fixture: &F,
    hooks: &PatchHooks<'_>,
) {
    if hooks.patch_request.is_none() {
        skip("invalid_request_rejected");
        return;
    }
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    for (description, request) in &hooks.invalid_requests {
        info!(case = description, "patching with invalid document");

        let response = harness
            .client()
            .patch(&harness.resource_path(&id), request)
            .await;

        if response.status_code() == StatusCode::NOT_IMPLEMENTED {
            skip("invalid_request_rejected");
            return;
        }
        asserts::assert_constraint_violation(&response, None);
    }
}

fn skip(scenario: &str) {
    info!(scenario, "patch capability not implemented, skipping");
}
