//! Delete capability scenarios.
//!
//! Services differ on the delete response: some return 200 with the deleted
//! body, some 204 without one. Both are conformant; everything else fails.
//! Removal is confirmed through the read surface afterwards.

use http::StatusCode;
use serde_json::Value;

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::{ABSENT_ID, read, require_id};

/// Hooks a concrete test supplies to the delete scenarios.
pub struct DeleteHooks<'a> {
    /// Body assertion run against the deleted resource when the service
    /// answers 200 with a body.
    pub assert_deleted: &'a (dyn Fn(&Value) + Send + Sync),
}

/// Deletes an existing resource, accepting 200-with-body or 204-no-body,
/// then confirms the resource is gone.
pub async fn deleted<F: ResourceFixture>(harness: &Harness, fixture: &F, hooks: &DeleteHooks<'_>) {
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    let response = harness.client().delete(&harness.resource_path(&id)).await;

    match response.status_code() {
        StatusCode::OK => {
            asserts::assert_ok(&response);
            (hooks.assert_deleted)(&asserts::json_body(&response));
        }
        StatusCode::NO_CONTENT => {
            asserts::assert_no_content(&response);
        }
        other => panic!("Expected 200 or 204 on delete, got {}", other),
    }

    read::assert_absent(harness, &id).await;
}

/// Deleting an id that never existed answers 404.
pub async fn absent_not_found(harness: &Harness) {
    harness.reset_token();

    let response = harness
        .client()
        .delete(&harness.resource_path(ABSENT_ID))
        .await;

    let expected = format!("Failed to delete: {ABSENT_ID} not found");
    asserts::assert_not_found(
        &response,
        Some(&|detail| {
            assert_eq!(detail, expected, "Unexpected not-found detail");
        }),
    );
}
