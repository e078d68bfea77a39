//! Read capability scenarios.

use serde_json::Value;

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::{ABSENT_ID, require_id};

/// Hooks a concrete test supplies to the read scenarios.
pub struct ReadHooks<'a> {
    /// Body assertion run against a fetched resource.
    pub assert_resource: &'a (dyn Fn(&Value) + Send + Sync),
}

/// Reads an existing resource: 200 with a body the concrete test recognizes.
pub async fn found<F: ResourceFixture>(harness: &Harness, fixture: &F, hooks: &ReadHooks<'_>) {
    harness.reset_token();
    let created = fixture.create_one().await;
    let id = require_id(&created);

    let response = harness.client().get(&harness.resource_path(&id)).await;

    asserts::assert_ok(&response);
    (hooks.assert_resource)(&asserts::json_body(&response));
}

/// Reading an id that never existed answers 404.
pub async fn absent_not_found(harness: &Harness) {
    harness.reset_token();
    assert_absent(harness, ABSENT_ID).await;
}

/// Asserts that the given id is absent: a read answers 404 with the
/// read-specific detail. Also used by the delete scenarios to confirm
/// removal.
pub async fn assert_absent(harness: &Harness, id: &str) {
    let response = harness.client().get(&harness.resource_path(id)).await;

    let expected = format!("Failed to get: {id} not found");
    asserts::assert_not_found(
        &response,
        Some(&|detail| {
            assert_eq!(detail, expected, "Unexpected not-found detail");
        }),
    );
}
