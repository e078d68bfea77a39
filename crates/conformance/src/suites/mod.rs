//! Capability scenario modules.
//!
//! One module per REST capability, each exposing the standard scenario set
//! for that capability as independent async functions. A concrete resource
//! test composes its suite by calling the scenarios it supports, passing its
//! [`Harness`](crate::Harness), its fixture, and per-capability hook structs
//! carrying payloads and body assertions.
//!
//! Scenarios have no ordering dependencies; each installs the standard test
//! identity before acting and creates its own preconditions.

pub mod auth;
pub mod conditional_update;
pub mod create;
pub mod delete;
pub mod list;
pub mod patch;
pub mod read;
pub mod truncate;
pub mod update;
pub mod upsert;

use axum_test::TestResponse;
use url::Url;

use crate::asserts;
use crate::harness::Harness;
use crate::identity::Identified;

/// Identifier used by all absent-resource scenarios.
pub const ABSENT_ID: &str = "absent";

/// Description key marking the invalid-payload entry whose failure is a bare
/// 400 (the request never deserializes) rather than a constraint violation.
pub const REQUIRED_MISSING: &str = "required missing";

/// Returns the fixture resource's id, failing the scenario when absent.
pub(crate) fn require_id<R: Identified>(resource: &R) -> String {
    resource
        .id()
        .expect("fixture resource must expose an identifier")
}

/// Asserts the Location header is a parseable URL whose path points into the
/// harness's collection.
pub(crate) fn assert_location_targets_collection(harness: &Harness, response: &TestResponse) {
    asserts::assert_has_location(response);
    let raw = response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_else(|| panic!("Location header is not valid UTF-8"));

    // Locations may be absolute or server-relative; resolve the latter
    // against a throwaway base before validating.
    let base = Url::parse("http://testserver/").expect("static base URL");
    let url = Url::options()
        .base_url(Some(&base))
        .parse(raw)
        .unwrap_or_else(|e| panic!("Location {:?} is not a valid URL: {}", raw, e));

    assert!(
        url.path().starts_with(&format!("{}/", harness.path())),
        "Location {:?} does not target the collection {}",
        raw,
        harness.path()
    );
}
