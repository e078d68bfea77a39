//! List capability scenarios.
//!
//! Pins the chunked list shape `{chunk: {size, pagination_token?},
//! _embedded: {elements: [...]}}`: an empty collection answers with size 0
//! and neither the cursor nor the `_embedded` envelope; the cursor is present
//! exactly when further elements remain, so the final page never carries one.

use std::collections::HashSet;

use http::Method;
use serde_json::{Value, json};

use crate::asserts;
use crate::harness::{Harness, ResourceFixture};
use crate::suites::auth;

/// Lists an empty collection: 200, chunk size 0, no cursor, no elements.
pub async fn empty(harness: &Harness) {
    harness.reset_token();

    let response = harness.client().get(harness.path()).await;

    asserts::assert_ok(&response);
    let body = asserts::json_body(&response);
    asserts::assert_json_path(&body, "chunk.size", &json!(0));
    asserts::assert_json_path_absent(&body, "chunk.pagination_token");
    asserts::assert_json_path_absent(&body, "_embedded.elements");
}

/// Lists a collection that fits on one page: 200, chunk size 3, all three
/// elements embedded, and no cursor since the page is final.
pub async fn all_elements<F: ResourceFixture>(harness: &Harness, fixture: &F) {
    harness.reset_token();
    fixture.create_many(3).await;

    let response = harness.client().get(harness.path()).await;

    asserts::assert_ok(&response);
    let body = asserts::json_body(&response);
    asserts::assert_json_path(&body, "chunk.size", &json!(3));
    let elements = embedded_elements(&body);
    assert_eq!(
        elements.len(),
        3,
        "Expected 3 embedded elements, got {} (body: {})",
        elements.len(),
        body
    );
    asserts::assert_json_path_absent(&body, "chunk.pagination_token");
}

/// Walks a collection page by page: every page but the last is full and
/// carries a cursor; following cursors visits ceil(N/P) pages and retrieves
/// each element exactly once.
pub async fn paged<F: ResourceFixture>(harness: &Harness, fixture: &F) {
    harness.reset_token();
    let created = fixture.create_many(3).await;
    let page_size = 2usize;
    let expected_requests = created.len().div_ceil(page_size);

    let mut retrieved: Vec<Value> = Vec::new();
    let mut requests = 0usize;
    let mut next: Option<String> = None;

    loop {
        // Cursors are base64url without padding, safe to splice into a query.
        let path = match &next {
            Some(cursor) => format!("{}?size={page_size}&next={cursor}", harness.path()),
            None => format!("{}?size={page_size}", harness.path()),
        };

        let response = harness.client().get(&path).await;
        asserts::assert_ok(&response);
        requests += 1;
        assert!(
            requests <= created.len() + 1,
            "Pagination does not terminate after {} requests",
            requests
        );

        let body = asserts::json_body(&response);
        let chunk_size = asserts::json_path(&body, "chunk.size")
            .and_then(Value::as_u64)
            .unwrap_or_else(|| panic!("Expected numeric chunk.size, got {}", body));

        match asserts::json_path(&body, "_embedded.elements").and_then(Value::as_array) {
            Some(elements) => {
                assert_eq!(
                    elements.len() as u64,
                    chunk_size,
                    "chunk.size disagrees with embedded element count (body: {})",
                    body
                );
                retrieved.extend(elements.iter().cloned());
            }
            None => {
                assert_eq!(chunk_size, 0, "chunk.size {} with no elements", chunk_size);
            }
        }

        match asserts::json_path(&body, "chunk.pagination_token").and_then(Value::as_str) {
            Some(cursor) => next = Some(cursor.to_string()),
            None => break,
        }
    }

    assert_eq!(
        requests, expected_requests,
        "Expected {} page requests for {} resources at size {}, made {}",
        expected_requests,
        created.len(),
        page_size,
        requests
    );
    assert_eq!(
        retrieved.len(),
        created.len(),
        "Expected {} elements across all pages, got {}",
        created.len(),
        retrieved.len()
    );

    let mut seen = HashSet::new();
    for element in &retrieved {
        assert!(
            seen.insert(element.to_string()),
            "Element returned on more than one page: {}",
            element
        );
    }
}

/// A tokenless list request answers 401.
pub async fn rejects_missing_token(harness: &Harness) {
    auth::rejects_missing_token(harness, Method::GET, harness.path()).await;
}

/// A list request without the list authority answers 403.
pub async fn rejects_insufficient_authority(harness: &Harness) {
    auth::rejects_insufficient_authority(harness, Method::GET, harness.path()).await;
}

fn embedded_elements(body: &Value) -> &Vec<Value> {
    asserts::json_path(body, "_embedded.elements")
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("Expected _embedded.elements array, got {}", body))
}
