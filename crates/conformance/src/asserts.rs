//! HTTP response assertions.
//!
//! Centralizes the expected-shape checks for standard HTTP outcomes against
//! the problem JSON error format, so capability scenarios share one
//! definition of what a correct 200/201/204/400/401/403/404/409 looks like.
//!
//! Every assertion funnels through [`assert_common`], which logs the raw
//! response for diagnostics and enforces the stateless-session invariant:
//! a `Set-Cookie` header in any response is an immediate failure.

use axum_test::TestResponse;
use http::StatusCode;
use http::header::SET_COOKIE;
use serde_json::Value;
use tracing::debug;

/// Problem `type` URI identifying the constraint-violation sub-shape.
pub const CONSTRAINT_VIOLATION_TYPE: &str =
    "https://zalando.github.io/problem/constraint-violation";

/// Accepted localized `detail` strings for 401 responses.
pub const UNAUTHORIZED_DETAILS: [&str; 2] = [
    "Full authentication is required to access this resource",
    "このリソースにアクセスするには認証をする必要があります",
];

/// Accepted localized `detail` strings for 403 responses.
pub const FORBIDDEN_DETAILS: [&str; 2] = ["Access is denied", "アクセスが拒否されました"];

/// A check run against a problem body's `detail` string.
pub type DetailCheck<'a> = &'a dyn Fn(&str);

/// Logs the response and runs the checks shared by every assertion.
///
/// Fails when the response carries any `Set-Cookie` header; when `expected`
/// is given, additionally fails unless the status matches it exactly.
pub fn assert_common(response: &TestResponse, expected: Option<StatusCode>) {
    let status = response.status_code();
    let body = response.text();
    debug!(status = status.as_u16(), body = %body, "asserting response");

    let cookies = response.headers().get_all(SET_COOKIE).iter().count();
    assert_eq!(
        cookies, 0,
        "Responses must never set cookies, found {} Set-Cookie header(s)",
        cookies
    );

    if let Some(expected) = expected {
        assert_eq!(
            status, expected,
            "Expected status {}, got {} (body: {})",
            expected, status, body
        );
    }
}

/// Asserts a 200 OK response.
pub fn assert_ok(response: &TestResponse) {
    assert_common(response, Some(StatusCode::OK));
}

/// Asserts a 201 Created response.
pub fn assert_created(response: &TestResponse) {
    assert_common(response, Some(StatusCode::CREATED));
}

/// Asserts a 204 No Content response with an empty body.
pub fn assert_no_content(response: &TestResponse) {
    assert_common(response, Some(StatusCode::NO_CONTENT));
    let body = response.text();
    assert!(
        body.is_empty(),
        "Expected empty body on 204, got {:?}",
        body
    );
}

/// Asserts that the response has a Location header.
pub fn assert_has_location(response: &TestResponse) {
    assert!(
        response.headers().contains_key("location"),
        "Expected Location header"
    );
}

/// Asserts a bare 400 problem body (`title` "Bad Request").
pub fn assert_bad_request(response: &TestResponse, detail_check: Option<DetailCheck>) {
    assert_problem(response, StatusCode::BAD_REQUEST, "Bad Request", detail_check);
}

/// Asserts the constraint-violation 400 sub-shape: `type` is the
/// constraint-violation URI and `title` is "Constraint Violation".
pub fn assert_constraint_violation(response: &TestResponse, detail_check: Option<DetailCheck>) {
    let body = assert_problem(
        response,
        StatusCode::BAD_REQUEST,
        "Constraint Violation",
        detail_check,
    );
    let type_uri = body.get("type").and_then(Value::as_str).unwrap_or("");
    assert_eq!(
        type_uri, CONSTRAINT_VIOLATION_TYPE,
        "Expected constraint-violation type URI, got {:?}",
        type_uri
    );
}

/// Asserts a 401 problem body with one of the accepted localized details.
pub fn assert_unauthorized(response: &TestResponse) {
    let body = assert_problem(response, StatusCode::UNAUTHORIZED, "Unauthorized", None);
    let detail = body.get("detail").and_then(Value::as_str).unwrap_or("");
    assert!(
        UNAUTHORIZED_DETAILS.contains(&detail),
        "Expected one of the accepted 401 details, got {:?}",
        detail
    );
}

/// Asserts a 403 problem body with one of the accepted localized details.
pub fn assert_forbidden(response: &TestResponse) {
    let body = assert_problem(response, StatusCode::FORBIDDEN, "Forbidden", None);
    let detail = body.get("detail").and_then(Value::as_str).unwrap_or("");
    assert!(
        FORBIDDEN_DETAILS.contains(&detail),
        "Expected one of the accepted 403 details, got {:?}",
        detail
    );
}

/// Asserts a 404 problem body (`title` "Not Found").
pub fn assert_not_found(response: &TestResponse, detail_check: Option<DetailCheck>) {
    assert_problem(response, StatusCode::NOT_FOUND, "Not Found", detail_check);
}

/// Asserts a 409 problem body (`title` "Conflict").
pub fn assert_conflict(response: &TestResponse, detail_check: Option<DetailCheck>) {
    assert_problem(response, StatusCode::CONFLICT, "Conflict", detail_check);
}

/// Parses the response body as JSON, failing with the raw text on error.
pub fn json_body(response: &TestResponse) -> Value {
    let text = response.text();
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("Expected JSON body, got {:?} ({})", text, e))
}

/// Shared problem-shape check: status, `title`, `status` field mirroring the
/// HTTP code, and an optional detail check. Returns the parsed body.
fn assert_problem(
    response: &TestResponse,
    expected: StatusCode,
    title: &str,
    detail_check: Option<DetailCheck>,
) -> Value {
    assert_common(response, Some(expected));
    let body = json_body(response);

    let actual_title = body.get("title").and_then(Value::as_str).unwrap_or("");
    assert_eq!(
        actual_title, title,
        "Expected title {:?}, got {:?} (body: {})",
        title, actual_title, body
    );

    let actual_status = body.get("status").and_then(Value::as_i64);
    assert_eq!(
        actual_status,
        Some(i64::from(expected.as_u16())),
        "Expected status field {}, got {:?} (body: {})",
        expected.as_u16(),
        actual_status,
        body
    );

    if let Some(check) = detail_check {
        let detail = body
            .get("detail")
            .and_then(Value::as_str)
            .unwrap_or_else(|| panic!("Expected detail in problem body, got {}", body));
        check(detail);
    }

    body
}

/// Asserts a JSON path value in the body.
pub fn assert_json_path(body: &Value, path: &str, expected: &Value) {
    let actual = json_path(body, path);
    assert_eq!(
        actual,
        Some(expected),
        "JSON path {} expected {:?}, got {:?}",
        path,
        expected,
        actual
    );
}

/// Asserts that a JSON path is absent from the body.
pub fn assert_json_path_absent(body: &Value, path: &str) {
    let actual = json_path(body, path);
    assert_eq!(
        actual, None,
        "JSON path {} expected to be absent, got {:?}",
        path, actual
    );
}

/// Gets a value from a JSON object using a simple path notation.
///
/// Supports:
/// - `field` - Direct field access
/// - `field.nested` - Nested field access
/// - `field[0]` - Array index access
pub fn json_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for part in path.split('.') {
        if let Some(bracket_pos) = part.find('[') {
            let field_name = &part[..bracket_pos];
            let index_str = &part[bracket_pos + 1..part.len() - 1];

            current = current.get(field_name)?;

            let index: usize = index_str.parse().ok()?;
            current = current.get(index)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current)
}
