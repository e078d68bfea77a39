//! Kit behavior tests against miniature routers.
//!
//! These servers implement just enough surface to prove the kit's own
//! mechanics: bearer injection from the cell, per-request cell re-reads,
//! explicit-header override, the Set-Cookie leak check, localized 401/403
//! tolerance, both delete response arms, and patch skip semantics.

use async_trait::async_trait;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use axum_test::TestServer;
use serde_json::{Value, json};

use restcheck_conformance::{
    ConformanceClient, Harness, Identified, ResourceFixture, TokenCell, asserts, suites, token,
};

/// Wraps a router in a harness with the standard test identity installed.
fn harness_over(router: Router) -> Harness {
    let server = TestServer::new(router).expect("test server");
    let cell = TokenCell::new(Some(token::default_access_token()));
    Harness::new(ConformanceClient::new(server, cell), "/tasks")
}

fn problem(status: StatusCode, title: &str, detail: &str) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({
            "title": title,
            "status": status.as_u16(),
            "detail": detail,
        })),
    )
}

async fn echo_authorization(headers: HeaderMap) -> Json<Value> {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    Json(json!({ "authorization": authorization }))
}

mod bearer_injection {
    use super::*;

    fn echo_harness() -> Harness {
        harness_over(Router::new().route("/echo", get(echo_authorization)))
    }

    #[tokio::test]
    async fn injects_token_from_cell() {
        let harness = echo_harness();
        harness.client().token().set("abc123");

        let response = harness.client().get("/echo").await;

        let body = asserts::json_body(&response);
        assert_eq!(body["authorization"], json!("Bearer abc123"));
    }

    #[tokio::test]
    async fn rereads_cell_on_every_request() {
        let harness = echo_harness();

        harness.client().token().set("first");
        let body = asserts::json_body(&harness.client().get("/echo").await);
        assert_eq!(body["authorization"], json!("Bearer first"));

        harness.client().token().set("second");
        let body = asserts::json_body(&harness.client().get("/echo").await);
        assert_eq!(body["authorization"], json!("Bearer second"));
    }

    #[tokio::test]
    async fn cleared_cell_sends_no_header() {
        let harness = echo_harness();
        harness.client().token().clear();

        let body = asserts::json_body(&harness.client().get("/echo").await);
        assert_eq!(body["authorization"], Value::Null);
    }

    #[tokio::test]
    async fn explicit_authorization_wins_over_cell() {
        let harness = echo_harness();
        harness.client().token().set("from-cell");

        let response = harness
            .client()
            .send_with_headers(
                http::Method::GET,
                "/echo",
                None,
                &[(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_static("Bearer explicit"),
                )],
            )
            .await;

        let body = asserts::json_body(&response);
        assert_eq!(body["authorization"], json!("Bearer explicit"));
    }
}

mod response_assertions {
    use super::*;

    fn assertion_router() -> Router {
        Router::new()
            .route("/ok", get(|| async { Json(json!({"fine": true})) }))
            .route("/no-content", get(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/cookie",
                get(|| async {
                    (
                        StatusCode::OK,
                        [(header::SET_COOKIE, "session=abc123")],
                        "ok",
                    )
                }),
            )
            .route(
                "/unauthorized-en",
                get(|| async {
                    problem(
                        StatusCode::UNAUTHORIZED,
                        "Unauthorized",
                        "Full authentication is required to access this resource",
                    )
                }),
            )
            .route(
                "/unauthorized-ja",
                get(|| async {
                    problem(
                        StatusCode::UNAUTHORIZED,
                        "Unauthorized",
                        "このリソースにアクセスするには認証をする必要があります",
                    )
                }),
            )
            .route(
                "/forbidden-ja",
                get(|| async {
                    problem(StatusCode::FORBIDDEN, "Forbidden", "アクセスが拒否されました")
                }),
            )
            .route(
                "/untyped-violation",
                get(|| async {
                    problem(
                        StatusCode::BAD_REQUEST,
                        "Constraint Violation",
                        "title: must not be blank",
                    )
                }),
            )
    }

    #[tokio::test]
    async fn accepts_clean_responses() {
        let harness = harness_over(assertion_router());

        asserts::assert_ok(&harness.client().get("/ok").await);
        asserts::assert_no_content(&harness.client().get("/no-content").await);
    }

    #[tokio::test]
    #[should_panic(expected = "never set cookies")]
    async fn fails_on_set_cookie_leak() {
        let harness = harness_over(assertion_router());

        let response = harness.client().get("/cookie").await;
        asserts::assert_common(&response, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn accepts_both_unauthorized_localizations() {
        let harness = harness_over(assertion_router());

        asserts::assert_unauthorized(&harness.client().get("/unauthorized-en").await);
        asserts::assert_unauthorized(&harness.client().get("/unauthorized-ja").await);
        asserts::assert_forbidden(&harness.client().get("/forbidden-ja").await);
    }

    #[tokio::test]
    #[should_panic(expected = "constraint-violation type URI")]
    async fn constraint_violation_requires_type_uri() {
        let harness = harness_over(assertion_router());

        let response = harness.client().get("/untyped-violation").await;
        asserts::assert_constraint_violation(&response, None);
    }

    #[tokio::test]
    #[should_panic(expected = "Expected status")]
    async fn status_mismatch_fails() {
        let harness = harness_over(assertion_router());

        let response = harness.client().get("/ok").await;
        asserts::assert_created(&response);
    }
}

struct StaticResource {
    id: String,
}

impl Identified for StaticResource {
    fn id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

/// Fixture that fabricates ids without touching any store; the miniature
/// routers answer for any id.
struct StaticFixture;

#[async_trait]
impl ResourceFixture for StaticFixture {
    type Resource = StaticResource;

    async fn create_one(&self) -> StaticResource {
        StaticResource {
            id: "static-1".to_string(),
        }
    }

    async fn create_with_id(&self, id: &str) -> StaticResource {
        StaticResource { id: id.to_string() }
    }
}

mod delete_variants {
    use super::*;

    async fn read_not_found(Path(id): Path<String>) -> impl IntoResponse {
        problem(
            StatusCode::NOT_FOUND,
            "Not Found",
            &format!("Failed to get: {id} not found"),
        )
    }

    fn no_body_router() -> Router {
        Router::new()
            .route("/tasks/{id}", delete(|| async { StatusCode::NO_CONTENT }))
            .route("/tasks/{id}", get(read_not_found))
    }

    #[tokio::test]
    async fn accepts_no_content_delete() {
        let harness = harness_over(no_body_router());

        suites::delete::deleted(&harness, &StaticFixture, &suites::delete::DeleteHooks {
            assert_deleted: &|_| panic!("no body expected on 204 delete"),
        })
        .await;
    }

    #[tokio::test]
    #[should_panic(expected = "Expected 200 or 204 on delete")]
    async fn rejects_other_delete_statuses() {
        let router = Router::new()
            .route("/tasks/{id}", delete(|| async { StatusCode::ACCEPTED }))
            .route("/tasks/{id}", get(read_not_found));
        let harness = harness_over(router);

        suites::delete::deleted(&harness, &StaticFixture, &suites::delete::DeleteHooks {
            assert_deleted: &|_| {},
        })
        .await;
    }
}

mod fixture_defaults {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct SequenceFixture {
        next: AtomicUsize,
    }

    #[async_trait]
    impl ResourceFixture for SequenceFixture {
        type Resource = StaticResource;

        async fn create_one(&self) -> StaticResource {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            StaticResource {
                id: format!("seq-{n}"),
            }
        }

        async fn create_with_id(&self, id: &str) -> StaticResource {
            StaticResource { id: id.to_string() }
        }
    }

    /// Seeds through a generic bound, the way the list and truncate
    /// scenarios consume fixtures.
    async fn seed<F: ResourceFixture>(fixture: &F, count: usize) -> Vec<F::Resource> {
        fixture.create_many(count).await
    }

    #[tokio::test]
    async fn create_many_defaults_to_repeated_create_one() {
        let fixture = SequenceFixture {
            next: AtomicUsize::new(0),
        };

        let created = seed(&fixture, 3).await;

        let ids: Vec<_> = created.iter().map(|r| r.id().expect("id")).collect();
        assert_eq!(ids, vec!["seq-0", "seq-1", "seq-2"]);
    }
}

mod skip_semantics {
    use super::*;

    fn unimplemented_hooks<'a>() -> suites::patch::PatchHooks<'a> {
        suites::patch::PatchHooks {
            patch_request: None,
            invalid_requests: vec![("anything", json!({"title": ""}))],
            assert_patched: &|_| panic!("patch scenarios must be skipped"),
        }
    }

    #[tokio::test]
    async fn absent_hook_skips_without_requests() {
        // No routes at all: any request the scenario issued would 404 and
        // fail the assertion, so passing proves nothing was sent.
        let harness = harness_over(Router::new());

        let hooks = unimplemented_hooks();
        suites::patch::patched(&harness, &StaticFixture, &hooks).await;
        suites::patch::absent_not_found(&harness, &hooks).await;
        suites::patch::invalid_request_rejected(&harness, &StaticFixture, &hooks).await;
    }

    #[tokio::test]
    async fn not_implemented_status_skips() {
        let router = Router::new().route(
            "/tasks/{id}",
            axum::routing::patch(|| async { StatusCode::NOT_IMPLEMENTED }),
        );
        let harness = harness_over(router);

        let hooks = suites::patch::PatchHooks {
            patch_request: Some(json!({"title": "patched"})),
            invalid_requests: vec![],
            assert_patched: &|_| panic!("501 must skip, not assert"),
        };
        suites::patch::patched(&harness, &StaticFixture, &hooks).await;
    }
}
