//! Shared environment for the task conformance suite.
//!
//! Spawns the service in-process over a fresh store, wires up the kit's
//! bearer-injecting harness, and supplies the task-shaped payloads and body
//! assertions the capability scenarios hook into.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use restcheck_conformance::{
    ConformanceClient, Harness, ResourceFixture, TokenCell, asserts, suites, token,
};
use restcheck_sample_api::{ServerConfig, Task, TaskStore, create_app};
use serde_json::json;
use uuid::Uuid;

/// Id used by the create scenarios.
pub const CREATE_ID: &str = "launch-checklist";

/// Target id both upsert arms PUT to.
pub const UPSERT_ID: &str = "standing-agenda";

/// A harness over a fresh server plus the fixture seeding the store
/// behind it.
pub struct TestEnv {
    pub harness: Harness,
    pub fixture: TaskFixture,
}

/// Builds the service over an empty store and a harness holding the
/// standard test identity.
pub fn spawn() -> TestEnv {
    let store = Arc::new(TaskStore::new());
    let app = create_app(Arc::clone(&store), ServerConfig::for_testing());
    let server = TestServer::new(app).expect("test server");
    let cell = TokenCell::new(Some(token::default_access_token()));
    let harness = Harness::new(ConformanceClient::new(server, cell), "/tasks");

    TestEnv {
        harness,
        fixture: TaskFixture { store },
    }
}

/// Seeds tasks directly in the store, bypassing the HTTP surface under test.
pub struct TaskFixture {
    store: Arc<TaskStore>,
}

#[async_trait]
impl ResourceFixture for TaskFixture {
    type Resource = Task;

    async fn create_one(&self) -> Task {
        let id = format!("task-{}", Uuid::new_v4());
        self.create_with_id(&id).await
    }

    async fn create_with_id(&self, id: &str) -> Task {
        let task = Task::new(id, format!("Task {id}"), None, 5);
        self.store.insert(task).expect("fixture insert")
    }
}

/// Create scenario hooks: one acceptable payload, the rejectable ones, and
/// the created-body assertion.
pub fn create_hooks<'a>() -> suites::create::CreateHooks<'a> {
    suites::create::CreateHooks {
        valid_request: json!({
            "id": CREATE_ID,
            "title": "Write the launch checklist",
            "description": "Cover rollout and rollback steps",
            "priority": 3,
        }),
        invalid_requests: vec![
            (suites::REQUIRED_MISSING, json!({"id": "missing-title"})),
            ("blank title", json!({"id": "blank-title", "title": "   "})),
            (
                "overlong title",
                json!({"id": "overlong-title", "title": "x".repeat(65)}),
            ),
            (
                "priority out of range",
                json!({"id": "bad-priority", "title": "Valid title", "priority": 0}),
            ),
            (
                "malformed id",
                json!({"id": "Not Valid!", "title": "Valid title"}),
            ),
        ],
        assert_created: &|body| {
            asserts::assert_json_path(body, "id", &json!(CREATE_ID));
            asserts::assert_json_path(body, "title", &json!("Write the launch checklist"));
            asserts::assert_json_path(body, "priority", &json!(3));
            asserts::assert_json_path(body, "version", &json!(0));
        },
    }
}

/// Read scenario hooks asserting the fixture-task shape.
pub fn read_hooks<'a>() -> suites::read::ReadHooks<'a> {
    suites::read::ReadHooks {
        assert_resource: &|body| {
            assert!(body.get("id").is_some(), "fetched body must carry the id");
            asserts::assert_json_path(body, "priority", &json!(5));
            asserts::assert_json_path(body, "version", &json!(0));
        },
    }
}

/// Update scenario hooks, shared with the conditional-update scenarios.
///
/// Every invalid payload still deserializes, so each one must surface as a
/// constraint violation rather than a bare 400.
pub fn update_hooks<'a>() -> suites::update::UpdateHooks<'a> {
    suites::update::UpdateHooks {
        valid_request: json!({
            "title": "Revised title",
            "description": "Revised description",
            "priority": 7,
        }),
        invalid_requests: vec![
            ("blank title", json!({"title": " ", "priority": 7})),
            (
                "overlong title",
                json!({"title": "x".repeat(65), "priority": 7}),
            ),
            (
                "priority out of range",
                json!({"title": "Valid title", "priority": 0}),
            ),
        ],
        assert_updated: &|body| {
            asserts::assert_json_path(body, "title", &json!("Revised title"));
            asserts::assert_json_path(body, "description", &json!("Revised description"));
            asserts::assert_json_path(body, "priority", &json!(7));
            asserts::assert_json_path(body, "version", &json!(1));
        },
    }
}

/// Patch scenario hooks using a merge patch that touches one field.
pub fn patch_hooks<'a>() -> suites::patch::PatchHooks<'a> {
    suites::patch::PatchHooks {
        patch_request: Some(json!({"description": "Patched description"})),
        invalid_requests: vec![
            ("blank title", json!({"title": ""})),
            ("priority out of range", json!({"priority": 0})),
            ("title removed", json!({"title": null})),
        ],
        assert_patched: &|body| {
            asserts::assert_json_path(body, "description", &json!("Patched description"));
            asserts::assert_json_path(body, "priority", &json!(5));
            asserts::assert_json_path(body, "version", &json!(1));
        },
    }
}

/// Delete scenario hooks asserting the returned last state.
pub fn delete_hooks<'a>() -> suites::delete::DeleteHooks<'a> {
    suites::delete::DeleteHooks {
        assert_deleted: &|body| {
            assert!(body.get("id").is_some(), "deleted body must carry the id");
            asserts::assert_json_path(body, "version", &json!(0));
        },
    }
}

/// Upsert scenario hooks. The request bodies carry the target id because the
/// service rejects a body id that differs from the path.
pub fn upsert_hooks<'a>() -> suites::upsert::UpsertHooks<'a> {
    suites::upsert::UpsertHooks {
        target_id: UPSERT_ID.to_string(),
        create_request: json!({
            "id": UPSERT_ID,
            "title": "Prepare the standing agenda",
            "priority": 4,
        }),
        update_request: json!({
            "id": UPSERT_ID,
            "title": "Refresh the standing agenda",
            "description": "Carry over open items",
            "priority": 2,
        }),
        invalid_requests: vec![
            ("blank title", json!({"id": UPSERT_ID, "title": "  "})),
            (
                "priority out of range",
                json!({"id": UPSERT_ID, "title": "Valid title", "priority": 99}),
            ),
            (
                "id differs from path",
                json!({"id": "different-id", "title": "Valid title"}),
            ),
        ],
        assert_created: &|body| {
            asserts::assert_json_path(body, "id", &json!(UPSERT_ID));
            asserts::assert_json_path(body, "title", &json!("Prepare the standing agenda"));
            asserts::assert_json_path(body, "version", &json!(0));
        },
        assert_updated: &|body| {
            asserts::assert_json_path(body, "id", &json!(UPSERT_ID));
            asserts::assert_json_path(body, "title", &json!("Refresh the standing agenda"));
            asserts::assert_json_path(body, "version", &json!(1));
        },
    }
}
