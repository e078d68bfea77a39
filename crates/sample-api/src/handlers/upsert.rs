//! Upsert interaction handler.
//!
//! `PUT /tasks/{id}` creates the task when the id is free and replaces
//! its mutable fields when it already exists. The body carries the full
//! create form and its id must match the path.

use axum::{
    Json,
    http::{StatusCode, header},
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::{ApiResult, Violation};
use crate::extractors::{ApiJson, Authorized};
use crate::handlers::authority;
use crate::model::CreateTaskRequest;
use crate::routes::TASKS_PATH;
use crate::state::AppState;

/// Handler for `PUT /tasks/{id}`.
pub async fn upsert_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _auth: Authorized<authority::Upsert>,
    ApiJson(request): ApiJson<CreateTaskRequest>,
) -> ApiResult<Response> {
    request.validate()?;
    if request.id != id {
        return Err(vec![Violation::new("id", "must match the path identifier")].into());
    }

    let (task, created) = state.store().upsert(request.into_task());
    debug!(id = %task.id, version = task.version, created, "task upserted");

    if created {
        let location = format!("{}{}/{}", state.base_url(), TASKS_PATH, task.id);
        Ok((
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(task),
        )
            .into_response())
    } else {
        Ok((StatusCode::OK, Json(task)).into_response())
    }
}
